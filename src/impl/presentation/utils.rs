use chrono::NaiveDate;
use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, BRL = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Format cash amount the pt-BR way: symbol first, '.' as thousands separator
/// and ',' as decimal mark (ex. "R$ 1.234,56").
///
/// Rounds to the currency's minor unit before splitting, so 0.999 prints as
/// "R$ 1,00" rather than carrying a stray fraction.
pub(crate) fn format_money(amount: f64, currency: Currency) -> String {
    let places = decimal_places(currency);
    let scale = 10_i64.pow(places);
    let minor_units = (amount.abs() * scale as f64).round() as i64;
    let sign = if amount < 0.0 && minor_units != 0 { "-" } else { "" };
    let integer_part = (minor_units / scale).to_formatted_string(&Locale::pt);
    if places == 0 {
        format!("{}{} {}", sign, currency.symbol(), integer_part)
    } else {
        format!(
            "{}{} {},{:0width$}",
            sign,
            currency.symbol(),
            integer_part,
            minor_units % scale,
            width = places as usize,
        )
    }
}

/// Whole quantities print without decimals; fractional ones (ex. kilograms)
/// keep up to three places with ',' as decimal mark.
pub(crate) fn format_quantity(quantity: f64) -> String {
    let s = format!("{:.3}", quantity);
    s.trim_end_matches('0').trim_end_matches('.').replace('.', ",")
}

/// Localized (pt-BR) short date.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub(crate) fn pluralize_items(count: usize) -> &'static str {
    if count == 1 {
        "item"
    } else {
        "itens"
    }
}

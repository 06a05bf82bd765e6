use regex::Regex;

/// Trims the name; blank names are `None`.
pub(crate) fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Monetary and quantity fields are never negative, NaN or infinite; such
/// values become 0.
pub(crate) fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Parses a user-typed amount. Accepts an optional "R$" prefix and either a
/// plain decimal with '.' or ',' as decimal mark (ex. "1234.56", "3,50") or
/// the pt-BR grouped form (ex. "1.234,56"). Anything else, including mixed
/// separators like "1,234.56", is 0.
pub(crate) fn parse_amount_input(input: &str) -> f64 {
    let cleaned = input.trim().trim_start_matches("R$").trim().replace(' ', "");
    let plain_pattern =
        Regex::new(r"^[+-]?\d+([.,]\d+)?$").expect("hardcoded regex should be valid");
    let grouped_pattern = Regex::new(r"^[+-]?\d{1,3}(\.\d{3})+(,\d+)?$")
        .expect("hardcoded regex should be valid");
    let normalized = if plain_pattern.is_match(&cleaned) {
        cleaned.replace(',', ".")
    } else if grouped_pattern.is_match(&cleaned) {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        return 0.0;
    };
    sanitize_amount(normalized.parse::<f64>().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_input_parsing() {
        assert_eq!(parse_amount_input("150"), 150.0);
        assert_eq!(parse_amount_input("150.5"), 150.5);
        assert_eq!(parse_amount_input(" 3,50 "), 3.5);
        assert_eq!(parse_amount_input("R$ 1.234,56"), 1234.56);
        assert_eq!(parse_amount_input("abc"), 0.0);
        assert_eq!(parse_amount_input(""), 0.0);
        assert_eq!(parse_amount_input("-20"), 0.0);
        assert_eq!(parse_amount_input("12.345.678,9"), 12345678.9);
    }

    #[test]
    fn mixed_separators_are_rejected() {
        assert_eq!(parse_amount_input("1,234.56"), 0.0);
        assert_eq!(parse_amount_input("1.23,4.5"), 0.0);
        assert_eq!(parse_amount_input("12.34,5"), 0.0);
    }

    #[test]
    fn sanitize_rejects_non_finite_and_negative() {
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(-0.01), 0.0);
        assert_eq!(sanitize_amount(2.5), 2.5);
    }
}

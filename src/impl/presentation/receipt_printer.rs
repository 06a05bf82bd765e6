use chrono::NaiveDate;
use iso_currency::Currency;

use crate::{
    domain::logic::summary_processor::SummaryProcessor,
    entities::{CategoryGroup, PurchaseSummary, ShoppingItem},
};

use super::utils::{format_date, format_money, format_quantity, pluralize_items};

// A4 portrait, millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;
const TOP_MM: f64 = 30.0;
const ITEM_INDENT_MM: f64 = 5.0;
const ITEM_LINE_MM: f64 = 5.0;

// A section (category heading or footer) never starts below this cursor
// position; a single item line never starts below the second one.
const SECTION_BREAK_MM: f64 = 250.0;
const ITEM_BREAK_MM: f64 = 270.0;

// Approximate characters per item line at 10pt within the margins.
const ITEM_WRAP_COLUMNS: usize = 72;

// Column width of the plain-text rendering.
const TEXT_COLUMNS: usize = 80;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ReceiptElement {
    Text {
        x_mm: f64,
        y_mm: f64,
        align: Align,
        size_pt: f64,
        bold: bool,
        text: String,
    },
    Rule {
        y_mm: f64,
        from_mm: f64,
        to_mm: f64,
        weight_mm: f64,
    },
}

impl ReceiptElement {
    fn y_mm(&self) -> f64 {
        match self {
            ReceiptElement::Text { y_mm, .. } | ReceiptElement::Rule { y_mm, .. } => *y_mm,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct ReceiptPage {
    pub elements: Vec<ReceiptElement>,
}

/// Page-laid-out purchase receipt. Positions are absolute on an A4 page.
#[derive(Debug, PartialEq, Clone)]
pub struct ReceiptDocument {
    pub pages: Vec<ReceiptPage>,
}

/// Tracks the vertical cursor and starts a new page before content would
/// overflow.
struct PageCursor {
    pages: Vec<ReceiptPage>,
    y: f64,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![ReceiptPage::default()],
            y: TOP_MM,
        }
    }

    fn break_if_past(&mut self, limit_mm: f64) {
        if self.y > limit_mm {
            self.pages.push(ReceiptPage::default());
            self.y = TOP_MM;
        }
    }

    fn advance(&mut self, mm: f64) {
        self.y += mm;
    }

    fn text(&mut self, x_mm: f64, align: Align, size_pt: f64, bold: bool, text: String) {
        let y_mm = self.y;
        self.push(ReceiptElement::Text {
            x_mm,
            y_mm,
            align,
            size_pt,
            bold,
            text,
        });
    }

    fn rule(&mut self, weight_mm: f64) {
        let y_mm = self.y;
        self.push(ReceiptElement::Rule {
            y_mm,
            from_mm: MARGIN_MM,
            to_mm: PAGE_WIDTH_MM - MARGIN_MM,
            weight_mm,
        });
    }

    fn push(&mut self, element: ReceiptElement) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn finish(self) -> ReceiptDocument {
        ReceiptDocument { pages: self.pages }
    }
}

pub(crate) struct ReceiptPrinter {
    currency: Currency,
}

impl ReceiptPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub(crate) fn print(&self, summary: &PurchaseSummary, date: NaiveDate) -> ReceiptDocument {
        let mut cursor = PageCursor::new();
        let center = PAGE_WIDTH_MM / 2.0;

        cursor.text(center, Align::Center, 20.0, true, "MERCADO".to_string());
        cursor.advance(10.0);
        cursor.text(center, Align::Center, 12.0, false, "Lista de Compras".to_string());
        cursor.advance(8.0);
        cursor.text(center, Align::Center, 10.0, false, format_date(date));
        cursor.advance(20.0);

        for group in SummaryProcessor::new(&summary.items).process() {
            self.print_group(&mut cursor, &group);
        }

        cursor.break_if_past(SECTION_BREAK_MM);
        cursor.advance(10.0);
        cursor.rule(1.0);
        cursor.advance(10.0);
        cursor.text(
            center,
            Align::Center,
            16.0,
            true,
            format!("TOTAL GERAL: {}", format_money(summary.total, self.currency)),
        );
        cursor.advance(8.0);
        let count = summary.items.len();
        cursor.text(
            center,
            Align::Center,
            10.0,
            false,
            format!("{} {} comprados", count, pluralize_items(count)),
        );

        cursor.finish()
    }

    fn print_group(&self, cursor: &mut PageCursor, group: &CategoryGroup) {
        cursor.break_if_past(SECTION_BREAK_MM);
        cursor.text(
            MARGIN_MM,
            Align::Left,
            14.0,
            true,
            format!(
                "{} - {}",
                group.category.label().to_uppercase(),
                format_money(group.subtotal, self.currency)
            ),
        );
        cursor.advance(8.0);
        cursor.rule(0.5);
        cursor.advance(5.0);

        for item in &group.items {
            for line in textwrap::wrap(&self.item_line(item), ITEM_WRAP_COLUMNS) {
                cursor.break_if_past(ITEM_BREAK_MM);
                cursor.text(
                    MARGIN_MM + ITEM_INDENT_MM,
                    Align::Left,
                    10.0,
                    false,
                    line.into_owned(),
                );
                cursor.advance(ITEM_LINE_MM);
            }
        }
        cursor.advance(5.0);
    }

    fn item_line(&self, item: &ShoppingItem) -> String {
        format!(
            "{} - {}x {} = {}",
            item.name,
            format_quantity(item.quantity),
            format_money(item.price, self.currency),
            format_money(item.subtotal(), self.currency),
        )
    }

    /// Plain-text rendering: one output line per element in vertical order,
    /// pages separated by a form feed.
    pub(crate) fn render_text(&self, document: &ReceiptDocument) -> String {
        document
            .pages
            .iter()
            .map(|page| {
                let mut elements: Vec<&ReceiptElement> = page.elements.iter().collect();
                elements.sort_by(|a, b| a.y_mm().total_cmp(&b.y_mm()));
                let mut out = String::new();
                for element in elements {
                    out.push_str(&render_element(element));
                    out.push('\n');
                }
                out
            })
            .collect::<Vec<_>>()
            .join("\u{c}\n")
    }
}

fn render_element(element: &ReceiptElement) -> String {
    match element {
        ReceiptElement::Text {
            x_mm, align, text, ..
        } => match align {
            Align::Center => format!("{:^width$}", text, width = TEXT_COLUMNS)
                .trim_end()
                .to_string(),
            Align::Left => {
                let indent = ((x_mm - MARGIN_MM) / ITEM_INDENT_MM * 2.0).round().max(0.0) as usize;
                format!("{}{}", " ".repeat(indent), text)
            }
        },
        ReceiptElement::Rule { weight_mm, .. } => {
            let c = if *weight_mm >= 1.0 { '=' } else { '-' };
            c.to_string().repeat(TEXT_COLUMNS)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::Category;

    fn summary(items: Vec<ShoppingItem>) -> PurchaseSummary {
        let total = items.iter().map(ShoppingItem::subtotal).sum();
        PurchaseSummary {
            items,
            total,
            finalized_at: Utc::now(),
        }
    }

    fn texts(page: &ReceiptPage) -> Vec<&str> {
        page.elements
            .iter()
            .filter_map(|e| match e {
                ReceiptElement::Text { text, .. } => Some(text.as_str()),
                ReceiptElement::Rule { .. } => None,
            })
            .collect()
    }

    #[test]
    fn sections_are_sorted_by_subtotal_and_footer_counts_items() {
        let s = summary(vec![
            ShoppingItem::new("Pão", 5.0, 1.0, Category::Padaria).unwrap(),
            ShoppingItem::new("Maçã", 3.0, 2.0, Category::Frutas).unwrap(),
            ShoppingItem::new("Banana", 1.0, 1.0, Category::Frutas).unwrap(),
        ]);
        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let doc = ReceiptPrinter::new(Currency::BRL).print(&s, date);

        assert_eq!(doc.pages.len(), 1);
        assert_eq!(
            texts(&doc.pages[0]),
            vec![
                "MERCADO",
                "Lista de Compras",
                "10/05/2025",
                "FRUTAS - R$ 7,00",
                "Maçã - 2x R$ 3,00 = R$ 6,00",
                "Banana - 1x R$ 1,00 = R$ 1,00",
                "PADARIA - R$ 5,00",
                "Pão - 1x R$ 5,00 = R$ 5,00",
                "TOTAL GERAL: R$ 12,00",
                "3 itens comprados",
            ]
        );
    }

    #[test]
    fn long_purchases_paginate_within_page_bounds() {
        let items: Vec<ShoppingItem> = (0..120)
            .map(|i| {
                let category = Category::ALL[i % Category::ALL.len()];
                ShoppingItem::new(&format!("Produto {i}"), 1.0 + i as f64, 1.0, category).unwrap()
            })
            .collect();
        let doc = ReceiptPrinter::new(Currency::BRL)
            .print(&summary(items), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            for element in &page.elements {
                let y = element.y_mm();
                assert!(y >= TOP_MM && y < PAGE_HEIGHT_MM - 10.0, "y = {y}");
            }
        }
        let last = doc.pages.last().unwrap();
        assert_eq!(texts(last).last().copied(), Some("120 itens comprados"));
    }

    #[test]
    fn text_rendering_separates_pages_with_form_feed() {
        let printer = ReceiptPrinter::new(Currency::BRL);
        let doc = ReceiptDocument {
            pages: vec![
                ReceiptPage {
                    elements: vec![ReceiptElement::Text {
                        x_mm: PAGE_WIDTH_MM / 2.0,
                        y_mm: TOP_MM,
                        align: Align::Center,
                        size_pt: 20.0,
                        bold: true,
                        text: "MERCADO".to_string(),
                    }],
                },
                ReceiptPage {
                    elements: vec![ReceiptElement::Rule {
                        y_mm: TOP_MM,
                        from_mm: MARGIN_MM,
                        to_mm: PAGE_WIDTH_MM - MARGIN_MM,
                        weight_mm: 0.5,
                    }],
                },
            ],
        };
        let text = printer.render_text(&doc);
        let pages: Vec<&str> = text.split('\u{c}').collect();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].trim(), "MERCADO");
        assert_eq!(pages[1].trim(), "-".repeat(TEXT_COLUMNS));
    }
}

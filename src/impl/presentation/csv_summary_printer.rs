use fractic_server_error::ServerError;

use crate::{
    domain::logic::summary_processor::SummaryProcessor, entities::PurchaseSummary,
    errors::CsvEncodingFailed,
};

/// Flat CSV of a finalized purchase: one row per item, grouped like the
/// receipt, followed by a grand total row.
pub(crate) struct CsvSummaryPrinter;

impl CsvSummaryPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print(&self, summary: &PurchaseSummary) -> Result<String, ServerError> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record(["categoria", "item", "quantidade", "preco_unitario", "subtotal"])
            .map_err(|e| CsvEncodingFailed::with_debug("header", &e))?;
        for group in SummaryProcessor::new(&summary.items).process() {
            for item in &group.items {
                writer
                    .write_record([
                        group.category.label().to_string(),
                        item.name.clone(),
                        item.quantity.to_string(),
                        format!("{:.2}", item.price),
                        format!("{:.2}", item.subtotal()),
                    ])
                    .map_err(|e| CsvEncodingFailed::with_debug("row", &e))?;
            }
        }
        writer
            .write_record([
                "TOTAL".to_string(),
                String::new(),
                summary.items.len().to_string(),
                String::new(),
                format!("{:.2}", summary.total),
            ])
            .map_err(|e| CsvEncodingFailed::with_debug("total", &e))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| CsvEncodingFailed::with_debug("flush", e.error()))?;
        String::from_utf8(bytes).map_err(|e| CsvEncodingFailed::with_debug("utf-8", &e))
    }
}

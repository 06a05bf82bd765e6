use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;
use iso_currency::Currency;
use tokio::fs;

use crate::{
    entities::PurchaseSummary,
    errors::ExportWriteFailed,
    presentation::{csv_summary_printer::CsvSummaryPrinter, receipt_printer::ReceiptPrinter},
};

/// Where a successful export left its documents.
#[derive(Debug, PartialEq, Clone)]
pub struct ExportedFiles {
    pub receipt: PathBuf,
    pub csv: PathBuf,
}

#[async_trait]
pub trait ExportUsecase: Send + Sync {
    /// Writes the receipt and CSV for `summary`. Either both documents are in
    /// place afterwards, or neither is.
    async fn export(
        &self,
        summary: &PurchaseSummary,
        date: NaiveDate,
    ) -> Result<ExportedFiles, ServerError>;
}

pub(crate) struct ExportUsecaseImpl {
    export_dir: PathBuf,
    receipt_file_name: String,
    csv_file_name: String,
    currency: Currency,
}

impl ExportUsecaseImpl {
    pub(crate) fn new(
        export_dir: PathBuf,
        receipt_file_name: String,
        csv_file_name: String,
        currency: Currency,
    ) -> Self {
        Self {
            export_dir,
            receipt_file_name,
            csv_file_name,
            currency,
        }
    }
}

#[async_trait]
impl ExportUsecase for ExportUsecaseImpl {
    async fn export(
        &self,
        summary: &PurchaseSummary,
        date: NaiveDate,
    ) -> Result<ExportedFiles, ServerError> {
        let printer = ReceiptPrinter::new(self.currency);
        let receipt = printer.render_text(&printer.print(summary, date));
        let csv = CsvSummaryPrinter::new().print(summary)?;

        let receipt_path = self.export_dir.join(&self.receipt_file_name);
        let csv_path = self.export_dir.join(&self.csv_file_name);
        write_documents(&self.export_dir, [(&receipt_path, &receipt), (&csv_path, &csv)])
            .await
            .map_err(|(path, e)| {
                log::error!("export to {} failed: {}", path.display(), e);
                ExportWriteFailed::with_debug(&path.to_string_lossy().to_string(), &e)
            })?;

        log::debug!(
            "exported {} items to {} and {}",
            summary.item_count(),
            receipt_path.display(),
            csv_path.display()
        );
        Ok(ExportedFiles {
            receipt: receipt_path,
            csv: csv_path,
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Stages every document next to its destination, then moves them all into
/// place. On failure, everything written by this call is removed.
async fn write_documents<const N: usize>(
    dir: &Path,
    documents: [(&PathBuf, &String); N],
) -> Result<(), (PathBuf, io::Error)> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| (dir.to_path_buf(), e))?;

    let mut failure = None;
    let mut published: Vec<&PathBuf> = Vec::new();
    for (path, contents) in documents {
        if let Err(e) = fs::write(staging_path(path), contents).await {
            failure = Some((path.clone(), e));
            break;
        }
    }
    if failure.is_none() {
        for (path, _) in documents {
            match fs::rename(staging_path(path), path).await {
                Ok(()) => published.push(path),
                Err(e) => {
                    failure = Some((path.clone(), e));
                    break;
                }
            }
        }
    }

    match failure {
        None => Ok(()),
        Some(failure) => {
            for (path, _) in documents {
                let _ = fs::remove_file(staging_path(path)).await;
            }
            for path in published {
                let _ = fs::remove_file(path).await;
            }
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::entities::{Category, ShoppingItem};

    fn summary() -> PurchaseSummary {
        let items = vec![ShoppingItem::new("Café", 18.9, 2.0, Category::Mercearia).unwrap()];
        PurchaseSummary {
            total: 37.8,
            items,
            finalized_at: Utc::now(),
        }
    }

    fn usecase(dir: PathBuf) -> ExportUsecaseImpl {
        ExportUsecaseImpl::new(
            dir,
            "nota-compra.txt".to_string(),
            "nota-compra.csv".to_string(),
            Currency::BRL,
        )
    }

    #[tokio::test]
    async fn writes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let files = usecase(dir.path().join("exports"))
            .export(&summary(), NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
            .await
            .unwrap();

        let receipt = std::fs::read_to_string(&files.receipt).unwrap();
        assert!(receipt.contains("MERCADO"));
        assert!(receipt.contains("03/02/2025"));
        assert!(receipt.contains("TOTAL GERAL: R$ 37,80"));
        assert!(receipt.contains("1 item comprados"));
        let csv = std::fs::read_to_string(&files.csv).unwrap();
        assert!(csv.starts_with("categoria,item"));
        assert!(!staging_path(&files.receipt).exists());
    }

    #[tokio::test]
    async fn failed_export_leaves_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the export directory should be.
        let blocker = dir.path().join("exports");
        std::fs::write(&blocker, "x").unwrap();

        let result = usecase(blocker.clone())
            .export(&summary(), NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
            .await;

        assert!(result.is_err());
        assert!(!blocker.join("nota-compra.txt").exists());
    }
}

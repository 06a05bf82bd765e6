use std::{fs, path::PathBuf};

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::errors::{InvalidIsoCurrencyCode, InvalidRon, ReadError};

/// Session settings, read from RON. Every field is optional:
///
/// ```ron
/// (
///     storage_dir: "/home/ana/.mercado",
///     currency: "BRL",
///     scroll_shortcut_threshold: 10,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize)]
#[serde(default)]
pub struct ShoppingConfig {
    /// Directory holding one file per stored collection.
    pub storage_dir: PathBuf,
    /// Directory export documents are written to.
    pub export_dir: PathBuf,
    pub export_file_name: String,
    pub export_csv_file_name: String,
    /// ISO 4217 code.
    pub currency: String,
    /// The scroll shortcut shows once the total item count exceeds this.
    pub scroll_shortcut_threshold: usize,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".mercado"),
            export_dir: PathBuf::from("."),
            export_file_name: "nota-compra.txt".to_string(),
            export_csv_file_name: "nota-compra.csv".to_string(),
            currency: "BRL".to_string(),
            scroll_shortcut_threshold: 10,
        }
    }
}

impl ShoppingConfig {
    pub fn from_ron(s: &str) -> Result<Self, ServerError> {
        let config: ShoppingConfig =
            ron::from_str(s).map_err(|e| InvalidRon::with_debug("ShoppingConfig", &e))?;
        config.currency()?;
        Ok(config)
    }

    pub fn from_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        Self::from_ron(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }

    pub fn currency(&self) -> Result<Currency, ServerError> {
        Currency::from_code(self.currency.trim())
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&self.currency))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ShoppingConfig::from_ron("(scroll_shortcut_threshold: 3)").unwrap();
        assert_eq!(config.scroll_shortcut_threshold, 3);
        assert_eq!(config.currency, "BRL");
        assert_eq!(config.export_file_name, "nota-compra.txt");
        assert_eq!(config.storage_dir, PathBuf::from(".mercado"));
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(ShoppingConfig::from_ron("(currency: \"XYZ\")").is_err());
        assert!(ShoppingConfig::from_ron("not ron").is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mercado.ron");
        fs::write(&path, "(currency: \"USD\", export_dir: \"out\")").unwrap();
        let config = ShoppingConfig::from_file(&path).unwrap();
        assert_eq!(config.currency().unwrap(), Currency::USD);
        assert_eq!(config.export_dir, PathBuf::from("out"));
        assert!(ShoppingConfig::from_file(dir.path().join("missing.ron")).is_err());
    }
}

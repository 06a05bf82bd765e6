use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::{category::Category, shopping_item::ShoppingItem};

/// Frozen copy of the cart taken when the purchase was finalized.
#[derive(Debug, PartialEq, Clone)]
pub struct PurchaseSummary {
    pub(crate) items: Vec<ShoppingItem>,
    pub(crate) total: f64,
    pub(crate) finalized_at: DateTime<Utc>,
}

impl PurchaseSummary {
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn finalized_at(&self) -> DateTime<Utc> {
        self.finalized_at
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Items of one category within a summary, with their combined subtotal.
#[derive(Debug, PartialEq, Clone)]
pub struct CategoryGroup {
    pub category: Category,
    pub subtotal: f64,
    /// Percentage of the largest group's subtotal (the largest group is 100).
    pub share_of_max: f64,
    pub items: Vec<ShoppingItem>,
}

/// State of the export affordance while reviewing a summary.
#[derive(Debug, PartialEq, Clone, Default)]
pub enum ExportStatus {
    #[default]
    Idle,
    Generating,
    Exported(PathBuf),
    Failed,
}

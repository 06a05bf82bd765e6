use crate::domain::logic::utils::{normalize_name, sanitize_amount};

use super::{category::Category, item_id::ItemId, reminder::Reminder};

/// A priced, quantified, categorized cart entry.
///
/// Price and quantity are never negative, NaN or infinite. The subtotal is
/// always derived, never stored.
#[derive(Debug, PartialEq, Clone)]
pub struct ShoppingItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) price: f64,
    pub(crate) quantity: f64,
    pub(crate) category: Category,
}

/// Partial in-place edit of a cart entry. Absent fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ShoppingItemUpdate {
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub category: Option<Category>,
}

impl ShoppingItem {
    /// Manual entry: requires a non-blank name and strictly positive price and
    /// quantity.
    pub fn new(name: &str, price: f64, quantity: f64, category: Category) -> Option<Self> {
        let name = normalize_name(name)?;
        if !(price.is_finite() && price > 0.0 && quantity.is_finite() && quantity > 0.0) {
            return None;
        }
        Some(ShoppingItem {
            id: ItemId::generate(),
            name,
            price,
            quantity,
            category,
        })
    }

    /// Copies the reminder's name into a fresh, unpriced entry.
    pub fn from_reminder(reminder: &Reminder) -> Self {
        ShoppingItem {
            id: ItemId::generate(),
            name: reminder.name.clone(),
            price: 0.0,
            quantity: 1.0,
            category: Category::default(),
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity
    }

    pub(crate) fn apply(&mut self, update: ShoppingItemUpdate) {
        if let Some(price) = update.price {
            self.price = sanitize_amount(price);
        }
        if let Some(quantity) = update.quantity {
            self.quantity = sanitize_amount(quantity);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }
}

use crate::domain::logic::utils::normalize_name;

use super::item_id::ItemId;

/// Entry of the master "don't forget" list, independent from the cart.
#[derive(Debug, PartialEq, Clone)]
pub struct ChecklistItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) completed: bool,
}

impl ChecklistItem {
    pub fn new(name: &str) -> Option<Self> {
        normalize_name(name).map(|name| ChecklistItem {
            id: ItemId::generate(),
            name,
            completed: false,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Case-insensitive name comparison, the uniqueness key of the checklist.
    pub(crate) fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

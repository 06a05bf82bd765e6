use crate::domain::logic::utils::normalize_name;

use super::item_id::ItemId;

/// A named intent to buy something, not yet priced.
#[derive(Debug, PartialEq, Clone)]
pub struct Reminder {
    pub(crate) id: ItemId,
    pub(crate) name: String,
}

impl Reminder {
    /// Returns `None` when the name is blank after trimming.
    pub fn new(name: &str) -> Option<Self> {
        normalize_name(name).map(|name| Reminder {
            id: ItemId::generate(),
            name,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the rename was applied.
    pub(crate) fn rename(&mut self, name: &str) -> bool {
        match normalize_name(name) {
            Some(name) => {
                self.name = name;
                true
            }
            None => false,
        }
    }
}

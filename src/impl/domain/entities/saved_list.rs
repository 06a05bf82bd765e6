use chrono::{DateTime, Utc};

use crate::domain::logic::utils::normalize_name;

use super::item_id::ItemId;

/// A reusable named template of item names.
#[derive(Debug, PartialEq, Clone)]
pub struct SavedList {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) items: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl SavedList {
    /// Blank item names are dropped. Returns `None` for a blank list name or
    /// when no item survives.
    pub fn new<S: AsRef<str>>(name: &str, items: &[S], created_at: DateTime<Utc>) -> Option<Self> {
        let (name, items) = normalize_contents(name, items)?;
        Some(SavedList {
            id: ItemId::generate(),
            name,
            items,
            created_at,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces name and items; identity and creation time are kept. Returns
    /// whether the edit was applied.
    pub(crate) fn replace_contents<S: AsRef<str>>(&mut self, name: &str, items: &[S]) -> bool {
        match normalize_contents(name, items) {
            Some((name, items)) => {
                self.name = name;
                self.items = items;
                true
            }
            None => false,
        }
    }
}

fn normalize_contents<S: AsRef<str>>(name: &str, items: &[S]) -> Option<(String, Vec<String>)> {
    let name = normalize_name(name)?;
    let items: Vec<String> = items
        .iter()
        .filter_map(|i| normalize_name(i.as_ref()))
        .collect();
    if items.is_empty() {
        return None;
    }
    Some((name, items))
}

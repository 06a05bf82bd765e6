use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{
    domain::logic::utils::normalize_name,
    entities::{ChecklistItem, ItemId},
};

use super::{collection_model::CollectionModel, lenient_value_model::LenientStringModel};

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ChecklistItemModel {
    #[serde(default)]
    id: LenientStringModel,
    #[serde(default)]
    name: LenientStringModel,
    #[serde(default)]
    completed: Option<bool>,
}

impl CollectionModel for ChecklistItemModel {
    type Entity = ChecklistItem;

    const KEY: &'static str = "checklistItems";

    fn into_entity(self, _now: DateTime<Utc>) -> Option<ChecklistItem> {
        let name = normalize_name(self.name.0.as_deref().unwrap_or(""))?;
        Some(ChecklistItem {
            id: self.id.into_id(),
            name,
            completed: self.completed.unwrap_or(false),
        })
    }

    fn to_value(entity: &ChecklistItem) -> Value {
        json!({
            "id": entity.id.as_str(),
            "name": entity.name,
            "completed": entity.completed,
        })
    }

    fn id_mut(entity: &mut ChecklistItem) -> &mut ItemId {
        &mut entity.id
    }
}

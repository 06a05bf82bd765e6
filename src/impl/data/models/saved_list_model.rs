use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::{
    domain::logic::utils::normalize_name,
    entities::{ItemId, SavedList},
};

use super::{
    collection_model::CollectionModel,
    lenient_value_model::{LenientStringModel, TimestampModel},
};

#[derive(Debug, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SavedListModel {
    #[serde(default)]
    id: LenientStringModel,
    #[serde(default)]
    name: LenientStringModel,
    #[serde(default)]
    items: Vec<LenientStringModel>,
    #[serde(default)]
    created_at: TimestampModel,
}

impl CollectionModel for SavedListModel {
    type Entity = SavedList;

    const KEY: &'static str = "savedLists";

    fn into_entity(self, now: DateTime<Utc>) -> Option<SavedList> {
        let name = normalize_name(self.name.0.as_deref().unwrap_or(""))?;
        let items: Vec<String> = self
            .items
            .into_iter()
            .filter_map(|i| i.0.as_deref().and_then(normalize_name))
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(SavedList {
            id: self.id.into_id(),
            name,
            items,
            created_at: self.created_at.0.unwrap_or(now),
        })
    }

    fn to_value(entity: &SavedList) -> Value {
        json!({
            "id": entity.id.as_str(),
            "name": entity.name,
            "items": entity.items,
            "createdAt": entity.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    fn id_mut(entity: &mut SavedList) -> &mut ItemId {
        &mut entity.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn missing_or_invalid_created_at_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let model: SavedListModel =
            serde_json::from_str(r#"{"id":"l1","name":"Básica","items":["Arroz"],"createdAt":"?"}"#)
                .unwrap();
        assert_eq!(model.into_entity(now).unwrap().created_at, now);
    }

    #[test]
    fn created_at_survives_a_save_load_cycle() {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let list = SavedList::new("Mensal", &["Café"], created).unwrap();
        let value = SavedListModel::to_value(&list);
        let model: SavedListModel = serde_json::from_value(value).unwrap();
        assert_eq!(model.into_entity(Utc::now()).unwrap(), list);
    }

    #[test]
    fn list_without_usable_items_is_dropped() {
        let model: SavedListModel =
            serde_json::from_str(r#"{"id":"l1","name":"Vazia","items":["", 3]}"#).unwrap();
        // The numeric entry is stringified and kept.
        assert_eq!(model.into_entity(Utc::now()).unwrap().items, vec!["3".to_string()]);
        let model: SavedListModel =
            serde_json::from_str(r#"{"id":"l1","name":"Vazia","items":[" "]}"#).unwrap();
        assert!(model.into_entity(Utc::now()).is_none());
    }
}

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{
    domain::logic::utils::normalize_name,
    entities::{ItemId, Reminder},
};

use super::{collection_model::CollectionModel, lenient_value_model::LenientStringModel};

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ReminderModel {
    #[serde(default)]
    id: LenientStringModel,
    #[serde(default)]
    name: LenientStringModel,
}

impl CollectionModel for ReminderModel {
    type Entity = Reminder;

    const KEY: &'static str = "reminders";

    fn into_entity(self, _now: DateTime<Utc>) -> Option<Reminder> {
        let name = normalize_name(self.name.0.as_deref().unwrap_or(""))?;
        Some(Reminder {
            id: self.id.into_id(),
            name,
        })
    }

    fn to_value(entity: &Reminder) -> Value {
        json!({
            "id": entity.id.as_str(),
            "name": entity.name,
        })
    }

    fn id_mut(entity: &mut Reminder) -> &mut ItemId {
        &mut entity.id
    }
}

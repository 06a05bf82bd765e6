use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entities::ItemId;

/// Persisted shape of one entity collection, stored as a JSON array under
/// `KEY`.
///
/// Deserialization must accept every shape older versions of the application
/// wrote; `into_entity` fills in whatever those versions lacked.
pub(crate) trait CollectionModel: DeserializeOwned {
    type Entity;

    const KEY: &'static str;

    /// `None` when the record cannot be salvaged (ex. blank name).
    fn into_entity(self, now: DateTime<Utc>) -> Option<Self::Entity>;

    fn to_value(entity: &Self::Entity) -> Value;

    fn id_mut(entity: &mut Self::Entity) -> &mut ItemId;
}

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{
    domain::logic::utils::normalize_name,
    entities::{Category, ItemId, ShoppingItem},
};

use super::{
    collection_model::CollectionModel,
    lenient_value_model::{LenientAmountModel, LenientStringModel},
};

/// Known record shapes:
///
/// - v1: `{ id, name, price, quantity }`
/// - v2: v1 + `category`
///
/// Records written by hand or by buggy builds may lack any field.
#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ShoppingItemModel {
    #[serde(default)]
    id: LenientStringModel,
    #[serde(default)]
    name: LenientStringModel,
    #[serde(default)]
    price: LenientAmountModel,
    #[serde(default)]
    quantity: LenientAmountModel,
    #[serde(default)]
    category: LenientStringModel,
}

impl ShoppingItemModel {
    fn schema_version(&self) -> u8 {
        if self.category.0.is_some() {
            2
        } else {
            1
        }
    }
}

impl CollectionModel for ShoppingItemModel {
    type Entity = ShoppingItem;

    const KEY: &'static str = "shoppingItems";

    fn into_entity(self, _now: DateTime<Utc>) -> Option<ShoppingItem> {
        if self.schema_version() < 2 {
            log::debug!("upgrading v1 shopping item {:?}: category defaults to Outros", self.id.0);
        }
        let name = normalize_name(self.name.0.as_deref().unwrap_or(""))?;
        Some(ShoppingItem {
            id: self.id.into_id(),
            name,
            price: self.price.into(),
            quantity: self.quantity.into(),
            category: Category::from_label_or_default(self.category.0.as_deref()),
        })
    }

    fn to_value(entity: &ShoppingItem) -> Value {
        json!({
            "id": entity.id.as_str(),
            "name": entity.name,
            "price": entity.price,
            "quantity": entity.quantity,
            "category": entity.category.label(),
        })
    }

    fn id_mut(entity: &mut ShoppingItem) -> &mut ItemId {
        &mut entity.id
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn legacy_record_gets_defaults() {
        let model: ShoppingItemModel = serde_json::from_str(r#"{"id":"x","name":"Pão"}"#).unwrap();
        assert_eq!(model.schema_version(), 1);
        let item = model.into_entity(Utc::now()).unwrap();
        assert_eq!(
            item,
            ShoppingItem {
                id: ItemId::from("x"),
                name: "Pão".to_string(),
                price: 0.0,
                quantity: 0.0,
                category: Category::Outros,
            }
        );
    }

    #[test]
    fn unknown_category_falls_back_to_outros() {
        let model: ShoppingItemModel = serde_json::from_str(
            r#"{"id":"a","name":"Sabão","price":"4.5","quantity":2,"category":"Pets"}"#,
        )
        .unwrap();
        let item = model.into_entity(Utc::now()).unwrap();
        assert_eq!(item.category, Category::Outros);
        assert_eq!(item.price, 4.5);
        assert_eq!(item.quantity, 2.0);
    }

    #[test]
    fn nameless_record_is_dropped() {
        let model: ShoppingItemModel = serde_json::from_str(r#"{"id":"a","price":3}"#).unwrap();
        assert!(model.into_entity(Utc::now()).is_none());
    }
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    data::{
        datasources::key_value_datasource::{
            FileKeyValueDatasourceImpl, KeyValueDatasource, MemoryKeyValueDatasourceImpl,
        },
        models::{
            budget_model::{BudgetModel, BUDGET_KEY},
            checklist_item_model::ChecklistItemModel,
            collection_model::CollectionModel,
            reminder_model::ReminderModel,
            saved_list_model::SavedListModel,
            shopping_item_model::ShoppingItemModel,
        },
    },
    domain::repositories::session_repository::SessionRepository,
    entities::{Budget, ChecklistItem, ItemId, Reminder, SavedList, ShoppingItem},
};

pub struct SessionRepositoryImpl<DS: KeyValueDatasource> {
    datasource: DS,
}

impl<DS: KeyValueDatasource> SessionRepositoryImpl<DS> {
    pub fn with_datasource(datasource: DS) -> Self {
        Self { datasource }
    }

    pub fn datasource(&self) -> &DS {
        &self.datasource
    }

    fn load_collection<M: CollectionModel>(&self, now: DateTime<Utc>) -> Vec<M::Entity> {
        let raw = match self.datasource.get(M::KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("could not read '{}', starting empty: {}", M::KEY, e);
                return Vec::new();
            }
        };
        let records = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => records,
            Ok(other) => {
                log::warn!(
                    "stored '{}' is not an array (found {}), starting empty",
                    M::KEY,
                    json_kind(&other)
                );
                return Vec::new();
            }
            Err(e) => {
                log::warn!("stored '{}' is not valid JSON, starting empty: {}", M::KEY, e);
                return Vec::new();
            }
        };
        let total = records.len();
        let mut entities: Vec<M::Entity> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match serde_json::from_value::<M>(record) {
                Ok(model) => {
                    let entity = model.into_entity(now);
                    if entity.is_none() {
                        log::warn!("dropping unusable '{}' record at index {}", M::KEY, i);
                    }
                    entity
                }
                Err(e) => {
                    log::warn!("dropping malformed '{}' record at index {}: {}", M::KEY, i, e);
                    None
                }
            })
            .collect();

        // Ids must be unique within a collection.
        let mut seen = HashSet::new();
        for entity in entities.iter_mut() {
            let id = M::id_mut(entity);
            if !seen.insert(id.clone()) {
                let fresh = ItemId::generate();
                log::warn!("duplicate '{}' id '{}', reassigned to '{}'", M::KEY, id, fresh);
                seen.insert(fresh.clone());
                *id = fresh;
            }
        }
        log::debug!("loaded {}/{} '{}' records", entities.len(), total, M::KEY);
        entities
    }

    fn save_collection<M: CollectionModel>(&self, entities: &[M::Entity]) {
        let value = Value::Array(entities.iter().map(M::to_value).collect());
        self.write(M::KEY, &value.to_string());
    }

    fn write(&self, key: &str, raw: &str) {
        if let Err(e) = self.datasource.set(key, raw) {
            log::error!("could not persist '{}', keeping in-memory state: {}", key, e);
        }
    }
}

impl SessionRepositoryImpl<FileKeyValueDatasourceImpl> {
    pub fn new<P: AsRef<std::path::Path>>(storage_dir: P) -> Self {
        Self::with_datasource(FileKeyValueDatasourceImpl::new(storage_dir))
    }
}

impl SessionRepositoryImpl<MemoryKeyValueDatasourceImpl> {
    pub fn in_memory() -> Self {
        Self::with_datasource(MemoryKeyValueDatasourceImpl::new())
    }
}

impl<DS: KeyValueDatasource> SessionRepository for SessionRepositoryImpl<DS> {
    fn load_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.load_collection::<ReminderModel>(now)
    }

    fn load_shopping_items(&self, now: DateTime<Utc>) -> Vec<ShoppingItem> {
        self.load_collection::<ShoppingItemModel>(now)
    }

    fn load_saved_lists(&self, now: DateTime<Utc>) -> Vec<SavedList> {
        self.load_collection::<SavedListModel>(now)
    }

    fn load_checklist_items(&self, now: DateTime<Utc>) -> Vec<ChecklistItem> {
        let mut names = HashSet::new();
        self.load_collection::<ChecklistItemModel>(now)
            .into_iter()
            .filter(|item| {
                let unique = names.insert(item.name().trim().to_lowercase());
                if !unique {
                    log::warn!("dropping duplicate checklist entry '{}'", item.name());
                }
                unique
            })
            .collect()
    }

    fn load_budget(&self) -> Budget {
        match self.datasource.get(BUDGET_KEY) {
            Ok(Some(raw)) => match raw.parse::<BudgetModel>() {
                Ok(model) => model.into(),
                Err(e) => {
                    log::warn!("stored budget '{}' is not a number, leaving unset: {}", raw, e);
                    Budget::unset()
                }
            },
            Ok(None) => Budget::unset(),
            Err(e) => {
                log::warn!("could not read budget, leaving unset: {}", e);
                Budget::unset()
            }
        }
    }

    fn save_reminders(&self, reminders: &[Reminder]) {
        self.save_collection::<ReminderModel>(reminders);
    }

    fn save_shopping_items(&self, items: &[ShoppingItem]) {
        self.save_collection::<ShoppingItemModel>(items);
    }

    fn save_saved_lists(&self, lists: &[SavedList]) {
        self.save_collection::<SavedListModel>(lists);
    }

    fn save_checklist_items(&self, items: &[ChecklistItem]) {
        self.save_collection::<ChecklistItemModel>(items);
    }

    fn save_budget(&self, budget: Budget) {
        self.write(BUDGET_KEY, &BudgetModel::from(budget).to_stored());
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use fractic_server_error::ServerError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        entities::Category,
        errors::StorageWriteError,
    };

    fn repo_with(values: &[(&str, &str)]) -> SessionRepositoryImpl<MemoryKeyValueDatasourceImpl> {
        SessionRepositoryImpl::with_datasource(MemoryKeyValueDatasourceImpl::with_values(
            values.iter().copied(),
        ))
    }

    #[test]
    fn legacy_shopping_items_are_normalized() {
        let repo = repo_with(&[("shoppingItems", r#"[{"id":"x","name":"Pão"}]"#)]);
        let items = repo.load_shopping_items(Utc::now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), &ItemId::from("x"));
        assert_eq!(items[0].name(), "Pão");
        assert_eq!(items[0].price(), 0.0);
        assert_eq!(items[0].quantity(), 0.0);
        assert_eq!(items[0].category(), Category::Outros);
    }

    #[test]
    fn malformed_values_load_as_empty() {
        let repo = repo_with(&[
            ("reminders", "{not json"),
            ("shoppingItems", r#"{"id":"x"}"#),
            ("savedLists", "42"),
            ("budget", "muito"),
        ]);
        let state = repo.load_state(Utc::now());
        assert!(state.reminders().is_empty());
        assert!(state.shopping_items().is_empty());
        assert!(state.saved_lists().is_empty());
        assert!(!state.budget().is_set());
    }

    #[test]
    fn bad_records_are_skipped_individually() {
        let repo = repo_with(&[(
            "reminders",
            r#"[{"id":"a","name":"Leite"}, 7, {"id":"b"}, {"id":"c","name":" Pão "}]"#,
        )]);
        let reminders = repo.load_reminders(Utc::now());
        let names: Vec<&str> = reminders.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Leite", "Pão"]);
    }

    #[test]
    fn saved_state_loads_back_identically() {
        let repo = SessionRepositoryImpl::in_memory();
        let now = Utc::now();
        let reminders = vec![Reminder::new("Leite").unwrap()];
        let items = vec![ShoppingItem::new("Maçã", 2.5, 4.0, Category::Frutas).unwrap()];
        repo.save_reminders(&reminders);
        repo.save_shopping_items(&items);
        repo.save_budget(Budget::new(200.0));

        assert_eq!(repo.load_reminders(now), reminders);
        assert_eq!(repo.load_shopping_items(now), items);
        assert_eq!(repo.load_budget(), Budget::new(200.0));
        assert_eq!(
            repo.datasource().get("budget").unwrap(),
            Some("200".to_string())
        );
    }

    #[test]
    fn checklist_names_stay_unique_ignoring_case() {
        let repo = repo_with(&[(
            "checklistItems",
            r#"[{"id":"a","name":"Leite"},{"id":"b","name":"LEITE","completed":true},{"id":"c","name":"Café"}]"#,
        )]);
        let items = repo.load_checklist_items(Utc::now());
        let ids: Vec<&str> = items.iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(!items[0].completed());
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let repo = repo_with(&[(
            "reminders",
            r#"[{"id":"a","name":"Leite"},{"id":"a","name":"Pão"},{"id":"b","name":"Ovos"}]"#,
        )]);
        let reminders = repo.load_reminders(Utc::now());
        assert_eq!(reminders.len(), 3);
        assert_eq!(reminders[0].id(), &ItemId::from("a"));
        assert_eq!(reminders[1].name(), "Pão");
        assert_ne!(reminders[1].id(), &ItemId::from("a"));
        assert_ne!(reminders[1].id(), &ItemId::from("b"));
        assert_eq!(reminders[2].id(), &ItemId::from("b"));
    }

    struct FailingDatasource;

    impl KeyValueDatasource for FailingDatasource {
        fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
            Err(crate::errors::StorageReadError::new(key))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), ServerError> {
            Err(StorageWriteError::new(key))
        }
    }

    #[test]
    fn storage_failures_degrade_without_panicking() {
        let repo = SessionRepositoryImpl::with_datasource(FailingDatasource);
        let state = repo.load_state(Utc::now());
        assert_eq!(state, Default::default());
        repo.save_reminders(&[Reminder::new("Leite").unwrap()]);
        repo.save_budget(Budget::new(10.0));
    }
}

use chrono::Utc;
use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::{
    config::ShoppingConfig,
    data::{
        datasources::key_value_datasource::{
            FileKeyValueDatasourceImpl, MemoryKeyValueDatasourceImpl,
        },
        repositories::session_repository_impl::SessionRepositoryImpl,
    },
    domain::{
        logic::{metrics, transitions::TransitionEngine, utils::parse_amount_input},
        repositories::session_repository::SessionRepository,
        usecases::export_usecase::{ExportUsecase as _, ExportUsecaseImpl, ExportedFiles},
    },
    entities::{
        Budget, BudgetOverview, Category, CategoryGroup, Changes, ExportStatus, ItemId,
        SessionPhase, SessionState, ShoppingItem, ShoppingItemUpdate,
    },
    errors::NothingToExport,
    presentation::utils::format_money,
};

/// The shopping-list application session.
///
/// Owns the in-memory state and writes every changed collection back to the
/// repository right after each operation. Operations that receive invalid
/// input change nothing and return `false`.
pub struct ShoppingSession<R = SessionRepositoryImpl<FileKeyValueDatasourceImpl>>
where
    R: SessionRepository,
{
    state: SessionState,
    repository: R,
    export_usecase: ExportUsecaseImpl,
    currency: Currency,
    scroll_shortcut_threshold: usize,
}

impl ShoppingSession<SessionRepositoryImpl<FileKeyValueDatasourceImpl>> {
    /// Loads the session stored under `config.storage_dir`.
    pub fn open(config: ShoppingConfig) -> Result<Self, ServerError> {
        let repository = SessionRepositoryImpl::new(&config.storage_dir);
        Self::with_repository(repository, config)
    }
}

impl ShoppingSession<SessionRepositoryImpl<MemoryKeyValueDatasourceImpl>> {
    pub fn in_memory(config: ShoppingConfig) -> Result<Self, ServerError> {
        Self::with_repository(SessionRepositoryImpl::in_memory(), config)
    }
}

impl<R: SessionRepository> ShoppingSession<R> {
    pub fn with_repository(repository: R, config: ShoppingConfig) -> Result<Self, ServerError> {
        let currency = config.currency()?;
        let state = repository.load_state(Utc::now());
        Ok(Self {
            state,
            repository,
            export_usecase: ExportUsecaseImpl::new(
                config.export_dir,
                config.export_file_name,
                config.export_csv_file_name,
                currency,
            ),
            currency,
            scroll_shortcut_threshold: config.scroll_shortcut_threshold,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn apply<F>(&mut self, transition: F) -> bool
    where
        F: FnOnce(TransitionEngine) -> Changes,
    {
        let changes = transition(TransitionEngine::new(&mut self.state));
        self.repository.save_changes(&self.state, changes);
        !changes.is_empty()
    }

    // Reminders.
    // ---

    pub fn add_reminder(&mut self, name: &str) -> bool {
        self.apply(|t| t.add_reminder(name))
    }

    pub fn rename_reminder(&mut self, id: &ItemId, name: &str) -> bool {
        self.apply(|t| t.rename_reminder(id, name))
    }

    pub fn remove_reminder(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.remove_reminder(id))
    }

    pub fn promote_reminder(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.promote_reminder(id))
    }

    // Cart.
    // ---

    pub fn add_shopping_item(
        &mut self,
        name: &str,
        price: f64,
        quantity: f64,
        category: Category,
    ) -> bool {
        let item = ShoppingItem::new(name, price, quantity, category);
        self.apply(|t| t.add_shopping_item(item))
    }

    pub fn update_shopping_item(&mut self, id: &ItemId, update: ShoppingItemUpdate) -> bool {
        self.apply(|t| t.update_shopping_item(id, update))
    }

    pub fn remove_shopping_item(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.remove_shopping_item(id))
    }

    pub fn clear_shopping_items(&mut self) -> bool {
        self.apply(|t| t.clear_shopping_items())
    }

    // Budget.
    // ---

    /// Zero or invalid amounts clear the budget.
    pub fn set_budget(&mut self, amount: f64) {
        self.apply(|t| t.set_budget(Budget::new(amount)));
    }

    /// Same as [`Self::set_budget`], from the raw text the user typed
    /// (ex. "R$ 250,00").
    pub fn set_budget_input(&mut self, input: &str) {
        self.set_budget(parse_amount_input(input));
    }

    // Saved lists.
    // ---

    pub fn create_saved_list<S: AsRef<str>>(&mut self, name: &str, items: &[S]) -> bool {
        let now = Utc::now();
        self.apply(|t| t.create_saved_list(name, items, now))
    }

    pub fn edit_saved_list<S: AsRef<str>>(&mut self, id: &ItemId, name: &str, items: &[S]) -> bool {
        self.apply(|t| t.edit_saved_list(id, name, items))
    }

    pub fn delete_saved_list(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.delete_saved_list(id))
    }

    pub fn expand_saved_list(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.expand_saved_list(id))
    }

    // Checklist.
    // ---

    pub fn add_checklist_item(&mut self, name: &str) -> bool {
        self.apply(|t| t.add_checklist_item(name))
    }

    pub fn toggle_checklist_item(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.toggle_checklist_item(id))
    }

    pub fn remove_checklist_item(&mut self, id: &ItemId) -> bool {
        self.apply(|t| t.remove_checklist_item(id))
    }

    pub fn clear_checklist(&mut self) -> bool {
        self.apply(|t| t.clear_checklist())
    }

    pub fn reset_checklist(&mut self) -> bool {
        self.apply(|t| t.reset_checklist())
    }

    // Purchase lifecycle.
    // ---

    pub fn finalize_purchase(&mut self) -> bool {
        TransitionEngine::new(&mut self.state).finalize_purchase(Utc::now())
    }

    pub fn back_to_list(&mut self) -> bool {
        TransitionEngine::new(&mut self.state).back_to_list()
    }

    pub fn new_purchase(&mut self) -> bool {
        self.apply(|t| t.new_purchase())
    }

    /// Writes the receipt and CSV of the summary under review. On failure the
    /// export status becomes `Failed` and the export can be retried.
    pub async fn export_summary(&mut self) -> Result<ExportedFiles, ServerError> {
        let summary = match &mut self.state.phase {
            SessionPhase::SummaryReview {
                summary,
                export_status,
            } => {
                *export_status = ExportStatus::Generating;
                summary.clone()
            }
            SessionPhase::Browsing => return Err(NothingToExport::new()),
        };

        let result = self
            .export_usecase
            .export(&summary, Utc::now().date_naive())
            .await;

        if let SessionPhase::SummaryReview { export_status, .. } = &mut self.state.phase {
            *export_status = match &result {
                Ok(files) => ExportStatus::Exported(files.receipt.clone()),
                Err(_) => ExportStatus::Failed,
            };
        }
        result
    }

    // Derived values.
    // ---

    pub fn total_spent(&self) -> f64 {
        metrics::total_spent(&self.state.shopping_items)
    }

    pub fn budget_overview(&self) -> BudgetOverview {
        metrics::budget_overview(&self.state.shopping_items, self.state.budget)
    }

    /// Category totals of the live cart.
    pub fn category_breakdown(&self) -> Vec<CategoryGroup> {
        metrics::category_breakdown(&self.state.shopping_items)
    }

    /// Category totals of the summary under review, if any.
    pub fn summary_breakdown(&self) -> Option<Vec<CategoryGroup>> {
        self.state
            .summary()
            .map(|s| metrics::category_breakdown(&s.items))
    }

    pub fn total_item_count(&self) -> usize {
        metrics::total_item_count(&self.state)
    }

    pub fn show_scroll_shortcut(&self) -> bool {
        metrics::show_scroll_shortcut(&self.state, self.scroll_shortcut_threshold)
    }

    pub fn format_money(&self, amount: f64) -> String {
        format_money(amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::BudgetStatus;

    fn config_in(dir: &std::path::Path) -> ShoppingConfig {
        ShoppingConfig {
            storage_dir: dir.join("storage"),
            export_dir: dir.join("exports"),
            ..Default::default()
        }
    }

    #[test]
    fn state_survives_reopening_the_session() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = ShoppingSession::open(config_in(dir.path())).unwrap();
            session.add_reminder("Leite");
            session.add_shopping_item("Arroz", 25.0, 1.0, Category::Mercearia);
            session.create_saved_list("Básica", &["Arroz", "Feijão"]);
            session.add_checklist_item("Café");
            session.set_budget_input("R$ 100,00");
        }

        let session = ShoppingSession::open(config_in(dir.path())).unwrap();
        let state = session.state();
        assert_eq!(state.reminders()[0].name(), "Leite");
        assert_eq!(state.shopping_items()[0].name(), "Arroz");
        assert_eq!(state.saved_lists()[0].items().len(), 2);
        assert_eq!(state.checklist_items()[0].name(), "Café");
        assert_eq!(state.budget().amount(), Some(100.0));
        assert_eq!(session.total_item_count(), 4);
    }

    #[test]
    fn promotion_is_persisted_for_both_collections() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = ShoppingSession::open(config_in(dir.path())).unwrap();
        session.add_reminder("Leite");
        let id = session.state().reminders()[0].id().clone();
        assert!(session.promote_reminder(&id));

        let reopened = ShoppingSession::open(config_in(dir.path())).unwrap();
        assert!(reopened.state().reminders().is_empty());
        assert_eq!(reopened.state().shopping_items().len(), 1);
        assert_eq!(reopened.state().shopping_items()[0].category(), Category::Outros);
    }

    #[test]
    fn budget_overview_tracks_cart_edits() {
        let mut session = ShoppingSession::in_memory(ShoppingConfig::default()).unwrap();
        session.set_budget(100.0);
        session.add_shopping_item("Carne", 40.0, 2.0, Category::Carnes);
        assert_eq!(session.budget_overview().status, Some(BudgetStatus::Attention));

        let id = session.state().shopping_items()[0].id().clone();
        session.update_shopping_item(
            &id,
            ShoppingItemUpdate {
                quantity: Some(3.0),
                ..Default::default()
            },
        );
        let overview = session.budget_overview();
        assert_eq!(overview.percentage, 120.0);
        assert_eq!(overview.progress, 100.0);
        assert_eq!(overview.status, Some(BudgetStatus::OverBudget));
        assert_eq!(session.format_money(session.total_spent()), "R$ 120,00");

        session.set_budget_input("abc");
        assert!(!session.state().budget().is_set());
    }

    #[test]
    fn scroll_shortcut_appears_past_threshold() {
        let config = ShoppingConfig {
            scroll_shortcut_threshold: 2,
            ..Default::default()
        };
        let mut session = ShoppingSession::in_memory(config).unwrap();
        session.add_reminder("A");
        session.add_reminder("B");
        assert!(!session.show_scroll_shortcut());
        session.add_reminder("C");
        assert!(session.show_scroll_shortcut());
    }

    #[tokio::test]
    async fn finalize_export_and_start_new_purchase() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = ShoppingSession::open(config_in(dir.path())).unwrap();
        assert!(session.export_summary().await.is_err());
        assert!(!session.finalize_purchase());

        session.add_shopping_item("Maçã", 3.0, 2.0, Category::Frutas);
        session.add_shopping_item("Pão", 5.0, 1.0, Category::Padaria);
        assert!(session.finalize_purchase());

        let breakdown = session.summary_breakdown().unwrap();
        assert_eq!(breakdown[0].category, Category::Frutas);

        let files = session.export_summary().await.unwrap();
        assert!(files.receipt.exists());
        assert!(matches!(
            session.state().phase(),
            SessionPhase::SummaryReview {
                export_status: ExportStatus::Exported(_),
                ..
            }
        ));

        assert!(session.new_purchase());
        assert!(session.state().shopping_items().is_empty());
        assert_eq!(session.state().phase(), &SessionPhase::Browsing);

        let reopened = ShoppingSession::open(config_in(dir.path())).unwrap();
        assert!(reopened.state().shopping_items().is_empty());
    }

    #[tokio::test]
    async fn failed_export_can_be_retried() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("exports");
        std::fs::write(&blocker, "x").unwrap();

        let mut session = ShoppingSession::in_memory(config_in(dir.path())).unwrap();
        session.add_shopping_item("Pão", 5.0, 1.0, Category::Padaria);
        session.finalize_purchase();

        assert!(session.export_summary().await.is_err());
        assert!(matches!(
            session.state().phase(),
            SessionPhase::SummaryReview {
                export_status: ExportStatus::Failed,
                ..
            }
        ));

        std::fs::remove_file(&blocker).unwrap();
        assert!(session.export_summary().await.is_ok());
    }
}

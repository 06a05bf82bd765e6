use chrono::{DateTime, Utc};

use crate::entities::{
    Budget, Changes, ChecklistItem, Reminder, SavedList, SessionState, ShoppingItem,
};

/// Durable storage of the session collections.
///
/// Loading never fails: unreadable or malformed data yields an empty (or
/// default) collection. Saving never fails either: write errors are reported
/// through logging only, and the in-memory state stays authoritative.
pub trait SessionRepository {
    fn load_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder>;
    fn load_shopping_items(&self, now: DateTime<Utc>) -> Vec<ShoppingItem>;
    fn load_saved_lists(&self, now: DateTime<Utc>) -> Vec<SavedList>;
    fn load_checklist_items(&self, now: DateTime<Utc>) -> Vec<ChecklistItem>;
    fn load_budget(&self) -> Budget;

    fn save_reminders(&self, reminders: &[Reminder]);
    fn save_shopping_items(&self, items: &[ShoppingItem]);
    fn save_saved_lists(&self, lists: &[SavedList]);
    fn save_checklist_items(&self, items: &[ChecklistItem]);
    fn save_budget(&self, budget: Budget);

    fn load_state(&self, now: DateTime<Utc>) -> SessionState {
        SessionState {
            reminders: self.load_reminders(now),
            shopping_items: self.load_shopping_items(now),
            saved_lists: self.load_saved_lists(now),
            budget: self.load_budget(),
            checklist_items: self.load_checklist_items(now),
            phase: Default::default(),
        }
    }

    /// Writes every collection flagged in `changes`, in full.
    fn save_changes(&self, state: &SessionState, changes: Changes) {
        if changes.reminders {
            self.save_reminders(&state.reminders);
        }
        if changes.shopping_items {
            self.save_shopping_items(&state.shopping_items);
        }
        if changes.saved_lists {
            self.save_saved_lists(&state.saved_lists);
        }
        if changes.budget {
            self.save_budget(state.budget);
        }
        if changes.checklist_items {
            self.save_checklist_items(&state.checklist_items);
        }
    }
}

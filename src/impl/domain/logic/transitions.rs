use chrono::{DateTime, Utc};

use crate::{
    domain::logic::metrics::total_spent,
    entities::{
        Budget, Changes, ChecklistItem, ExportStatus, ItemId, PurchaseSummary, Reminder,
        SavedList, SessionPhase, SessionState, ShoppingItem, ShoppingItemUpdate,
    },
};

/// Applies user intents to the session state. Every operation is total:
/// invalid input leaves the state untouched and reports no changes. The
/// returned [`Changes`] tells the caller which collections to persist.
pub(crate) struct TransitionEngine<'a> {
    state: &'a mut SessionState,
}

impl<'a> TransitionEngine<'a> {
    pub(crate) fn new(state: &'a mut SessionState) -> Self {
        Self { state }
    }

    // Reminders.
    // ---

    pub(crate) fn add_reminder(self, name: &str) -> Changes {
        match Reminder::new(name) {
            Some(reminder) => {
                self.state.reminders.insert(0, reminder);
                Changes::reminders()
            }
            None => Changes::none(),
        }
    }

    pub(crate) fn rename_reminder(self, id: &ItemId, name: &str) -> Changes {
        match self.state.reminders.iter_mut().find(|r| &r.id == id) {
            Some(reminder) => {
                if reminder.rename(name) {
                    Changes::reminders()
                } else {
                    Changes::none()
                }
            }
            None => Changes::none(),
        }
    }

    pub(crate) fn remove_reminder(self, id: &ItemId) -> Changes {
        let before = self.state.reminders.len();
        self.state.reminders.retain(|r| &r.id != id);
        if self.state.reminders.len() != before {
            Changes::reminders()
        } else {
            Changes::none()
        }
    }

    /// Moves a reminder into the cart: the reminder is removed in the same
    /// step the new entry is appended.
    pub(crate) fn promote_reminder(self, id: &ItemId) -> Changes {
        let Some(index) = self.state.reminders.iter().position(|r| &r.id == id) else {
            return Changes::none();
        };
        let reminder = self.state.reminders.remove(index);
        let item = ShoppingItem::from_reminder(&reminder);
        let checklist_changed = complete_checklist_entry(self.state, &item.name);
        self.state.shopping_items.push(item);
        Changes::reminders()
            .union(Changes::shopping_items())
            .union(checklist_changed)
    }

    // Cart.
    // ---

    pub(crate) fn add_shopping_item(self, item: Option<ShoppingItem>) -> Changes {
        let Some(item) = item else {
            return Changes::none();
        };
        let checklist_changed = complete_checklist_entry(self.state, &item.name);
        self.state.shopping_items.push(item);
        Changes::shopping_items().union(checklist_changed)
    }

    pub(crate) fn update_shopping_item(self, id: &ItemId, update: ShoppingItemUpdate) -> Changes {
        match self.state.shopping_items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.apply(update);
                Changes::shopping_items()
            }
            None => Changes::none(),
        }
    }

    pub(crate) fn remove_shopping_item(self, id: &ItemId) -> Changes {
        let before = self.state.shopping_items.len();
        self.state.shopping_items.retain(|i| &i.id != id);
        if self.state.shopping_items.len() != before {
            Changes::shopping_items()
        } else {
            Changes::none()
        }
    }

    pub(crate) fn clear_shopping_items(self) -> Changes {
        if self.state.shopping_items.is_empty() {
            return Changes::none();
        }
        self.state.shopping_items.clear();
        Changes::shopping_items()
    }

    // Budget.
    // ---

    pub(crate) fn set_budget(self, budget: Budget) -> Changes {
        self.state.budget = budget;
        Changes::budget()
    }

    // Saved lists.
    // ---

    pub(crate) fn create_saved_list<S: AsRef<str>>(
        self,
        name: &str,
        items: &[S],
        now: DateTime<Utc>,
    ) -> Changes {
        match SavedList::new(name, items, now) {
            Some(list) => {
                self.state.saved_lists.insert(0, list);
                Changes::saved_lists()
            }
            None => Changes::none(),
        }
    }

    pub(crate) fn edit_saved_list<S: AsRef<str>>(
        self,
        id: &ItemId,
        name: &str,
        items: &[S],
    ) -> Changes {
        match self.state.saved_lists.iter_mut().find(|l| &l.id == id) {
            Some(list) => {
                if list.replace_contents(name, items) {
                    Changes::saved_lists()
                } else {
                    Changes::none()
                }
            }
            None => Changes::none(),
        }
    }

    pub(crate) fn delete_saved_list(self, id: &ItemId) -> Changes {
        let before = self.state.saved_lists.len();
        self.state.saved_lists.retain(|l| &l.id != id);
        if self.state.saved_lists.len() != before {
            Changes::saved_lists()
        } else {
            Changes::none()
        }
    }

    /// Prepends one new reminder per list entry, in list order. The list is
    /// left as is so it can be reused; no dedup against existing reminders.
    pub(crate) fn expand_saved_list(self, id: &ItemId) -> Changes {
        let Some(list) = self.state.saved_lists.iter().find(|l| &l.id == id) else {
            return Changes::none();
        };
        let batch: Vec<Reminder> = list
            .items
            .iter()
            .filter_map(|name| Reminder::new(name))
            .collect();
        if batch.is_empty() {
            return Changes::none();
        }
        self.state.reminders.splice(0..0, batch);
        Changes::reminders()
    }

    // Checklist.
    // ---

    /// No-op when an entry with the same name (ignoring case) exists.
    pub(crate) fn add_checklist_item(self, name: &str) -> Changes {
        let Some(entry) = ChecklistItem::new(name) else {
            return Changes::none();
        };
        if self
            .state
            .checklist_items
            .iter()
            .any(|c| c.matches_name(&entry.name))
        {
            return Changes::none();
        }
        self.state.checklist_items.push(entry);
        Changes::checklist_items()
    }

    pub(crate) fn toggle_checklist_item(self, id: &ItemId) -> Changes {
        match self.state.checklist_items.iter_mut().find(|c| &c.id == id) {
            Some(entry) => {
                entry.completed = !entry.completed;
                Changes::checklist_items()
            }
            None => Changes::none(),
        }
    }

    pub(crate) fn remove_checklist_item(self, id: &ItemId) -> Changes {
        let before = self.state.checklist_items.len();
        self.state.checklist_items.retain(|c| &c.id != id);
        if self.state.checklist_items.len() != before {
            Changes::checklist_items()
        } else {
            Changes::none()
        }
    }

    pub(crate) fn clear_checklist(self) -> Changes {
        if self.state.checklist_items.is_empty() {
            return Changes::none();
        }
        self.state.checklist_items.clear();
        Changes::checklist_items()
    }

    /// Marks every entry as pending, keeping the entries.
    pub(crate) fn reset_checklist(self) -> Changes {
        let mut changed = false;
        for entry in self.state.checklist_items.iter_mut().filter(|c| c.completed) {
            entry.completed = false;
            changed = true;
        }
        if changed {
            Changes::checklist_items()
        } else {
            Changes::none()
        }
    }

    // Purchase lifecycle.
    // ---

    /// Enters summary review with a by-value snapshot of the cart. Does nothing
    /// when the cart is empty or a summary is already under review. The live
    /// cart is not touched.
    pub(crate) fn finalize_purchase(self, now: DateTime<Utc>) -> bool {
        if self.state.shopping_items.is_empty()
            || matches!(self.state.phase, SessionPhase::SummaryReview { .. })
        {
            return false;
        }
        let items = self.state.shopping_items.clone();
        let total = total_spent(&items);
        self.state.phase = SessionPhase::SummaryReview {
            summary: PurchaseSummary {
                items,
                total,
                finalized_at: now,
            },
            export_status: ExportStatus::Idle,
        };
        true
    }

    /// Leaves summary review without clearing the cart.
    pub(crate) fn back_to_list(self) -> bool {
        if matches!(self.state.phase, SessionPhase::Browsing) {
            return false;
        }
        self.state.phase = SessionPhase::Browsing;
        true
    }

    /// Leaves summary review and empties the cart.
    pub(crate) fn new_purchase(self) -> Changes {
        if matches!(self.state.phase, SessionPhase::Browsing) {
            return Changes::none();
        }
        self.state.phase = SessionPhase::Browsing;
        self.state.shopping_items.clear();
        Changes::shopping_items()
    }
}

fn complete_checklist_entry(state: &mut SessionState, name: &str) -> Changes {
    let mut changed = false;
    for entry in state
        .checklist_items
        .iter_mut()
        .filter(|c| !c.completed && c.matches_name(name))
    {
        entry.completed = true;
        changed = true;
    }
    if changed {
        Changes::checklist_items()
    } else {
        Changes::none()
    }
}

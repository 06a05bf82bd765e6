use super::{
    budget::Budget,
    checklist_item::ChecklistItem,
    purchase_summary::{ExportStatus, PurchaseSummary},
    reminder::Reminder,
    saved_list::SavedList,
    shopping_item::ShoppingItem,
};

#[derive(Debug, PartialEq, Clone, Default)]
pub enum SessionPhase {
    /// Editing reminders, cart, saved lists and budget.
    #[default]
    Browsing,
    /// Read-only view of a finalized purchase.
    SummaryReview {
        summary: PurchaseSummary,
        export_status: ExportStatus,
    },
}

/// Everything the application session owns. No entity is shared between
/// collections; transitions copy data into newly identified entities.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SessionState {
    pub(crate) reminders: Vec<Reminder>,
    pub(crate) shopping_items: Vec<ShoppingItem>,
    pub(crate) saved_lists: Vec<SavedList>,
    pub(crate) budget: Budget,
    pub(crate) checklist_items: Vec<ChecklistItem>,
    pub(crate) phase: SessionPhase,
}

impl SessionState {
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn shopping_items(&self) -> &[ShoppingItem] {
        &self.shopping_items
    }

    pub fn saved_lists(&self) -> &[SavedList] {
        &self.saved_lists
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn checklist_items(&self) -> &[ChecklistItem] {
        &self.checklist_items
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn summary(&self) -> Option<&PurchaseSummary> {
        match &self.phase {
            SessionPhase::SummaryReview { summary, .. } => Some(summary),
            SessionPhase::Browsing => None,
        }
    }
}

/// Which persisted collections an operation modified.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Changes {
    pub reminders: bool,
    pub shopping_items: bool,
    pub saved_lists: bool,
    pub budget: bool,
    pub checklist_items: bool,
}

impl Changes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn reminders() -> Self {
        Changes {
            reminders: true,
            ..Self::default()
        }
    }

    pub fn shopping_items() -> Self {
        Changes {
            shopping_items: true,
            ..Self::default()
        }
    }

    pub fn saved_lists() -> Self {
        Changes {
            saved_lists: true,
            ..Self::default()
        }
    }

    pub fn budget() -> Self {
        Changes {
            budget: true,
            ..Self::default()
        }
    }

    pub fn checklist_items() -> Self {
        Changes {
            checklist_items: true,
            ..Self::default()
        }
    }

    pub fn union(self, other: Changes) -> Self {
        Changes {
            reminders: self.reminders || other.reminders,
            shopping_items: self.shopping_items || other.shopping_items,
            saved_lists: self.saved_lists || other.saved_lists,
            budget: self.budget || other.budget,
            checklist_items: self.checklist_items || other.checklist_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Changes::none()
    }
}

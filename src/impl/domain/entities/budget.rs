use crate::domain::logic::utils::sanitize_amount;

/// Spending goal for the session. A zero or negative amount means "no budget".
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Budget(pub(crate) Option<f64>);

impl Budget {
    pub fn unset() -> Self {
        Budget(None)
    }

    pub fn new(amount: f64) -> Self {
        let amount = sanitize_amount(amount);
        if amount > 0.0 {
            Budget(Some(amount))
        } else {
            Budget(None)
        }
    }

    pub fn amount(&self) -> Option<f64> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

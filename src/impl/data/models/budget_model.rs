use std::str::FromStr;

use crate::entities::Budget;

pub(crate) const BUDGET_KEY: &str = "budget";

/// Budget stored as a bare decimal string. "0" means unset.
#[derive(Debug)]
pub(crate) struct BudgetModel(pub f64);

impl FromStr for BudgetModel {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate values that were JSON-encoded as strings.
        let raw = s.trim().trim_matches('"').trim();
        Ok(BudgetModel(raw.parse::<f64>()?))
    }
}

impl From<BudgetModel> for Budget {
    fn from(m: BudgetModel) -> Budget {
        Budget::new(m.0)
    }
}

impl From<Budget> for BudgetModel {
    fn from(b: Budget) -> BudgetModel {
        BudgetModel(b.amount().unwrap_or(0.0))
    }
}

impl BudgetModel {
    pub(crate) fn to_stored(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_quoted_decimals() {
        assert_eq!("150.5".parse::<BudgetModel>().unwrap().0, 150.5);
        assert_eq!("\"80\"".parse::<BudgetModel>().unwrap().0, 80.0);
        assert!("lots".parse::<BudgetModel>().is_err());
    }

    #[test]
    fn zero_is_unset() {
        let budget: Budget = "0".parse::<BudgetModel>().unwrap().into();
        assert!(!budget.is_set());
        assert_eq!(BudgetModel::from(Budget::unset()).to_stored(), "0");
        assert_eq!(BudgetModel::from(Budget::new(99.9)).to_stored(), "99.9");
    }
}

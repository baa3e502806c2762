//! Variable expense domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::ExpenseCategory;
use crate::constants::MIN_DESCRIPTION_LENGTH;
use crate::errors::{Error, Result};
use crate::utils::validate_amount;

/// A one-off purchase. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableExpense {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input model for recording a variable expense. `date` defaults to now.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVariableExpense {
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
}

impl NewVariableExpense {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount, "variable expense")?;
        if self.description.trim().chars().count() < MIN_DESCRIPTION_LENGTH {
            return Err(Error::invalid_input(format!(
                "Description must have at least {} characters",
                MIN_DESCRIPTION_LENGTH
            )));
        }
        Ok(())
    }
}

/// Per-category total of a list of variable expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub label: String,
    pub total: Decimal,
    pub count: usize,
}

//! Goals domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validate_amount;

/// Domain model representing a monthly savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_goal: Decimal,
    /// Only ever grows, through contributions.
    pub saved_amount: Decimal,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Saved amount as a percentage of the monthly target, capped at 100.
    pub fn progress(&self) -> Decimal {
        if self.monthly_goal <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        // Overflow only happens far past the target.
        self.saved_amount
            .checked_div(self.monthly_goal)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ONE_HUNDRED, |p| p.min(Decimal::ONE_HUNDRED))
    }

    pub fn is_achieved(&self) -> bool {
        self.saved_amount >= self.monthly_goal
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    pub monthly_goal: Decimal,
    pub month: u32,
    pub year: i32,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_target(self.monthly_goal)
    }
}

/// Editable goal fields. The saved amount is not one of them.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_goal: Decimal,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Goal ID is required for updates"));
        }
        validate_name(&self.name)?;
        validate_target(self.monthly_goal)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Goal name cannot be empty"));
    }
    Ok(())
}

fn validate_target(monthly_goal: Decimal) -> Result<()> {
    validate_amount(monthly_goal, "monthly goal")
}

/// Normalizes an optional free-text field: blank becomes `None`.
pub(crate) fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

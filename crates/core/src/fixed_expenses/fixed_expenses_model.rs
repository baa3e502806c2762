//! Fixed expense domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::ExpenseCategory;
use crate::errors::{Error, Result, ValidationError};

/// Payment state within the current billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Unpaid => "UNPAID",
        }
    }

    pub fn from_str_lossy(value: &str) -> Self {
        if value.eq_ignore_ascii_case("PAID") {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }
}

/// A recurring monthly obligation such as rent or a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub status: PaymentStatus,
    pub suggested_payment_day: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FixedExpense {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

/// Input model for creating a new fixed expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFixedExpense {
    pub name: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub suggested_payment_day: Option<u32>,
}

impl NewFixedExpense {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_amount(self.amount)?;
        if let Some(day) = self.suggested_payment_day {
            validate_day(day)?;
        }
        Ok(())
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedExpenseUpdate {
    pub id: String,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<ExpenseCategory>,
    pub suggested_payment_day: Option<u32>,
    pub status: Option<PaymentStatus>,
}

impl FixedExpenseUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input(
                "Fixed expense ID is required for updates",
            ));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(day) = self.suggested_payment_day {
            validate_day(day)?;
        }
        Ok(())
    }

    /// Applies the present fields onto `expense`.
    pub fn apply_to(self, expense: &mut FixedExpense) {
        if let Some(name) = self.name {
            expense.name = name.trim().to_string();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(day) = self.suggested_payment_day {
            expense.suggested_payment_day = day;
        }
        if let Some(status) = self.status {
            expense.status = status;
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Fixed expense name cannot be empty"));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    crate::utils::validate_amount(amount, "fixed expense")
}

fn validate_day(day: u32) -> Result<()> {
    if !(1..=31).contains(&day) {
        return Err(ValidationError::InvalidDayOfMonth(day).into());
    }
    Ok(())
}

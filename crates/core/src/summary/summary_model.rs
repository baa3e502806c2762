//! Derived dashboard shapes produced by the summary engine.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories::ExpenseCategory;
use crate::utils::MonthPeriod;

/// Upcoming fixed income.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPayment {
    pub day: u32,
    pub amount: Decimal,
    /// Every fixed-income day of the current month has passed; `day` refers
    /// to the following month.
    pub occurs_next_month: bool,
}

/// Balances, ratios and projections for one user and month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub period: MonthPeriod,
    pub is_current_month: bool,
    pub total_incomes: Decimal,
    pub paid_fixed_expenses: Decimal,
    pub unpaid_fixed_expenses: Decimal,
    pub total_fixed_expenses: Decimal,
    pub total_variable_expenses: Decimal,
    pub savings: Decimal,
    pub available_balance: Decimal,
    /// What is left for variable spending once unpaid bills are covered.
    pub variable_limit: Decimal,
    pub monthly_goal: Decimal,
    pub savings_progress: Decimal,
    pub savings_rate: Decimal,
    pub fixed_expenses_ratio: Decimal,
    pub remaining_days_in_month: u32,
    pub daily_spending_limit: Decimal,
    pub projected_savings: Decimal,
    pub next_payment: Option<NextPayment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: ExpenseCategory,
    pub label: String,
    pub fixed: Decimal,
    pub variable: Decimal,
    pub total: Decimal,
}

/// Totals compared month over month. `fixed_expenses` counts paid ones only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub incomes: Decimal,
    pub fixed_expenses: Decimal,
    pub variable_expenses: Decimal,
    pub savings: Decimal,
}

impl MonthTotals {
    pub fn has_activity(&self) -> bool {
        !self.incomes.is_zero()
            || !self.fixed_expenses.is_zero()
            || !self.variable_expenses.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub absolute: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparison {
    pub current_period: MonthPeriod,
    pub previous_period: MonthPeriod,
    pub current: MonthTotals,
    pub previous: MonthTotals,
    pub variable_expenses_variation: Variation,
    pub has_previous_month: bool,
}

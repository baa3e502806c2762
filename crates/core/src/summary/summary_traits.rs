use chrono::NaiveDate;

use super::summary_model::{CategoryBreakdown, FinancialSummary, MonthlyComparison};
use crate::errors::Result;
use crate::fixed_expenses::FixedExpense;
use crate::goals::Goal;
use crate::incomes::Income;
use crate::utils::DateRange;
use crate::variable_expenses::VariableExpense;

/// Typed reads the summary engine needs, scoped to one user.
pub trait RecordStoreTrait: Send + Sync {
    fn list_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>>;
    fn list_variable_expenses(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<VariableExpense>>;
    fn list_incomes(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Income>>;
    fn list_goals(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Goal>>;
}

/// Trait for the financial summary service
pub trait FinancialSummaryServiceTrait: Send + Sync {
    fn compute_summary(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<FinancialSummary>;
    fn get_expenses_by_category(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<CategoryBreakdown>>;
    fn get_monthly_comparison(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<MonthlyComparison>;
}

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::summary_calculator::{
    compare_months, compute_summary, expenses_by_category, month_totals, SummaryInput,
};
use super::summary_model::{CategoryBreakdown, FinancialSummary, MonthTotals, MonthlyComparison};
use super::summary_traits::{FinancialSummaryServiceTrait, RecordStoreTrait};
use crate::constants::DEFAULT_MONTHLY_GOAL;
use crate::errors::Result;
use crate::utils::MonthPeriod;

/// Fetches a user's records for a month and runs them through the calculator.
pub struct FinancialSummaryService {
    record_store: Arc<dyn RecordStoreTrait>,
    monthly_goal_fallback: Decimal,
}

impl FinancialSummaryService {
    pub fn new(record_store: Arc<dyn RecordStoreTrait>) -> Self {
        Self {
            record_store,
            monthly_goal_fallback: DEFAULT_MONTHLY_GOAL,
        }
    }

    /// Overrides the target used for periods without goals.
    pub fn with_monthly_goal_fallback(mut self, fallback: Decimal) -> Self {
        self.monthly_goal_fallback = fallback;
        self
    }

    fn totals_for(&self, user_id: &str, period: &MonthPeriod) -> Result<MonthTotals> {
        let incomes = self
            .record_store
            .list_incomes(user_id, period.month(), period.year())?;
        let fixed_expenses = self.record_store.list_fixed_expenses(user_id)?;
        let variable_expenses = self
            .record_store
            .list_variable_expenses(user_id, &period.date_range())?;
        Ok(month_totals(&incomes, &fixed_expenses, &variable_expenses))
    }
}

impl FinancialSummaryServiceTrait for FinancialSummaryService {
    fn compute_summary(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<FinancialSummary> {
        let period = MonthPeriod::new(month, year)?;
        debug!("Computing summary for {} as of {}", period, today);

        let fixed_expenses = self.record_store.list_fixed_expenses(user_id)?;
        let variable_expenses = self
            .record_store
            .list_variable_expenses(user_id, &period.date_range())?;
        let incomes = self.record_store.list_incomes(user_id, month, year)?;
        let goals = self.record_store.list_goals(user_id, month, year)?;

        let current = MonthPeriod::of_date(today);
        let current_incomes = if current == period {
            None
        } else {
            Some(
                self.record_store
                    .list_incomes(user_id, current.month(), current.year())?,
            )
        };

        Ok(compute_summary(&SummaryInput {
            period,
            today,
            incomes: &incomes,
            forecast_incomes: current_incomes.as_deref().unwrap_or(&incomes),
            fixed_expenses: &fixed_expenses,
            variable_expenses: &variable_expenses,
            goals: &goals,
            monthly_goal_fallback: self.monthly_goal_fallback,
        }))
    }

    fn get_expenses_by_category(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<CategoryBreakdown>> {
        let period = MonthPeriod::new(month, year)?;
        let fixed_expenses = self.record_store.list_fixed_expenses(user_id)?;
        let variable_expenses = self
            .record_store
            .list_variable_expenses(user_id, &period.date_range())?;
        Ok(expenses_by_category(&fixed_expenses, &variable_expenses))
    }

    fn get_monthly_comparison(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<MonthlyComparison> {
        let period = MonthPeriod::new(month, year)?;
        let current = self.totals_for(user_id, &period)?;
        let previous = self.totals_for(user_id, &period.previous())?;
        Ok(compare_months(period, current, previous))
    }
}

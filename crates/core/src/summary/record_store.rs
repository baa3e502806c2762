use std::sync::Arc;

use super::summary_traits::RecordStoreTrait;
use crate::errors::Result;
use crate::fixed_expenses::{FixedExpense, FixedExpenseRepositoryTrait};
use crate::goals::{Goal, GoalRepositoryTrait};
use crate::incomes::{Income, IncomeRepositoryTrait};
use crate::utils::DateRange;
use crate::variable_expenses::{VariableExpense, VariableExpenseRepositoryTrait};

/// Record store backed by the four record repositories.
pub struct RepositoryRecordStore {
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    fixed_expense_repository: Arc<dyn FixedExpenseRepositoryTrait>,
    variable_expense_repository: Arc<dyn VariableExpenseRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl RepositoryRecordStore {
    pub fn new(
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        fixed_expense_repository: Arc<dyn FixedExpenseRepositoryTrait>,
        variable_expense_repository: Arc<dyn VariableExpenseRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        Self {
            income_repository,
            fixed_expense_repository,
            variable_expense_repository,
            goal_repository,
        }
    }
}

impl RecordStoreTrait for RepositoryRecordStore {
    fn list_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>> {
        self.fixed_expense_repository.list_fixed_expenses(user_id)
    }

    fn list_variable_expenses(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<VariableExpense>> {
        self.variable_expense_repository
            .list_variable_expenses(user_id, range)
    }

    fn list_incomes(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Income>> {
        self.income_repository.list_incomes(user_id, month, year)
    }

    fn list_goals(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Goal>> {
        self.goal_repository.load_goals(user_id, month, year)
    }
}

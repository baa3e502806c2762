use async_trait::async_trait;

use crate::categories::ExpenseCategory;
use crate::errors::Result;
use crate::utils::DateRange;
use crate::variable_expenses::variable_expenses_model::{NewVariableExpense, VariableExpense};

/// Trait for variable expense repository operations
#[async_trait]
pub trait VariableExpenseRepositoryTrait: Send + Sync {
    /// Expenses whose date falls inside `range`, bounds included.
    fn list_variable_expenses(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<VariableExpense>>;
    async fn insert_variable_expense(&self, expense: VariableExpense) -> Result<VariableExpense>;
    async fn delete_variable_expense(&self, user_id: &str, expense_id: &str) -> Result<usize>;
}

/// Trait for variable expense service operations
#[async_trait]
pub trait VariableExpenseServiceTrait: Send + Sync {
    fn get_variable_expenses(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        category: Option<ExpenseCategory>,
    ) -> Result<Vec<VariableExpense>>;
    async fn create_variable_expense(
        &self,
        user_id: &str,
        new_expense: NewVariableExpense,
    ) -> Result<VariableExpense>;
    async fn delete_variable_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
}

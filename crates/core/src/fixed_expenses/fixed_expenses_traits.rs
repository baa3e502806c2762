use async_trait::async_trait;

use crate::errors::Result;
use crate::fixed_expenses::fixed_expenses_model::{
    FixedExpense, FixedExpenseUpdate, NewFixedExpense,
};

/// Trait for fixed expense repository operations
#[async_trait]
pub trait FixedExpenseRepositoryTrait: Send + Sync {
    fn get_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense>;
    fn list_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>>;
    async fn insert_fixed_expense(&self, expense: FixedExpense) -> Result<FixedExpense>;
    async fn update_fixed_expense(&self, expense: FixedExpense) -> Result<FixedExpense>;
    async fn delete_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<usize>;
    /// Flips every paid expense of the user back to unpaid, returning how many changed.
    async fn reset_statuses(&self, user_id: &str) -> Result<usize>;
}

/// Trait for fixed expense service operations
#[async_trait]
pub trait FixedExpenseServiceTrait: Send + Sync {
    fn get_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>>;
    async fn create_fixed_expense(
        &self,
        user_id: &str,
        new_expense: NewFixedExpense,
    ) -> Result<FixedExpense>;
    async fn update_fixed_expense(
        &self,
        user_id: &str,
        expense_update: FixedExpenseUpdate,
    ) -> Result<FixedExpense>;
    async fn mark_as_paid(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense>;
    async fn mark_as_unpaid(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense>;
    async fn delete_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
    async fn reset_statuses(&self, user_id: &str) -> Result<usize>;
}

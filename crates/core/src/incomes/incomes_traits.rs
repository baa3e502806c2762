use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::incomes::incomes_model::{Income, IncomeUpdate, NewIncome};

/// Trait for income repository operations
#[async_trait]
pub trait IncomeRepositoryTrait: Send + Sync {
    /// Loads one income. Incomes owned by another user are reported as not found.
    fn get_income(&self, user_id: &str, income_id: &str) -> Result<Income>;
    fn list_incomes(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Income>>;
    async fn insert_income(&self, income: Income) -> Result<Income>;
    async fn update_income(&self, income: Income) -> Result<Income>;
    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<usize>;
}

/// Trait for income service operations
#[async_trait]
pub trait IncomeServiceTrait: Send + Sync {
    fn get_incomes(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Income>>;
    fn total_for_period(&self, user_id: &str, month: u32, year: i32) -> Result<Decimal>;
    async fn create_income(&self, user_id: &str, new_income: NewIncome) -> Result<Income>;
    async fn update_income(&self, user_id: &str, income_update: IncomeUpdate) -> Result<Income>;
    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()>;
}

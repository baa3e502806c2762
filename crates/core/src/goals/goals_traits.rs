use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn load_goals(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Goal>>;
    async fn insert_new_goal(&self, goal: Goal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: Goal) -> Result<Goal>;
    /// Adds `amount` to the saved amount in a single write.
    async fn add_to_saved_amount(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
    ) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Goal>>;
    fn find_goals_by_name(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        query: &str,
    ) -> Result<Vec<Goal>>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn add_to_goal(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
}

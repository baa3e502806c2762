use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::goals_model::{clean_description, Goal, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::{validate_amount, MonthPeriod};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Goal>> {
        MonthPeriod::new(month, year)?;
        let mut goals = self.goal_repo.load_goals(user_id, month, year)?;
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    /// Case-insensitive substring match on the goal name. An exact match
    /// shadows partial ones so "Car" does not also pick "Car insurance".
    fn find_goals_by_name(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        query: &str,
    ) -> Result<Vec<Goal>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let matches: Vec<Goal> = self
            .get_goals(user_id, month, year)?
            .into_iter()
            .filter(|g| g.name.to_lowercase().contains(&needle))
            .collect();
        let exact: Vec<Goal> = matches
            .iter()
            .filter(|g| g.name.trim().to_lowercase() == needle)
            .cloned()
            .collect();
        Ok(if exact.is_empty() { matches } else { exact })
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        MonthPeriod::new(new_goal.month, new_goal.year)?;
        let now = Utc::now();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name.trim().to_string(),
            description: clean_description(new_goal.description),
            monthly_goal: new_goal.monthly_goal,
            saved_amount: Decimal::ZERO,
            month: new_goal.month,
            year: new_goal.year,
            created_at: now,
            updated_at: now,
        };
        self.goal_repo.insert_new_goal(goal).await
    }

    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        let mut goal = self.goal_repo.get_goal(user_id, &goal_update.id)?;
        goal.name = goal_update.name.trim().to_string();
        goal.description = clean_description(goal_update.description);
        goal.monthly_goal = goal_update.monthly_goal;
        goal.updated_at = Utc::now();
        self.goal_repo.update_goal(goal).await
    }

    async fn add_to_goal(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal> {
        validate_amount(amount, "goal contribution")?;
        debug!("Adding {} to goal {}", amount, goal_id);
        self.goal_repo
            .add_to_saved_amount(user_id, goal_id, amount)
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let deleted = self.goal_repo.delete_goal(user_id, goal_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        Ok(())
    }
}

//! Goal tools - create goals, list them and add money to them.

use rig::{completion::ToolDefinition, tool::Tool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wallet_core::errors::ErrorKind;
use wallet_core::goals::{Goal, NewGoal};
use wallet_core::utils::format::format_money;
use wallet_core::utils::MonthPeriod;

use super::constants::{MAX_GOALS, MAX_GOAL_CANDIDATES, MESSAGE_CURRENCY_SYMBOL};
use super::parsing::ensure_positive;
use crate::env::AssistantEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

/// Arguments for the create_goal tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalArgs {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub monthly_goal: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalOutput {
    pub success: bool,
    pub message: String,
    pub goal: Option<Goal>,
}

/// Arguments for the get_goals tool (no required args).
#[derive(Debug, Default, Deserialize)]
pub struct GetGoalsArgs {}

/// DTO for goal data in tool output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_goal: Decimal,
    pub saved_amount: Decimal,
    pub progress_percent: Decimal,
    pub is_achieved: bool,
}

impl From<&Goal> for GoalDto {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            description: goal.description.clone(),
            monthly_goal: goal.monthly_goal,
            saved_amount: goal.saved_amount,
            progress_percent: goal.progress(),
            is_achieved: goal.is_achieved(),
        }
    }
}

/// Output envelope for get_goals tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGoalsOutput {
    pub success: bool,
    pub goals: Vec<GoalDto>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_count: Option<usize>,
}

/// Arguments for the add_to_goal tool. One of `goal_id` or `goal_name`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToGoalArgs {
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub goal_name: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCandidate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToGoalOutput {
    pub success: bool,
    pub message: String,
    pub goal: Option<Goal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matching_goals: Vec<GoalCandidate>,
}

impl AddToGoalOutput {
    fn rejected(message: String, matching_goals: Vec<GoalCandidate>) -> Self {
        Self {
            success: false,
            message,
            goal: None,
            matching_goals,
        }
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

/// Tool to create a monthly savings goal in the current month.
pub struct CreateGoalTool<E: AssistantEnvironment> {
    env: Arc<E>,
    user_id: String,
}

impl<E: AssistantEnvironment> CreateGoalTool<E> {
    pub fn new(env: Arc<E>, user_id: String) -> Self {
        Self { env, user_id }
    }
}

impl<E: AssistantEnvironment> Clone for CreateGoalTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl<E: AssistantEnvironment + 'static> Tool for CreateGoalTool<E> {
    const NAME: &'static str = "create_goal";

    type Error = AiError;
    type Args = CreateGoalArgs;
    type Output = GoalOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Create a new financial goal (monthly savings goal) for the current month.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "description": { "type": "string" },
                    "monthlyGoal": { "type": "number", "exclusiveMinimum": 0 }
                },
                "required": ["name", "monthlyGoal"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        ensure_positive(args.monthly_goal, "monthlyGoal")?;
        let period = MonthPeriod::of_date(self.env.today());

        let goal = self
            .env
            .goal_service()
            .create_goal(
                &self.user_id,
                NewGoal {
                    name: args.name,
                    description: args.description,
                    monthly_goal: args.monthly_goal,
                    month: period.month(),
                    year: period.year(),
                },
            )
            .await?;

        Ok(GoalOutput {
            success: true,
            message: format!(
                "Goal '{}' created with a monthly target of {}.",
                goal.name,
                format_money(goal.monthly_goal, MESSAGE_CURRENCY_SYMBOL)
            ),
            goal: Some(goal),
        })
    }
}

/// Tool to list the current month's goals with progress.
pub struct GetGoalsTool<E: AssistantEnvironment> {
    env: Arc<E>,
    user_id: String,
}

impl<E: AssistantEnvironment> GetGoalsTool<E> {
    pub fn new(env: Arc<E>, user_id: String) -> Self {
        Self { env, user_id }
    }
}

impl<E: AssistantEnvironment> Clone for GetGoalsTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl<E: AssistantEnvironment + 'static> Tool for GetGoalsTool<E> {
    const NAME: &'static str = "get_goals";

    type Error = AiError;
    type Args = GetGoalsArgs;
    type Output = GetGoalsOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get all goals for the current month with saved amount and progress. Use this to find goals by name before adding money to them.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let period = MonthPeriod::of_date(self.env.today());
        let goals = self
            .env
            .goal_service()
            .get_goals(&self.user_id, period.month(), period.year())?;

        let original_count = goals.len();
        let dtos: Vec<GoalDto> = goals.iter().take(MAX_GOALS).map(GoalDto::from).collect();
        let truncated = original_count > dtos.len();

        Ok(GetGoalsOutput {
            success: true,
            count: dtos.len(),
            goals: dtos,
            truncated: truncated.then_some(true),
            original_count: truncated.then_some(original_count),
        })
    }
}

/// Tool to put money into a goal, located by id or by name.
pub struct AddToGoalTool<E: AssistantEnvironment> {
    env: Arc<E>,
    user_id: String,
}

impl<E: AssistantEnvironment> AddToGoalTool<E> {
    pub fn new(env: Arc<E>, user_id: String) -> Self {
        Self { env, user_id }
    }

    /// Pick the goal a name refers to, or explain why none was picked.
    fn resolve_by_name(&self, name: &str) -> Result<Result<Goal, AddToGoalOutput>, AiError> {
        let period = MonthPeriod::of_date(self.env.today());
        let mut matches = self.env.goal_service().find_goals_by_name(
            &self.user_id,
            period.month(),
            period.year(),
            name,
        )?;

        match matches.len() {
            0 => Ok(Err(AddToGoalOutput::rejected(
                format!(
                    "No goal found with the name '{}'. Ask the user for the correct goal name.",
                    name
                ),
                Vec::new(),
            ))),
            1 => Ok(Ok(matches.remove(0))),
            _ => {
                let candidates: Vec<GoalCandidate> = matches
                    .iter()
                    .take(MAX_GOAL_CANDIDATES)
                    .map(|g| GoalCandidate {
                        id: g.id.clone(),
                        name: g.name.clone(),
                        description: g.description.clone(),
                    })
                    .collect();
                let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
                Ok(Err(AddToGoalOutput::rejected(
                    format!(
                        "Multiple goals match '{}': {}. Ask the user which one they mean.",
                        name,
                        names.join(", ")
                    ),
                    candidates,
                )))
            }
        }
    }
}

impl<E: AssistantEnvironment> Clone for AddToGoalTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl<E: AssistantEnvironment + 'static> Tool for AddToGoalTool<E> {
    const NAME: &'static str = "add_to_goal";

    type Error = AiError;
    type Args = AddToGoalArgs;
    type Output = AddToGoalOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Add money to a goal. If goalId is provided it is used directly. Otherwise goalName is searched; if several goals match, the list is returned so the user can choose.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "goalId": { "type": "string" },
                    "goalName": { "type": "string" },
                    "amount": { "type": "number", "exclusiveMinimum": 0 }
                },
                "required": ["amount"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        ensure_positive(args.amount, "amount")?;
        let goal_id = args.goal_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let goal_name = args.goal_name.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let target_id = match (goal_id, goal_name) {
            (Some(id), _) => id.to_string(),
            (None, Some(name)) => match self.resolve_by_name(name)? {
                Ok(goal) => goal.id,
                Err(rejection) => return Ok(rejection),
            },
            (None, None) => {
                return Ok(AddToGoalOutput::rejected(
                    "A goal name or id is required. Ask the user which goal to add money to."
                        .to_string(),
                    Vec::new(),
                ))
            }
        };

        let goal = match self
            .env
            .goal_service()
            .add_to_goal(&self.user_id, &target_id, args.amount)
            .await
        {
            Ok(goal) => goal,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(AddToGoalOutput::rejected(
                    "No goal found with the given id.".to_string(),
                    Vec::new(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(AddToGoalOutput {
            success: true,
            message: format!(
                "Added {} to goal '{}'. Total saved: {}.",
                format_money(args.amount, MESSAGE_CURRENCY_SYMBOL),
                goal.name,
                format_money(goal.saved_amount, MESSAGE_CURRENCY_SYMBOL)
            ),
            goal: Some(goal),
            matching_goals: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::MockEnvironment;
    use rust_decimal_macros::dec;

    async fn seed(env: &Arc<MockEnvironment>, name: &str) -> Goal {
        CreateGoalTool::new(env.clone(), "u1".to_string())
            .call(CreateGoalArgs {
                name: name.to_string(),
                description: None,
                monthly_goal: dec!(1000),
            })
            .await
            .unwrap()
            .goal
            .unwrap()
    }

    fn add(goal_id: Option<&str>, goal_name: Option<&str>, amount: Decimal) -> AddToGoalArgs {
        AddToGoalArgs {
            goal_id: goal_id.map(str::to_string),
            goal_name: goal_name.map(str::to_string),
            amount,
        }
    }

    #[tokio::test]
    async fn test_create_goal_in_current_month() {
        let env = Arc::new(MockEnvironment::new());
        let goal = seed(&env, "Trip").await;
        assert_eq!((goal.month, goal.year), (6, 2024));
        assert_eq!(goal.saved_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_get_goals_reports_progress() {
        let env = Arc::new(MockEnvironment::new());
        let goal = seed(&env, "Trip").await;
        let tool = AddToGoalTool::new(env.clone(), "u1".to_string());
        tool.call(add(Some(&goal.id), None, dec!(250))).await.unwrap();

        let output = GetGoalsTool::new(env, "u1".to_string())
            .call(GetGoalsArgs {})
            .await
            .unwrap();
        assert_eq!(output.count, 1);
        assert_eq!(output.goals[0].saved_amount, dec!(250));
        assert_eq!(output.goals[0].progress_percent, dec!(25));
        assert!(output.truncated.is_none());
    }

    #[tokio::test]
    async fn test_add_to_goal_by_unique_name() {
        let env = Arc::new(MockEnvironment::new());
        seed(&env, "Emergency fund").await;
        let tool = AddToGoalTool::new(env, "u1".to_string());

        let output = tool
            .call(add(None, Some("emergency"), dec!(100)))
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(
            output.message,
            "Added R$ 100.00 to goal 'Emergency fund'. Total saved: R$ 100.00."
        );
    }

    #[tokio::test]
    async fn test_ambiguous_name_lists_candidates() {
        let env = Arc::new(MockEnvironment::new());
        seed(&env, "Car repair").await;
        seed(&env, "Car insurance").await;
        let tool = AddToGoalTool::new(env.clone(), "u1".to_string());

        let output = tool.call(add(None, Some("car"), dec!(50))).await.unwrap();
        assert!(!output.success);
        assert_eq!(output.matching_goals.len(), 2);
        assert!(env
            .store
            .goals
            .lock()
            .unwrap()
            .iter()
            .all(|g| g.saved_amount == Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_unknown_goal_is_unsuccessful_not_error() {
        let env = Arc::new(MockEnvironment::new());
        seed(&env, "Trip").await;
        let tool = AddToGoalTool::new(env, "u1".to_string());

        let by_name = tool.call(add(None, Some("house"), dec!(5))).await.unwrap();
        assert!(!by_name.success);
        assert!(by_name.matching_goals.is_empty());

        let by_id = tool.call(add(Some("missing"), None, dec!(5))).await.unwrap();
        assert!(!by_id.success);

        let neither = tool.call(add(None, Some("  "), dec!(5))).await.unwrap();
        assert!(!neither.success);
    }

    #[tokio::test]
    async fn test_other_users_goal_is_not_reachable() {
        let env = Arc::new(MockEnvironment::new());
        let goal = seed(&env, "Trip").await;
        let tool = AddToGoalTool::new(env, "u2".to_string());
        let output = tool.call(add(Some(&goal.id), None, dec!(5))).await.unwrap();
        assert!(!output.success);
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let env = Arc::new(MockEnvironment::new());
        let goal = seed(&env, "Trip").await;
        let tool = AddToGoalTool::new(env, "u1".to_string());
        let err = tool
            .call(add(Some(&goal.id), None, dec!(-1)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}

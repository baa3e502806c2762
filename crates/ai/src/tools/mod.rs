//! Assistant tools for recording financial data.
//!
//! This module provides tools that implement rig-core's Tool trait:
//! - CreateIncomeTool: Register a fixed or one-time income
//! - CreateFixedExpenseTool: Create a recurring monthly expense
//! - CreateVariableExpenseTool: Record a one-off expense
//! - CreateGoalTool: Create a monthly savings goal
//! - GetGoalsTool: List the current month's goals with progress
//! - AddToGoalTool: Add money to a goal found by id or name
//!
//! Every tool acts on behalf of a single user and reaches the record services
//! through the AssistantEnvironment trait.

pub mod constants;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod parsing;

// Re-export constants
pub use constants::*;

// Re-export tools
pub use expenses::{CreateFixedExpenseTool, CreateVariableExpenseTool};
pub use goals::{AddToGoalTool, CreateGoalTool, GetGoalsTool};
pub use incomes::CreateIncomeTool;

use rig::tool::Tool;
use std::sync::Arc;

use crate::env::AssistantEnvironment;

/// Container for all assistant tools, simplifying agent registration.
pub struct ToolSet<E: AssistantEnvironment> {
    pub create_income: CreateIncomeTool<E>,
    pub create_fixed_expense: CreateFixedExpenseTool<E>,
    pub create_variable_expense: CreateVariableExpenseTool<E>,
    pub create_goal: CreateGoalTool<E>,
    pub get_goals: GetGoalsTool<E>,
    pub add_to_goal: AddToGoalTool<E>,
}

impl<E: AssistantEnvironment> ToolSet<E> {
    /// Create a new tool set bound to `user_id`.
    pub fn new(env: Arc<E>, user_id: &str) -> Self {
        let user_id = user_id.to_string();
        Self {
            create_income: CreateIncomeTool::new(env.clone(), user_id.clone()),
            create_fixed_expense: CreateFixedExpenseTool::new(env.clone(), user_id.clone()),
            create_variable_expense: CreateVariableExpenseTool::new(env.clone(), user_id.clone()),
            create_goal: CreateGoalTool::new(env.clone(), user_id.clone()),
            get_goals: GetGoalsTool::new(env.clone(), user_id.clone()),
            add_to_goal: AddToGoalTool::new(env, user_id),
        }
    }
}

/// Names of every tool in the set, in registration order.
pub fn tool_names<E: AssistantEnvironment + 'static>() -> Vec<&'static str> {
    vec![
        CreateIncomeTool::<E>::NAME,
        CreateFixedExpenseTool::<E>::NAME,
        CreateVariableExpenseTool::<E>::NAME,
        CreateGoalTool::<E>::NAME,
        GetGoalsTool::<E>::NAME,
        AddToGoalTool::<E>::NAME,
    ]
}

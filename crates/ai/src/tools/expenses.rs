//! Expense tools - register fixed and variable expenses.

use rig::{completion::ToolDefinition, tool::Tool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wallet_core::fixed_expenses::{FixedExpense, NewFixedExpense};
use wallet_core::utils::format::format_money;
use wallet_core::variable_expenses::{NewVariableExpense, VariableExpense};

use super::constants::MESSAGE_CURRENCY_SYMBOL;
use super::parsing::{ensure_positive, parse_category, parse_date_or};
use crate::env::AssistantEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

/// Arguments for the create_fixed_expense tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFixedExpenseArgs {
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub suggested_payment_day: Option<u32>,
}

/// Arguments for the create_variable_expense tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariableExpenseArgs {
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Output envelope shared by both expense tools. Unsuccessful results carry a
/// message for the model to relay instead of failing the tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseOutput<T> {
    pub success: bool,
    pub message: String,
    pub expense: Option<T>,
}

impl<T> CreateExpenseOutput<T> {
    fn rejected(message: String) -> Self {
        Self {
            success: false,
            message,
            expense: None,
        }
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

/// Tool to create a recurring monthly expense.
pub struct CreateFixedExpenseTool<E: AssistantEnvironment> {
    env: Arc<E>,
    user_id: String,
}

impl<E: AssistantEnvironment> CreateFixedExpenseTool<E> {
    pub fn new(env: Arc<E>, user_id: String) -> Self {
        Self { env, user_id }
    }
}

impl<E: AssistantEnvironment> Clone for CreateFixedExpenseTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl<E: AssistantEnvironment + 'static> Tool for CreateFixedExpenseTool<E> {
    const NAME: &'static str = "create_fixed_expense";

    type Error = AiError;
    type Args = CreateFixedExpenseArgs;
    type Output = CreateExpenseOutput<FixedExpense>;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Create a new fixed expense (recurring monthly expense). Category is required. suggestedPaymentDay is the usual day of the month it is paid.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "amount": { "type": "number", "exclusiveMinimum": 0 },
                    "category": { "type": "string", "description": "Transport, Housing, Food, Health, Education, Leisure or Other" },
                    "suggestedPaymentDay": { "type": "integer", "minimum": 1, "maximum": 31 }
                },
                "required": ["name", "amount", "category"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        ensure_positive(args.amount, "amount")?;
        let category = match parse_category(&args.category) {
            Ok(category) => category,
            Err(message) => return Ok(CreateExpenseOutput::rejected(message)),
        };

        let expense = self
            .env
            .fixed_expense_service()
            .create_fixed_expense(
                &self.user_id,
                NewFixedExpense {
                    name: args.name,
                    amount: args.amount,
                    category,
                    suggested_payment_day: args.suggested_payment_day,
                },
            )
            .await?;

        Ok(CreateExpenseOutput {
            success: true,
            message: format!(
                "Fixed expense '{}' of {} created in category {}.",
                expense.name,
                format_money(expense.amount, MESSAGE_CURRENCY_SYMBOL),
                expense.category.label()
            ),
            expense: Some(expense),
        })
    }
}

/// Tool to record a one-off expense.
pub struct CreateVariableExpenseTool<E: AssistantEnvironment> {
    env: Arc<E>,
    user_id: String,
}

impl<E: AssistantEnvironment> CreateVariableExpenseTool<E> {
    pub fn new(env: Arc<E>, user_id: String) -> Self {
        Self { env, user_id }
    }
}

impl<E: AssistantEnvironment> Clone for CreateVariableExpenseTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl<E: AssistantEnvironment + 'static> Tool for CreateVariableExpenseTool<E> {
    const NAME: &'static str = "create_variable_expense";

    type Error = AiError;
    type Args = CreateVariableExpenseArgs;
    type Output = CreateExpenseOutput<VariableExpense>;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Create a new variable expense (one-time expense). Category is required. Date defaults to today if not provided.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "number", "exclusiveMinimum": 0 },
                    "category": { "type": "string", "description": "Transport, Housing, Food, Health, Education, Leisure or Other" },
                    "description": { "type": "string" },
                    "date": { "type": "string", "description": "ISO date; defaults to today" }
                },
                "required": ["amount", "category", "description"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        ensure_positive(args.amount, "amount")?;
        let category = match parse_category(&args.category) {
            Ok(category) => category,
            Err(message) => return Ok(CreateExpenseOutput::rejected(message)),
        };
        let date = parse_date_or(args.date.as_deref(), self.env.now());

        let expense = self
            .env
            .variable_expense_service()
            .create_variable_expense(
                &self.user_id,
                NewVariableExpense {
                    amount: args.amount,
                    category,
                    description: args.description,
                    date: Some(date),
                },
            )
            .await?;

        Ok(CreateExpenseOutput {
            success: true,
            message: format!(
                "Expense of {} recorded in category {}.",
                format_money(expense.amount, MESSAGE_CURRENCY_SYMBOL),
                expense.category.label()
            ),
            expense: Some(expense),
        })
    }
}

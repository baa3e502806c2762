//! Income tool - register incomes using rig-core Tool trait.

use chrono::Datelike;
use rig::{completion::ToolDefinition, tool::Tool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wallet_core::incomes::{Income, IncomeSchedule, NewIncome};
use wallet_core::utils::format::format_money;
use wallet_core::utils::MonthPeriod;

use super::constants::MESSAGE_CURRENCY_SYMBOL;
use super::parsing::{ensure_positive, parse_date_or};
use crate::env::AssistantEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeKind {
    Fixed,
    OneTime,
}

/// Arguments for the create_income tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncomeArgs {
    #[serde(rename = "type")]
    pub kind: IncomeKind,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncomeOutput {
    pub success: bool,
    pub message: String,
    pub income: Option<Income>,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to register a fixed or one-time income for the current user.
pub struct CreateIncomeTool<E: AssistantEnvironment> {
    env: Arc<E>,
    user_id: String,
}

impl<E: AssistantEnvironment> CreateIncomeTool<E> {
    pub fn new(env: Arc<E>, user_id: String) -> Self {
        Self { env, user_id }
    }
}

impl<E: AssistantEnvironment> Clone for CreateIncomeTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl<E: AssistantEnvironment + 'static> Tool for CreateIncomeTool<E> {
    const NAME: &'static str = "create_income";

    type Error = AiError;
    type Args = CreateIncomeArgs;
    type Output = CreateIncomeOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Create a new income entry. Can be fixed (recurring monthly) or one-time. For fixed incomes, provide dayOfMonth. For one-time, provide paymentDate (YYYY-MM-DD).".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": ["fixed", "oneTime"] },
                    "amount": { "type": "number", "exclusiveMinimum": 0 },
                    "paymentDate": { "type": "string", "description": "ISO date; defaults to today" },
                    "dayOfMonth": { "type": "integer", "minimum": 1, "maximum": 31 }
                },
                "required": ["type", "amount"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        ensure_positive(args.amount, "amount")?;
        let now = self.env.now();
        let payment_date = parse_date_or(args.payment_date.as_deref(), now);

        // Fixed incomes belong to the current month; one-time incomes to the
        // month of their payment date.
        let (schedule, period) = match args.kind {
            IncomeKind::Fixed => {
                let day_of_month = args.day_of_month.unwrap_or_else(|| payment_date.day());
                let current = MonthPeriod::of_date(self.env.today());
                (IncomeSchedule::Fixed { day_of_month }, Some(current))
            }
            IncomeKind::OneTime => (IncomeSchedule::OneTime { payment_date }, None),
        };

        let income = self
            .env
            .income_service()
            .create_income(
                &self.user_id,
                NewIncome {
                    schedule,
                    amount: args.amount,
                    month: period.map(|p| p.month()),
                    year: period.map(|p| p.year()),
                },
            )
            .await?;

        Ok(CreateIncomeOutput {
            success: true,
            message: format!(
                "Income of {} registered.",
                format_money(income.amount, MESSAGE_CURRENCY_SYMBOL)
            ),
            income: Some(income),
        })
    }
}

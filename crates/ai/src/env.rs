//! Environment abstraction for the assistant.
//!
//! This module provides the `AssistantEnvironment` trait that abstracts the
//! record services the tools write through and the chat history the agent
//! reads. The server implements it with the SQLite-backed services; tests use
//! the in-memory environment below.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use wallet_core::{
    chat::ChatHistoryServiceTrait, fixed_expenses::FixedExpenseServiceTrait,
    goals::GoalServiceTrait, incomes::IncomeServiceTrait,
    variable_expenses::VariableExpenseServiceTrait,
};

/// Environment abstraction for the assistant.
///
/// Implementations provide access to:
/// - Record services for incomes, fixed expenses, variable expenses and goals
/// - The per-user chat thread and its messages
/// - The clock used to resolve "today" and default dates
pub trait AssistantEnvironment: Send + Sync {
    fn income_service(&self) -> Arc<dyn IncomeServiceTrait>;

    fn fixed_expense_service(&self) -> Arc<dyn FixedExpenseServiceTrait>;

    fn variable_expense_service(&self) -> Arc<dyn VariableExpenseServiceTrait>;

    fn goal_service(&self) -> Arc<dyn GoalServiceTrait>;

    fn chat_history_service(&self) -> Arc<dyn ChatHistoryServiceTrait>;

    /// Current instant. Tools use it for default dates and the current period.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

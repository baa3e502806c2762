//! Server-side assistant environment backed by the SQLite services.

use std::sync::Arc;

use wallet_ai::AssistantEnvironment;
use wallet_core::{
    chat::ChatHistoryServiceTrait, fixed_expenses::FixedExpenseServiceTrait,
    goals::GoalServiceTrait, incomes::IncomeServiceTrait,
    variable_expenses::VariableExpenseServiceTrait,
};

pub struct ServerAssistantEnvironment {
    income_service: Arc<dyn IncomeServiceTrait>,
    fixed_expense_service: Arc<dyn FixedExpenseServiceTrait>,
    variable_expense_service: Arc<dyn VariableExpenseServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    chat_history_service: Arc<dyn ChatHistoryServiceTrait>,
}

impl ServerAssistantEnvironment {
    pub fn new(
        income_service: Arc<dyn IncomeServiceTrait>,
        fixed_expense_service: Arc<dyn FixedExpenseServiceTrait>,
        variable_expense_service: Arc<dyn VariableExpenseServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        chat_history_service: Arc<dyn ChatHistoryServiceTrait>,
    ) -> Self {
        Self {
            income_service,
            fixed_expense_service,
            variable_expense_service,
            goal_service,
            chat_history_service,
        }
    }
}

impl AssistantEnvironment for ServerAssistantEnvironment {
    fn income_service(&self) -> Arc<dyn IncomeServiceTrait> {
        self.income_service.clone()
    }

    fn fixed_expense_service(&self) -> Arc<dyn FixedExpenseServiceTrait> {
        self.fixed_expense_service.clone()
    }

    fn variable_expense_service(&self) -> Arc<dyn VariableExpenseServiceTrait> {
        self.variable_expense_service.clone()
    }

    fn goal_service(&self) -> Arc<dyn GoalServiceTrait> {
        self.goal_service.clone()
    }

    fn chat_history_service(&self) -> Arc<dyn ChatHistoryServiceTrait> {
        self.chat_history_service.clone()
    }
}

//! Variable expenses module - domain models, services, and traits.

mod variable_expenses_model;
mod variable_expenses_service;
mod variable_expenses_traits;

pub use variable_expenses_model::{CategoryTotal, NewVariableExpense, VariableExpense};
pub use variable_expenses_service::{summarize_by_category, VariableExpenseService};
pub use variable_expenses_traits::{VariableExpenseRepositoryTrait, VariableExpenseServiceTrait};

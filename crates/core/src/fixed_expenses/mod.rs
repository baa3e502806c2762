//! Fixed expenses module - domain models, services, and traits.

mod fixed_expenses_model;
mod fixed_expenses_service;
mod fixed_expenses_traits;

pub use fixed_expenses_model::{FixedExpense, FixedExpenseUpdate, NewFixedExpense, PaymentStatus};
pub use fixed_expenses_service::FixedExpenseService;
pub use fixed_expenses_traits::{FixedExpenseRepositoryTrait, FixedExpenseServiceTrait};

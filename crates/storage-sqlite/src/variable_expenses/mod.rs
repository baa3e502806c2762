//! SQLite storage implementation for variable expenses.

mod model;
mod repository;

pub use model::VariableExpenseDB;
pub use repository::VariableExpenseRepository;

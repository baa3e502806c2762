//! SQLite storage implementation for fixed expenses.

mod model;
mod repository;

pub use model::FixedExpenseDB;
pub use repository::FixedExpenseRepository;

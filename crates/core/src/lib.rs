//! Wallet Core - Domain entities, services, and traits.
//!
//! This crate contains the personal-finance business logic: record models and
//! their validation, the repository traits implemented by the `storage-sqlite`
//! crate, the financial summary engine, and the assistant's chat history.

pub mod categories;
pub mod chat;
pub mod constants;
pub mod errors;
pub mod fixed_expenses;
pub mod goals;
pub mod incomes;
pub mod summary;
pub mod utils;
pub mod variable_expenses;

pub use categories::ExpenseCategory;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

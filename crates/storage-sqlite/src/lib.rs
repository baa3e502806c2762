//! SQLite storage implementation for Wallet.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `wallet-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for incomes, fixed expenses, variable expenses,
//!   goals and the assistant's chat history
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the r2d2 pool; every write is funnelled through the single
//! writer actor so SQLite never sees two concurrent write transactions.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod chat;
pub mod fixed_expenses;
pub mod goals;
pub mod incomes;
pub mod variable_expenses;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use chat::ChatRepository;
pub use fixed_expenses::FixedExpenseRepository;
pub use goals::GoalRepository;
pub use incomes::IncomeRepository;
pub use variable_expenses::VariableExpenseRepository;

// Re-export from wallet-core for convenience
pub use wallet_core::errors::{DatabaseError, Error, Result};

//! Wallet AI - financial assistant orchestration using rig-core.
//!
//! This crate lets a user record incomes, expenses and goal contributions by
//! talking to an LLM that calls back into the wallet services.
//!
//! # Architecture
//!
//! - `chat`: Chat service running the model ↔ tools ↔ model loop
//! - `tools`: rig-core tools bound to one user
//! - `env`: Environment abstraction over the record services, chat history and clock
//! - `error`: Assistant error type with stable codes
//!
//! # Example
//!
//! ```ignore
//! use wallet_ai::{ChatConfig, ChatService};
//!
//! // The server implements AssistantEnvironment over its services
//! let service = ChatService::new(Arc::new(env), ChatConfig {
//!     api_key: Some(key),
//!     ..ChatConfig::default()
//! });
//!
//! let reply = service.send_message("user-1", "Gastei 45 reais no mercado").await?;
//! println!("{}", reply.text);
//! ```

pub mod chat;
pub mod env;
pub mod error;
pub mod tools;

// Re-export main types for convenience
pub use chat::{
    build_history, build_preamble, ChatConfig, ChatReply, ChatService, DEFAULT_CHAT_MODEL,
    MAX_HISTORY_MESSAGES,
};
pub use env::AssistantEnvironment;
pub use error::AiError;
pub use tools::{
    tool_names, AddToGoalTool, CreateFixedExpenseTool, CreateGoalTool, CreateIncomeTool,
    CreateVariableExpenseTool, GetGoalsTool, ToolSet, MAX_GOALS,
};

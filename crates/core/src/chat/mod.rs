//! Chat module - the per-user assistant thread and its messages.

mod chat_model;
mod chat_service;
mod chat_traits;

pub use chat_model::{
    ChatMessage, ChatRole, ChatThread, DEFAULT_THREAD_TITLE, MAX_LISTED_MESSAGES,
    MAX_MESSAGE_CONTENT_CHARS,
};
pub use chat_service::ChatHistoryService;
pub use chat_traits::{ChatHistoryServiceTrait, ChatRepositoryTrait};

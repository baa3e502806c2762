use crate::chat::chat_model::{ChatMessage, ChatRole, ChatThread};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for chat history persistence
#[async_trait]
pub trait ChatRepositoryTrait: Send + Sync {
    fn find_thread_for_user(&self, user_id: &str) -> Result<Option<ChatThread>>;
    /// The thread, or `NotFound` when it does not belong to `user_id`.
    fn get_thread(&self, user_id: &str, thread_id: &str) -> Result<ChatThread>;
    /// Inserts `thread` unless its user already has one, which is returned instead.
    async fn get_or_insert_thread(&self, thread: ChatThread) -> Result<ChatThread>;
    /// The latest `limit` messages of the thread, oldest first.
    fn list_messages(&self, thread_id: &str, limit: usize) -> Result<Vec<ChatMessage>>;
    /// Inserts the message and bumps the thread's `updated_at`.
    async fn insert_message(&self, message: ChatMessage) -> Result<ChatMessage>;
}

/// Trait for chat history service operations
#[async_trait]
pub trait ChatHistoryServiceTrait: Send + Sync {
    fn get_thread(&self, user_id: &str) -> Result<Option<ChatThread>>;
    async fn get_or_create_thread(&self, user_id: &str) -> Result<ChatThread>;
    fn get_messages(&self, user_id: &str, thread_id: &str, limit: usize)
        -> Result<Vec<ChatMessage>>;
    async fn append_message(
        &self,
        user_id: &str,
        thread_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage>;
}

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::chat_model::{
    ChatMessage, ChatRole, ChatThread, MAX_LISTED_MESSAGES, MAX_MESSAGE_CONTENT_CHARS,
};
use super::chat_traits::{ChatHistoryServiceTrait, ChatRepositoryTrait};
use crate::errors::{Error, Result};

pub struct ChatHistoryService {
    repository: Arc<dyn ChatRepositoryTrait>,
}

impl ChatHistoryService {
    pub fn new(repository: Arc<dyn ChatRepositoryTrait>) -> Self {
        ChatHistoryService { repository }
    }
}

#[async_trait]
impl ChatHistoryServiceTrait for ChatHistoryService {
    fn get_thread(&self, user_id: &str) -> Result<Option<ChatThread>> {
        self.repository.find_thread_for_user(user_id)
    }

    async fn get_or_create_thread(&self, user_id: &str) -> Result<ChatThread> {
        if let Some(thread) = self.repository.find_thread_for_user(user_id)? {
            return Ok(thread);
        }
        debug!("Creating chat thread for user {}", user_id);
        self.repository
            .get_or_insert_thread(ChatThread::new(user_id))
            .await
    }

    /// Latest messages of a thread the user owns, oldest first. `limit` is
    /// clamped to `1..=MAX_LISTED_MESSAGES`.
    fn get_messages(
        &self,
        user_id: &str,
        thread_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>> {
        let thread = self.repository.get_thread(user_id, thread_id)?;
        self.repository
            .list_messages(&thread.id, limit.clamp(1, MAX_LISTED_MESSAGES))
    }

    async fn append_message(
        &self,
        user_id: &str,
        thread_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::invalid_input("Chat message cannot be empty"));
        }
        if content.chars().count() > MAX_MESSAGE_CONTENT_CHARS {
            return Err(Error::invalid_input(format!(
                "Chat message exceeds {} characters",
                MAX_MESSAGE_CONTENT_CHARS
            )));
        }
        let thread = self.repository.get_thread(user_id, thread_id)?;
        self.repository
            .insert_message(ChatMessage::new(&thread.id, role, content))
            .await
    }
}

//! Database models for chat threads and messages.

use diesel::prelude::*;
use wallet_core::chat::{ChatMessage, ChatRole, ChatThread};

use crate::utils::{format_timestamp, parse_timestamp};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::chat_threads)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChatThreadDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::chat_messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChatMessageDB {
    pub id: String,
    pub thread_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

impl From<ChatThreadDB> for ChatThread {
    fn from(db: ChatThreadDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
        }
    }
}

impl From<ChatThread> for ChatThreadDB {
    fn from(domain: ChatThread) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            created_at: format_timestamp(&domain.created_at),
            updated_at: format_timestamp(&domain.updated_at),
        }
    }
}

impl From<ChatMessageDB> for ChatMessage {
    fn from(db: ChatMessageDB) -> Self {
        let role = db.role.parse().unwrap_or_else(|e| {
            log::error!("{} on chat message {}, treating it as assistant", e, db.id);
            ChatRole::Assistant
        });
        Self {
            id: db.id,
            thread_id: db.thread_id,
            role,
            content: db.content,
            created_at: parse_timestamp(&db.created_at, "created_at"),
        }
    }
}

impl From<ChatMessage> for ChatMessageDB {
    fn from(domain: ChatMessage) -> Self {
        Self {
            id: domain.id,
            thread_id: domain.thread_id,
            role: domain.role.as_str().to_string(),
            content: domain.content,
            created_at: format_timestamp(&domain.created_at),
        }
    }
}

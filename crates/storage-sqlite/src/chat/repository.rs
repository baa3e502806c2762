use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use wallet_core::chat::{ChatMessage, ChatRepositoryTrait, ChatThread};
use wallet_core::errors::{Error, Result};

use super::model::{ChatMessageDB, ChatThreadDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{chat_messages, chat_threads};

pub struct ChatRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChatRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ChatRepository { pool, writer }
    }
}

fn find_for_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Option<ChatThreadDB>> {
    chat_threads::table
        .filter(chat_threads::user_id.eq(user_id))
        .select(ChatThreadDB::as_select())
        .first::<ChatThreadDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl ChatRepositoryTrait for ChatRepository {
    fn find_thread_for_user(&self, user_id: &str) -> Result<Option<ChatThread>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_for_user(&mut conn, user_id)?.map(ChatThread::from))
    }

    fn get_thread(&self, user_id: &str, thread_id: &str) -> Result<ChatThread> {
        let mut conn = get_connection(&self.pool)?;
        chat_threads::table
            .filter(chat_threads::id.eq(thread_id))
            .filter(chat_threads::user_id.eq(user_id))
            .select(ChatThreadDB::as_select())
            .first::<ChatThreadDB>(&mut conn)
            .optional()
            .into_core()?
            .map(ChatThread::from)
            .ok_or_else(|| Error::NotFound(format!("Chat thread {}", thread_id)))
    }

    async fn get_or_insert_thread(&self, thread: ChatThread) -> Result<ChatThread> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ChatThread> {
                if let Some(existing) = find_for_user(conn, &thread.user_id)? {
                    return Ok(existing.into());
                }
                let row: ChatThreadDB = thread.into();
                let saved = diesel::insert_into(chat_threads::table)
                    .values(&row)
                    .returning(ChatThreadDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(saved.into())
            })
            .await
    }

    fn list_messages(&self, thread_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let mut conn = get_connection(&self.pool)?;
        let mut rows = chat_messages::table
            .filter(chat_messages::thread_id.eq(thread_id))
            .order((chat_messages::created_at.desc(), chat_messages::id.desc()))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(ChatMessageDB::as_select())
            .load::<ChatMessageDB>(&mut conn)
            .into_core()?;
        rows.reverse();
        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    async fn insert_message(&self, message: ChatMessage) -> Result<ChatMessage> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ChatMessage> {
                let row: ChatMessageDB = message.into();
                let saved = diesel::insert_into(chat_messages::table)
                    .values(&row)
                    .returning(ChatMessageDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                diesel::update(chat_threads::table.find(&saved.thread_id))
                    .set(chat_threads::updated_at.eq(&saved.created_at))
                    .execute(conn)
                    .into_core()?;
                Ok(saved.into())
            })
            .await
    }
}

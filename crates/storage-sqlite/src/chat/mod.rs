//! SQLite storage implementation for the assistant's chat history.

mod model;
mod repository;

pub use model::{ChatMessageDB, ChatThreadDB};
pub use repository::ChatRepository;

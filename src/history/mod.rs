//! Conversation History Module
//!
//! Keeps the question/answer exchanges of the assistant, optionally written
//! through to a file so they survive restarts.

pub mod conversation_log;
pub mod error;

// Re-export key types
pub use self::conversation_log::{ConversationLog, ConversationRecord, MAX_RECENT};
pub use self::error::{HistoryError, HistoryResult};

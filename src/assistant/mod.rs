//! Assistant Module
//!
//! The chatbot around the schema extractor: intent rules, prompt building,
//! an injectable response generator with an HTTP implementation, canned fallback replies and response
//! formatting.

pub mod canned;
pub mod chat;
pub mod credentials;
pub mod formatter;
pub mod generator;
pub mod http_generator;
pub mod intent;
pub mod prompt;
pub mod session;

// Re-export key types
pub use self::chat::{Assistant, Reply, ReplySource};
pub use self::credentials::{CredentialSource, EnvCredentials, NoCredentials, StaticCredentials};
pub use self::generator::{GenerationRequest, ResponseGenerator};
pub use self::http_generator::{HttpGenerator, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use self::intent::{detect_intents, Intent};
pub use self::prompt::{PromptBuilder, SchemaContext};
pub use self::session::ChatSession;

use thiserror::Error;
use crate::history::HistoryError;

/// Errors raised while answering a message
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// Result type for assistant operations
pub type AssistantResult<T> = Result<T, AssistantError>;

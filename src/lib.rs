// Schemabot: SQL-schema-aware chat assistant

pub mod assistant;
pub mod config;
pub mod history;
pub mod schema;

// Re-export key items for convenient access
pub use assistant::{Assistant, ChatSession, Reply, ReplySource, ResponseGenerator};
pub use config::AssistantConfig;
pub use history::{ConversationLog, ConversationRecord};
pub use schema::{extract_tables, ColumnDescriptor, Extraction, SplitMode, TableDescriptor, TableExtractor};

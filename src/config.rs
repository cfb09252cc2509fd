// Assistant Configuration
//
// All settings the assistant needs are carried in one explicitly passed
// value; nothing is read from globals.

use std::path::PathBuf;
use std::sync::Arc;

use crate::assistant::credentials::{CredentialSource, EnvCredentials};
use crate::history::MAX_RECENT;
use crate::schema::SplitMode;

/// Configuration for an [`Assistant`](crate::assistant::Assistant)
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Language the generator is asked to answer in
    pub language: String,
    /// How CREATE TABLE bodies are split into columns
    pub split_mode: SplitMode,
    /// Number of exchanges returned by history listings
    pub history_limit: usize,
    /// Where the conversation log is persisted (in memory when unset)
    pub history_path: Option<PathBuf>,
    /// Source of the generator API key
    pub credentials: Arc<dyn CredentialSource>,
}

impl AssistantConfig {
    /// Replace the credential source
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the split mode
    pub fn with_split_mode(mut self, split_mode: SplitMode) -> Self {
        self.split_mode = split_mode;
        self
    }

    /// Set the history file
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            language: "Spanish".to_string(),
            split_mode: SplitMode::Naive,
            history_limit: MAX_RECENT,
            history_path: None,
            credentials: Arc::new(EnvCredentials::default()),
        }
    }
}

// Assistant Pipeline
//
// message -> intent rules -> prompt -> generator (or canned reply) -> formatter

use std::sync::Arc;
use log::{debug, error, info};

use super::canned::{canned_reply, APOLOGY};
use super::formatter::format_response;
use super::generator::{GenerationRequest, ResponseGenerator};
use super::intent::detect_intents;
use super::prompt::PromptBuilder;
use super::session::ChatSession;
use super::{AssistantError, AssistantResult};
use crate::config::AssistantConfig;
use crate::history::ConversationLog;
use crate::schema::{Extraction, TableExtractor};

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Produced by the response generator
    Generated,
    /// Keyword-matched canned reply
    Canned,
    /// The generator failed
    Apology,
}

/// An answer to a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Answers user messages
pub struct Assistant {
    config: AssistantConfig,
    extractor: TableExtractor,
    generator: Option<Box<dyn ResponseGenerator>>,
    history: Option<Arc<ConversationLog>>,
}

impl Assistant {
    /// Create an assistant with no generator and no history
    pub fn new(config: AssistantConfig) -> Self {
        let extractor = TableExtractor::new(config.split_mode);
        Assistant {
            config,
            extractor,
            generator: None,
            history: None,
        }
    }

    /// Create an assistant, opening the history file named in the configuration
    pub fn open(config: AssistantConfig) -> AssistantResult<Self> {
        let history = match &config.history_path {
            Some(path) => ConversationLog::open(path)?,
            None => ConversationLog::in_memory(),
        };
        Ok(Self::new(config).with_history(Arc::new(history)))
    }

    /// Attach a response generator
    pub fn with_generator(mut self, generator: Box<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Attach a conversation log
    pub fn with_history(mut self, history: Arc<ConversationLog>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn extractor(&self) -> &TableExtractor {
        &self.extractor
    }

    pub fn history(&self) -> Option<&ConversationLog> {
        self.history.as_deref()
    }

    /// Load SQL into a session using this assistant's split mode
    pub fn load_sql<'s>(&self, session: &'s mut ChatSession, sql: impl Into<String>) -> &'s Extraction {
        let extraction = session.load_sql(sql, &self.extractor);
        info!(
            "Loaded schema with {} tables ({} diagnostics)",
            extraction.tables.len(),
            extraction.diagnostics.len()
        );
        extraction
    }

    /// Build the prompt that would be sent for `message`
    pub fn build_prompt(&self, session: &ChatSession, message: &str) -> String {
        let intents = detect_intents(message);
        if !intents.is_empty() {
            debug!("Detected intents: {:?}", intents);
        }

        let mut builder = PromptBuilder::new(&self.config.language).intents(&intents);
        if let Some(schema) = session.schema_context() {
            builder = builder.schema(schema);
        }
        builder.build(message)
    }

    /// Answer `message` and record the exchange
    pub fn reply(&self, session: &ChatSession, message: &str) -> AssistantResult<Reply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let reply = self.answer(session, message);

        if let Some(history) = &self.history {
            history.record(message, &reply.text)?;
        }

        Ok(reply)
    }

    fn answer(&self, session: &ChatSession, message: &str) -> Reply {
        let Some(generator) = &self.generator else {
            info!("No response generator attached, using canned replies");
            return Self::canned(message);
        };

        let Some(api_key) = self.config.credentials.api_key() else {
            info!("No API key available for {}, using canned replies", generator.name());
            return Self::canned(message);
        };

        let prompt = self.build_prompt(session, message);
        let request = GenerationRequest {
            prompt: &prompt,
            api_key: &api_key,
        };

        match generator.generate(&request) {
            Ok(text) => Reply {
                text: format_response(&text),
                source: ReplySource::Generated,
            },
            Err(err) => {
                error!("{} failed: {:#}", generator.name(), err);
                Reply {
                    text: APOLOGY.to_string(),
                    source: ReplySource::Apology,
                }
            }
        }
    }

    fn canned(message: &str) -> Reply {
        Reply {
            text: canned_reply(message).to_string(),
            source: ReplySource::Canned,
        }
    }
}

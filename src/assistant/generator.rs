// Response Generator Interface
//
// The generative-language service is an external collaborator. The
// assistant talks to it through this trait so a real client, a test double
// or nothing at all can be plugged in.

use anyhow::Result;

/// Everything a generator needs for one call
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    /// Fully built prompt
    pub prompt: &'a str,
    /// API key resolved from the configured credential source
    pub api_key: &'a str,
}

/// Produces an answer for a prompt
pub trait ResponseGenerator: Send + Sync {
    /// Generate the raw answer text
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String>;

    /// Name used in log messages
    fn name(&self) -> &str {
        "generator"
    }
}

// Generative Language API Client
//
// Blocking HTTP implementation of `ResponseGenerator` for the
// `models/{model}:generateContent` endpoint.

use std::time::Duration;
use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use serde::{Serialize, Deserialize};

use super::generator::{GenerationRequest, ResponseGenerator};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-pro";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Build the JSON body sent for a prompt
pub fn request_body(prompt: &str) -> serde_json::Value {
    let body = GenerateRequestBody {
        contents: vec![Content {
            parts: vec![RequestPart { text: prompt }],
        }],
    };
    // Plain structs of strings always serialize
    serde_json::to_value(body).unwrap_or(serde_json::Value::Null)
}

/// Pull the answer text out of a response body
pub fn answer_text(body: &str) -> Result<String> {
    let parsed: GenerateResponseBody =
        serde_json::from_str(body).context("Malformed generateContent response")?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| anyhow!("Response contained no candidates"))?
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        bail!("Response candidate had no text");
    }
    Ok(text)
}

/// Calls a generative-language HTTP API
pub struct HttpGenerator {
    client: reqwest::blocking::Client,
    api_base: String,
    model: String,
}

impl HttpGenerator {
    /// Create a client for `model` at `api_base`
    pub fn new(api_base: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(HttpGenerator {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Endpoint URL for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl ResponseGenerator for HttpGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String> {
        let url = self.endpoint();
        debug!("POST {} ({} prompt bytes)", url, request.prompt.len());

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, request.api_key)
            .json(&request_body(request.prompt))
            .send()
            .with_context(|| format!("HTTP request to {} failed", url))?;

        let status = response.status();
        let body = response.text().context("Failed to read response body")?;

        if !status.is_success() {
            bail!("Generative API returned {}: {}", status, body.trim());
        }

        answer_text(&body)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

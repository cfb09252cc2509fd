// Credential Sources
//
// The generator API key is resolved through a source passed in with the
// configuration, never from a process-wide constant.

use std::fmt;

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_VAR: &str = "SCHEMABOT_API_KEY";

/// Supplies the API key for the response generator
pub trait CredentialSource: fmt::Debug + Send + Sync {
    /// Resolve the API key, if one is available
    fn api_key(&self) -> Option<String>;
}

/// Reads the API key from an environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    /// Create a source reading `var`
    pub fn new(var: impl Into<String>) -> Self {
        EnvCredentials { var: var.into() }
    }

    /// Get the variable name
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        EnvCredentials::new(DEFAULT_API_KEY_VAR)
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// A fixed API key
#[derive(Clone)]
pub struct StaticCredentials {
    key: String,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        StaticCredentials { key: key.into() }
    }
}

// Keep the key out of debug output.
impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials").field("key", &"<redacted>").finish()
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        Some(self.key.clone())
    }
}

/// Never yields a key
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn api_key(&self) -> Option<String> {
        None
    }
}

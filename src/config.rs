//! Client configuration record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public endpoint of the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://www.hanlp.com/api";

/// Language assumed when none is configured.
pub const DEFAULT_LANGUAGE: &str = "zh";

/// Error returned when a configuration record fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL was empty.
    #[error("base_url must not be empty")]
    EmptyBaseUrl,
}

/// Construction-time configuration for [`HanlpClient`](crate::HanlpClient).
///
/// The record is filled once and treated as read-only afterwards; the
/// consuming `with_*` methods derive modified copies rather than mutating
/// shared state, so a configuration can be shared across threads safely.
/// Per-call overrides live in [`CallOptions`](crate::CallOptions).
///
/// # Examples
///
/// ```
/// use hanlp_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_auth("token")
///     .with_language("mul")
///     .with_tasks(["tok/fine", "ner/msra"]);
/// assert_eq!(config.language, "mul");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the service; endpoint paths are appended to it.
    pub base_url: String,
    /// Basic auth credential, sent as `Authorization: Basic <token>`.
    pub auth: Option<String>,
    /// Default language of input text.
    pub language: String,
    /// Default number of top ranked results for ranked operations.
    pub topk: Option<u32>,
    /// Default tasks to run on parse.
    pub tasks: Vec<String>,
    /// Default tasks to skip on parse.
    pub skip_tasks: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            auth: None,
            language: DEFAULT_LANGUAGE.to_owned(),
            topk: None,
            tasks: Vec::new(),
            skip_tasks: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the hosted-service defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different deployment.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the basic auth credential.
    #[must_use]
    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set the default language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the default number of top ranked results.
    #[must_use]
    pub fn with_topk(mut self, topk: u32) -> Self {
        self.topk = Some(topk);
        self
    }

    /// Set the default task selection.
    #[must_use]
    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = tasks.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default tasks to skip.
    #[must_use]
    pub fn with_skip_tasks<I, S>(mut self, skip_tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_tasks = skip_tasks.into_iter().map(Into::into).collect();
        self
    }

    /// Ensure the configuration values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if `base_url` is empty.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.base_url.is_empty() {
            Err(ConfigError::EmptyBaseUrl)
        } else {
            Ok(self)
        }
    }
}

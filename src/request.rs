//! Wire request types.
//!
//! [`ApiRequest`] is the serialised POST body; fields that are absent or
//! empty are omitted entirely so the body matches what the service expects.
//! [`CallOptions`] carries per-call overrides, resolved against the client
//! configuration when the request is composed.

use serde::Serialize;

use crate::config::ClientConfig;

/// Top-k fallback applied to ranked operations when neither the call nor the
/// configuration sets one.
pub const DEFAULT_TOPK: u32 = 10;

/// Text payload of one request.
///
/// The service accepts a single document, a list of pre-split sentences, or
/// a list of sentence pairs depending on the task; the untagged encoding
/// serialises each form as the bare JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TextInput {
    /// One document, segmented by the server.
    Single(String),
    /// Pre-split sentences.
    Sentences(Vec<String>),
    /// Sentence pairs, e.g. for similarity scoring.
    Pairs(Vec<(String, String)>),
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        Self::Single(text.to_owned())
    }
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        Self::Single(text)
    }
}

impl From<Vec<String>> for TextInput {
    fn from(sentences: Vec<String>) -> Self {
        Self::Sentences(sentences)
    }
}

impl From<&[&str]> for TextInput {
    fn from(sentences: &[&str]) -> Self {
        Self::Sentences(sentences.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TextInput {
    fn from(sentences: [&str; N]) -> Self {
        Self::from(&sentences[..])
    }
}

impl From<Vec<(String, String)>> for TextInput {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Pairs(pairs)
    }
}

impl From<&[(&str, &str)]> for TextInput {
    fn from(pairs: &[(&str, &str)]) -> Self {
        Self::Pairs(
            pairs
                .iter()
                .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for TextInput {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::from(&pairs[..])
    }
}

/// Per-call overrides for a single operation.
///
/// Every field is optional; an unset field falls back to the client
/// configuration. Consuming `with_*` methods derive modified copies, so a
/// shared options value is never mutated in place.
///
/// # Examples
///
/// ```
/// use hanlp_client::CallOptions;
///
/// let options = CallOptions::new().with_language("mul").with_topk(5);
/// assert_eq!(options.language.as_deref(), Some("mul"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Language of the input text.
    pub language: Option<String>,
    /// Tasks to run; dependent tasks are selected by the server.
    pub tasks: Option<Vec<String>>,
    /// Tasks to skip, e.g. `tok/fine` to force coarse tokenization.
    pub skip_tasks: Option<Vec<String>>,
    /// Number of top ranked results for ranked operations.
    pub topk: Option<u32>,
    /// Server-side model selector for classification.
    pub model: Option<String>,
    /// Target style for style transfer.
    pub target_style: Option<String>,
}

impl CallOptions {
    /// Create an empty override set; every field falls back to the client
    /// configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the input language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Override the task selection.
    #[must_use]
    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = Some(tasks.into_iter().map(Into::into).collect());
        self
    }

    /// Override the tasks to skip.
    #[must_use]
    pub fn with_skip_tasks<I, S>(mut self, skip_tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_tasks = Some(skip_tasks.into_iter().map(Into::into).collect());
        self
    }

    /// Override the number of top ranked results.
    #[must_use]
    pub fn with_topk(mut self, topk: u32) -> Self {
        self.topk = Some(topk);
        self
    }

    /// Override the classification model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the target style.
    #[must_use]
    pub fn with_target_style(mut self, target_style: impl Into<String>) -> Self {
        self.target_style = Some(target_style.into());
        self
    }
}

/// Serialised body of one POST request.
///
/// Absent or empty fields are omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRequest {
    /// Text payload, shape depending on the task.
    pub text: TextInput,
    /// Language of the input text; empty means server default.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    /// Tasks to run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
    /// Tasks to skip.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip_tasks: Vec<String>,
    /// Number of top ranked results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topk: Option<u32>,
    /// Server-side model selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Target style for style transfer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_style: Option<String>,
}

impl ApiRequest {
    fn base(text: TextInput, config: &ClientConfig, options: &CallOptions) -> Self {
        Self {
            text,
            language: options
                .language
                .clone()
                .unwrap_or_else(|| config.language.clone()),
            tasks: Vec::new(),
            skip_tasks: Vec::new(),
            topk: None,
            model: None,
            target_style: None,
        }
    }

    /// Compose the body of a general parse request.
    #[must_use]
    pub fn for_parse(text: TextInput, config: &ClientConfig, options: &CallOptions) -> Self {
        Self {
            tasks: options.tasks.clone().unwrap_or_else(|| config.tasks.clone()),
            skip_tasks: options
                .skip_tasks
                .clone()
                .unwrap_or_else(|| config.skip_tasks.clone()),
            ..Self::base(text, config, options)
        }
    }

    /// Compose the body of an operation that takes only text and language.
    #[must_use]
    pub fn for_plain(text: TextInput, config: &ClientConfig, options: &CallOptions) -> Self {
        Self::base(text, config, options)
    }

    /// Compose the body of a ranked operation, falling back to
    /// [`DEFAULT_TOPK`] when no top-k is set anywhere.
    #[must_use]
    pub fn for_ranked(text: TextInput, config: &ClientConfig, options: &CallOptions) -> Self {
        Self {
            topk: options.topk.or(config.topk).or(Some(DEFAULT_TOPK)),
            ..Self::base(text, config, options)
        }
    }

    /// Compose the body of a classification request, carrying the model
    /// selector and the resolved top-k; an unset top-k is omitted.
    #[must_use]
    pub fn for_classification(
        text: TextInput,
        config: &ClientConfig,
        options: &CallOptions,
    ) -> Self {
        Self {
            topk: options.topk.or(config.topk),
            model: options.model.clone(),
            ..Self::base(text, config, options)
        }
    }

    /// Compose the body of a style transfer request.
    #[must_use]
    pub fn for_style(
        text: TextInput,
        target_style: String,
        config: &ClientConfig,
        options: &CallOptions,
    ) -> Self {
        Self {
            target_style: Some(target_style),
            ..Self::base(text, config, options)
        }
    }
}

//! Blocking facade over the RESTful endpoints.
//!
//! Each operation issues exactly one request and blocks until the transport
//! completes or fails. There is no retry, no internal timeout and no shared
//! mutable state; cancellation is the caller's concern.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::document::Document;
use crate::request::{ApiRequest, CallOptions, TextInput};

const PARSE: &str = "/parse";
const GRAMMATICAL_ERROR_CORRECTION: &str = "/grammatical_error_correction";
const KEYPHRASE_EXTRACTION: &str = "/keyphrase_extraction";
const SEMANTIC_TEXTUAL_SIMILARITY: &str = "/semantic_textual_similarity";
const TEXT_CLASSIFICATION: &str = "/text_classification";
const SENTIMENT_ANALYSIS: &str = "/sentiment_analysis";
const ABSTRACTIVE_SUMMARIZATION: &str = "/abstractive_summarization";
const EXTRACTIVE_SUMMARIZATION: &str = "/extractive_summarization";
const TEXT_STYLE_TRANSFER: &str = "/text_style_transfer";
const ABOUT: &str = "/about";

/// Error returned by [`HanlpClient`] operations.
#[derive(Debug, Error)]
pub enum HanlpError {
    /// The transport failed before a response arrived.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a status of 400 or above.
    #[error("server returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, usually a JSON object with `code` and `msg`.
        body: String,
    },
    /// The response body did not decode into the requested shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PartialEq for HanlpError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Status { status, body },
                Self::Status {
                    status: other_status,
                    body: other_body,
                },
            ) => status == other_status && body == other_body,
            (Self::Transport(_), Self::Transport(_)) | (Self::Decode(_), Self::Decode(_)) => true,
            _ => false,
        }
    }
}

impl Eq for HanlpError {}

/// Blocking client for the RESTful API.
///
/// The configuration is fixed at construction; per-call variation goes
/// through [`CallOptions`]. Cloning is cheap and clones share the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct HanlpClient {
    http: Client,
    config: ClientConfig,
}

impl HanlpClient {
    /// Create a client over the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed with the default
    /// configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        #[expect(
            clippy::expect_used,
            reason = "client builder should not fail with defaults"
        )]
        let http = Client::builder()
            .timeout(None)
            .build()
            .expect("client builder failed with default configuration");
        Self { http, config }
    }

    /// The configuration this client was constructed with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run the general parse operation and decode the typed document.
    ///
    /// # Errors
    ///
    /// Returns [`HanlpError::Transport`] on network failure,
    /// [`HanlpError::Status`] for HTTP statuses of 400 and above, and
    /// [`HanlpError::Decode`] if the body is not a valid response envelope.
    pub fn parse(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<Document, HanlpError> {
        self.parse_as(text, options)
    }

    /// Run the general parse operation and return the raw body text.
    ///
    /// # Errors
    ///
    /// Returns [`HanlpError::Transport`] on network failure and
    /// [`HanlpError::Status`] for HTTP statuses of 400 and above.
    pub fn parse_raw(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_parse(text.into(), &self.config, options);
        self.post(PARSE, &request)
    }

    /// Run the general parse operation and return the raw body bytes.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn parse_bytes(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<Vec<u8>, HanlpError> {
        self.parse_raw(text, options).map(String::into_bytes)
    }

    /// Run the general parse operation and decode into a caller-chosen shape.
    ///
    /// Any `T: DeserializeOwned` works, including [`Document`]; use this to
    /// pick out a subset of the response with a purpose-built struct.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse`].
    pub fn parse_as<T: DeserializeOwned>(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<T, HanlpError> {
        let body = self.parse_raw(text, options)?;
        serde_json::from_str(&body).map_err(HanlpError::from)
    }

    /// Correct spelling, punctuation, grammatical and word choice errors.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn grammatical_error_correction(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_plain(text.into(), &self.config, options);
        self.post(GRAMMATICAL_ERROR_CORRECTION, &request)
    }

    /// Extract the top-k keywords or keyphrases of a document.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn keyphrase_extraction(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_ranked(text.into(), &self.config, options);
        self.post(KEYPHRASE_EXTRACTION, &request)
    }

    /// Score how similar the sentences of each pair are.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn semantic_textual_similarity(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_ranked(text.into(), &self.config, options);
        self.post(SEMANTIC_TEXTUAL_SIMILARITY, &request)
    }

    /// Classify a document with the configured model.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn text_classification(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_classification(text.into(), &self.config, options);
        self.post(TEXT_CLASSIFICATION, &request)
    }

    /// Score the sentiment polarity of a document.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn sentiment_analysis(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_plain(text.into(), &self.config, options);
        self.post(SENTIMENT_ANALYSIS, &request)
    }

    /// Summarise a document into newly generated text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn abstractive_summarization(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_plain(text.into(), &self.config, options);
        self.post(ABSTRACTIVE_SUMMARIZATION, &request)
    }

    /// Pick the top-k most central sentences of a document.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn extractive_summarization(
        &self,
        text: impl Into<TextInput>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request = ApiRequest::for_ranked(text.into(), &self.config, options);
        self.post(EXTRACTIVE_SUMMARIZATION, &request)
    }

    /// Rewrite a document into the target style.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HanlpClient::parse_raw`].
    pub fn text_style_transfer(
        &self,
        text: impl Into<TextInput>,
        target_style: impl Into<String>,
        options: &CallOptions,
    ) -> Result<String, HanlpError> {
        let request =
            ApiRequest::for_style(text.into(), target_style.into(), &self.config, options);
        self.post(TEXT_STYLE_TRANSFER, &request)
    }

    /// Fetch the service description.
    ///
    /// # Errors
    ///
    /// Returns [`HanlpError::Transport`] on network failure and
    /// [`HanlpError::Status`] for HTTP statuses of 400 and above.
    pub fn about(&self) -> Result<String, HanlpError> {
        let builder = self.http.get(self.url(ABOUT));
        Self::read_body(self.headers(builder).send()?)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    fn headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json;charset=utf-8");
        match &self.config.auth {
            Some(auth) => builder.header(AUTHORIZATION, format!("Basic {auth}")),
            None => builder,
        }
    }

    fn post(&self, endpoint: &str, request: &ApiRequest) -> Result<String, HanlpError> {
        let body = serde_json::to_vec(request)?;
        let builder = self.http.post(self.url(endpoint)).body(body);
        Self::read_body(self.headers(builder).send()?)
    }

    fn read_body(response: Response) -> Result<String, HanlpError> {
        let status = response.status().as_u16();
        let body = response.text()?;
        if status >= 400 {
            return Err(HanlpError::Status { status, body });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn status_error_mentions_the_code() {
        let err = HanlpError::Status {
            status: 429,
            body: r#"{"code":429,"msg":"rate limited"}"#.to_owned(),
        };
        assert!(err.to_string().contains("429"));
    }

    #[rstest]
    fn status_errors_compare_by_fields() {
        let a = HanlpError::Status {
            status: 401,
            body: "no".to_owned(),
        };
        let b = HanlpError::Status {
            status: 401,
            body: "no".to_owned(),
        };
        let c = HanlpError::Status {
            status: 403,
            body: "no".to_owned(),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[rstest]
    fn endpoint_urls_join_without_rewriting() {
        let client = HanlpClient::new(ClientConfig::new().with_base_url("http://host/api"));
        assert_eq!(client.url(PARSE), "http://host/api/parse");
    }
}

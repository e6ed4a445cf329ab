//! Argument types and layered configuration for the `hanlp` binary.
//!
//! Values are loaded from command line flags, environment variables
//! (prefix `HANLP_`) and an optional TOML configuration file, with flags
//! taking precedence over the environment and the environment over the file.

use std::path::PathBuf;

use clap::Parser;
use figment::{
    Figment,
    providers::{Format, Toml},
};
use thiserror::Error;

use crate::config::{ClientConfig, ConfigError};
use crate::request::{ApiRequest, CallOptions, TextInput};

/// Errors returned while assembling or running a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be read or parsed.
    #[error("invalid configuration file: {0}")]
    Config(#[from] Box<figment::Error>),
    /// The resolved configuration failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
    /// The request itself failed.
    #[error(transparent)]
    Client(#[from] crate::client::HanlpError),
}

/// Command line arguments for the `hanlp` binary.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use hanlp_client::cli::CliArgs;
///
/// let args = CliArgs::try_parse_from(["hanlp", "--language", "mul", "北京"])
///     .expect("parse args");
/// assert_eq!(args.language.as_deref(), Some("mul"));
/// assert_eq!(args.text, vec!["北京".to_owned()]);
/// ```
#[derive(Debug, Parser)]
#[command(name = "hanlp", version, about = "Query the HanLP RESTful API")]
pub struct CliArgs {
    /// Text to analyse; several arguments are sent as pre-split sentences.
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Base URL of the service.
    #[arg(long, env = "HANLP_URL")]
    pub url: Option<String>,

    /// Basic auth credential.
    #[arg(long, env = "HANLP_AUTH", hide_env_values = true)]
    pub auth: Option<String>,

    /// Language of the input text.
    #[arg(long, env = "HANLP_LANGUAGE")]
    pub language: Option<String>,

    /// Task to run; repeat the flag to select several.
    #[arg(long = "task")]
    pub tasks: Vec<String>,

    /// Task to skip; repeat the flag to skip several.
    #[arg(long = "skip-task")]
    pub skip_tasks: Vec<String>,

    /// Optional path to a TOML configuration file.
    #[arg(long, env = "HANLP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the composed request body instead of calling the service.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Resolve the client configuration from file, environment and flags.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the configuration file cannot be read
    /// or contains invalid values, and [`CliError::Invalid`] if the resolved
    /// configuration does not validate.
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => Figment::new()
                .merge(Toml::file(path))
                .extract::<ClientConfig>()
                .map_err(Box::new)?,
            None => ClientConfig::default(),
        };
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(auth) = &self.auth {
            config.auth = Some(auth.clone());
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if !self.tasks.is_empty() {
            config.tasks = self.tasks.clone();
        }
        if !self.skip_tasks.is_empty() {
            config.skip_tasks = self.skip_tasks.clone();
        }
        Ok(config.validate()?)
    }

    /// The text payload: a single document, or pre-split sentences when
    /// several arguments were given.
    #[must_use]
    pub fn text_input(&self) -> TextInput {
        match self.text.as_slice() {
            [single] => TextInput::Single(single.clone()),
            _ => TextInput::Sentences(self.text.clone()),
        }
    }

    /// Compose the parse request body this invocation would send.
    #[must_use]
    pub fn request(&self, config: &ClientConfig) -> ApiRequest {
        ApiRequest::for_parse(self.text_input(), config, &CallOptions::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap_or_else(|e| panic!("unexpected parse error: {e}"))
    }

    #[rstest]
    fn requires_text() {
        assert!(CliArgs::try_parse_from(["hanlp"]).is_err());
    }

    #[rstest]
    fn single_argument_is_a_document() {
        let args = parse(&["hanlp", "北京"]);
        assert_eq!(args.text_input(), TextInput::Single("北京".to_owned()));
    }

    #[rstest]
    fn several_arguments_are_sentences() {
        let args = parse(&["hanlp", "北京", "上海"]);
        assert_eq!(
            args.text_input(),
            TextInput::Sentences(vec!["北京".to_owned(), "上海".to_owned()])
        );
    }

    #[rstest]
    fn flags_override_defaults() {
        let args = parse(&[
            "hanlp",
            "--url",
            "http://localhost/api",
            "--task",
            "ner",
            "--task",
            "pos",
            "text",
        ]);
        let config = args
            .client_config()
            .unwrap_or_else(|e| panic!("unexpected config error: {e}"));
        assert_eq!(config.base_url, "http://localhost/api");
        assert_eq!(config.tasks, vec!["ner".to_owned(), "pos".to_owned()]);
    }
}

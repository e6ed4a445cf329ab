//! Blocking client for the HanLP RESTful NLP API.
//!
//! The service answers one JSON document per request, keyed by task family
//! (`tok/fine`, `pos/ctb`, `ner/msra`, `srl`, `dep`, `sdp`, `con`, ...).
//! Tuple payloads arrive as positional JSON arrays; this crate decodes them
//! into the strongly typed [`Document`] structure, dropping individual
//! malformed tuples rather than failing the whole response.
//!
//! # Examples
//!
//! ```no_run
//! use hanlp_client::{CallOptions, ClientConfig, HanlpClient};
//!
//! # fn main() -> Result<(), hanlp_client::HanlpError> {
//! let client = HanlpClient::new(ClientConfig::new().with_auth("token"));
//! let doc = client.parse(
//!     "阿婆主来到北京立方庭参观自然语义科技公司。",
//!     &CallOptions::new().with_tasks(["tok/fine", "ner/msra"]),
//! )?;
//! if let Some(sentences) = &doc.tok_fine {
//!     println!("{} tokens", sentences[0].len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
mod decode;
pub mod document;
pub mod request;

pub use client::{HanlpClient, HanlpError};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use document::{ConstituencyNode, DependencyArc, Document, NamedEntity, RoleArgument};
pub use request::{ApiRequest, CallOptions, TextInput};

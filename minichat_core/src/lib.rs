#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared types for the minichat workspace.
//!
//! Everything that more than one crate needs lives here: the turn and
//! snapshot record types, the generation seam and the error type of the
//! memory layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod error;
pub mod turn;
pub mod util;

pub use error::MemoryError;
pub use turn::{RawTurnRecord, Turn, TurnRecord};
pub use util::clean_response;

/// Speaker of one side of a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Prefix used for this role in a rendered prompt.
    #[must_use]
    pub const fn prompt_prefix(self) -> &'static str {
        match self {
            Self::User => "Human",
            Self::Assistant => "Assistant",
        }
    }
}

/// Descriptive information about a generator, shown by `/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub model_name: String,
    pub backend: String,
}

/// The text generation collaborator.
///
/// Receives the rendered prompt as its only context and returns one
/// response string, already post-processed.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
    fn model_name(&self) -> &str;
    fn describe(&self) -> GeneratorInfo;
}

#[async_trait]
impl<T: ResponseGenerator + ?Sized> ResponseGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        (**self).generate(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn describe(&self) -> GeneratorInfo {
        (**self).describe()
    }
}

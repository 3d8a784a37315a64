//! Error type for the matching library.

use thiserror::Error;

/// Errors produced by query parsing, record decoding and configuration.
///
/// An empty candidate list is not an error; it resolves to `MatchResult::NoMatch`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Raw query was empty or whitespace-only.
    #[error("invalid query: input is empty")]
    InvalidQuery,

    /// A provider record could not be turned into a candidate.
    #[error("record {index}: {reason}")]
    Record { index: usize, reason: String },

    /// Provider payload was not valid JSON.
    #[error("malformed provider payload: {0}")]
    Payload(String),

    /// Resolver tunables out of range.
    #[error("invalid resolver config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        ResolveError::Payload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

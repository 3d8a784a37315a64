//! Free-text song query resolution against music-search provider results.
//!
//! Parse a query, normalize titles and artists, score candidates and decide
//! between a single match and a shortlist for the caller to disambiguate.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod query;
pub mod records;
pub mod resolver;
pub mod safety;
pub mod scoring;
pub mod selection;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use models::{Candidate, CandidateId, MatchResult, Query, ScoredCandidate, ShortlistReason};
pub use resolver::{resolve, Resolver};

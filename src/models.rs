//! Core data models for query resolution.
//!
//! Candidates come from an external search provider and are read-only here.
//! Everything else is derived per resolution call and discarded afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Candidate
// ============================================================================

/// Provider-side identifier. Netease and myfreemp3 hand out integers, QQ and
/// Kugou hand out strings (mid / hash).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Int(i64),
    Text(String),
}

impl Default for CandidateId {
    fn default() -> Self {
        CandidateId::Text(String::new())
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Int(n) => write!(f, "{}", n),
            CandidateId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(n: i64) -> Self {
        CandidateId::Int(n)
    }
}

impl From<i32> for CandidateId {
    fn from(n: i32) -> Self {
        CandidateId::Int(n.into())
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        CandidateId::Text(s.to_string())
    }
}

/// One search-result record from a music-search provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub id: CandidateId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u64>,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>, title: &str, artist: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: None,
            duration_sec: None,
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// A parsed user query. Built by [`crate::query::parse`]; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    raw: String,
    title_hint: Option<String>,
    artist_hint: Option<String>,
    is_split: bool,
}

impl Query {
    pub(crate) fn split(raw: &str, title: &str, artist: &str) -> Self {
        Self {
            raw: raw.to_string(),
            title_hint: Some(title.to_string()),
            artist_hint: Some(artist.to_string()),
            is_split: true,
        }
    }

    pub(crate) fn keyword(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            title_hint: Some(raw.to_string()),
            artist_hint: None,
            is_split: false,
        }
    }

    /// Trimmed input the query was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn title_hint(&self) -> Option<&str> {
        self.title_hint.as_deref()
    }

    pub fn artist_hint(&self) -> Option<&str> {
        self.artist_hint.as_deref()
    }

    pub fn is_split(&self) -> bool {
        self.is_split
    }
}

// ============================================================================
// Scoring / Result Models
// ============================================================================

/// Candidate that passed every active hard filter, with its points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a Candidate,
    pub score: i32,
    pub title_matched: bool,
    pub artist_matched: bool,
}

impl ScoredCandidate<'_> {
    pub fn is_eligible(&self) -> bool {
        self.title_matched && self.artist_matched
    }
}

/// Why a shortlist was returned instead of a single match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortlistReason {
    /// Bare keyword that exactly names the artist of enough candidates.
    #[serde(rename = "artist-intent")]
    ArtistIntent,
    #[serde(rename = "no confident title match")]
    NoConfidentTitleMatch,
    #[serde(rename = "no exact pair match")]
    NoExactPairMatch,
}

impl ShortlistReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ShortlistReason::ArtistIntent => "artist-intent",
            ShortlistReason::NoConfidentTitleMatch => "no confident title match",
            ShortlistReason::NoExactPairMatch => "no exact pair match",
        }
    }
}

impl fmt::Display for ShortlistReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a resolution call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    SingleMatch {
        candidate: Candidate,
    },
    Shortlist {
        candidates: Vec<Candidate>,
        reason: ShortlistReason,
    },
    NoMatch,
}

impl MatchResult {
    /// Short label used in batch stats and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::SingleMatch { .. } => "single_match",
            MatchResult::Shortlist { .. } => "shortlist",
            MatchResult::NoMatch => "no_match",
        }
    }

    pub fn single(&self) -> Option<&Candidate> {
        match self {
            MatchResult::SingleMatch { candidate } => Some(candidate),
            _ => None,
        }
    }

    pub fn shortlist(&self) -> Option<(&[Candidate], ShortlistReason)> {
        match self {
            MatchResult::Shortlist { candidates, reason } => Some((candidates.as_slice(), *reason)),
            _ => None,
        }
    }
}

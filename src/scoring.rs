//! Candidate scoring.
//!
//! Integer point system, higher is better:
//! - Artist hint is a hard filter: exact match after normalization or rejection
//! - Title hint is graded: exact, query-in-candidate, candidate-in-query, or rejection
//!
//! A hint that normalizes to an empty string is treated as absent. An empty
//! candidate title is contained in every title hint and earns the lowest tier.

use tracing::trace;

use crate::models::{Candidate, Query, ScoredCandidate};
use crate::normalize::normalize;

// ============================================================================
// Points
// ============================================================================

pub const ARTIST_EXACT_POINTS: i32 = 10;
pub const TITLE_EXACT_POINTS: i32 = 10;
/// Normalized query title found inside the candidate title.
pub const TITLE_CONTAINS_POINTS: i32 = 5;
/// Normalized candidate title found inside the query title.
pub const TITLE_CONTAINED_POINTS: i32 = 4;

// ============================================================================
// Hints
// ============================================================================

/// Query hints normalized once per resolution call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedHints {
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl NormalizedHints {
    pub fn from_query(query: &Query) -> Self {
        Self {
            title: query.title_hint().map(normalize).filter(|s| !s.is_empty()),
            artist: query.artist_hint().map(normalize).filter(|s| !s.is_empty()),
        }
    }
}

/// Why a candidate was excluded from ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    ArtistMismatch,
    TitleMismatch,
}

// ============================================================================
// Scoring
// ============================================================================

/// Title points for a normalized pair, or `None` when neither contains the other.
pub fn title_points(hint: &str, title: &str) -> Option<i32> {
    if hint == title {
        Some(TITLE_EXACT_POINTS)
    } else if title.contains(hint) {
        Some(TITLE_CONTAINS_POINTS)
    } else if hint.contains(title) {
        Some(TITLE_CONTAINED_POINTS)
    } else {
        None
    }
}

/// Score one candidate against pre-normalized hints.
pub fn score_with_hints<'a>(
    hints: &NormalizedHints,
    candidate: &'a Candidate,
) -> Result<ScoredCandidate<'a>, Rejection> {
    let mut score = 0;

    if let Some(artist_hint) = &hints.artist {
        if normalize(&candidate.artist) != *artist_hint {
            return Err(Rejection::ArtistMismatch);
        }
        score += ARTIST_EXACT_POINTS;
    }

    if let Some(title_hint) = &hints.title {
        match title_points(title_hint, &normalize(&candidate.title)) {
            Some(points) => score += points,
            None => return Err(Rejection::TitleMismatch),
        }
    }

    Ok(ScoredCandidate {
        candidate,
        score,
        title_matched: true,
        artist_matched: true,
    })
}

/// Score one candidate against a query.
pub fn score<'a>(query: &Query, candidate: &'a Candidate) -> Result<ScoredCandidate<'a>, Rejection> {
    score_with_hints(&NormalizedHints::from_query(query), candidate)
}

/// Highest-scoring eligible candidate. Strictly greater wins, so the
/// first-seen candidate keeps ties.
pub fn best_match<'a>(query: &Query, candidates: &'a [Candidate]) -> Option<ScoredCandidate<'a>> {
    best_match_with_hints(&NormalizedHints::from_query(query), candidates)
}

pub fn best_match_with_hints<'a>(
    hints: &NormalizedHints,
    candidates: &'a [Candidate],
) -> Option<ScoredCandidate<'a>> {
    let mut best: Option<ScoredCandidate<'a>> = None;

    for (idx, candidate) in candidates.iter().enumerate() {
        match score_with_hints(hints, candidate) {
            Ok(scored) => {
                if best.as_ref().map_or(true, |b| scored.score > b.score) {
                    best = Some(scored);
                }
            }
            Err(reason) => {
                trace!(idx, id = %candidate.id, ?reason, "candidate rejected");
            }
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================

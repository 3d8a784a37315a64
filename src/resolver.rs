//! Match resolution: parse, classify, score, decide.
//!
//! ```text
//! parse ──┬─ split ───── score(title, artist) ── SingleMatch | Shortlist(no exact pair match)
//!         └─ keyword ─── artist intent? ─┬─ yes ── Shortlist(artist-intent)
//!                                         └─ no ─── score(title) ── SingleMatch | Shortlist(no confident title match)
//! ```
//!
//! Pure computation over caller-supplied inputs. No I/O, no shared state, so a
//! `Resolver` can be shared across threads freely.

use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::models::{Candidate, MatchResult, Query, ShortlistReason};
use crate::normalize::normalize;
use crate::query::parse;
use crate::scoring::{best_match_with_hints, NormalizedHints};

/// Resolve with default thresholds.
pub fn resolve(raw: &str, candidates: &[Candidate]) -> Result<MatchResult> {
    Resolver::default().resolve(raw, candidates)
}

/// Candidates whose normalized artist equals `hint_norm`, in provider order.
pub fn exact_artist_hits<'a>(hint_norm: &str, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| normalize(&c.artist) == hint_norm)
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Parse `raw` and resolve it against `candidates`.
    ///
    /// Fails only with `InvalidQuery`. An empty candidate list yields `NoMatch`.
    pub fn resolve(&self, raw: &str, candidates: &[Candidate]) -> Result<MatchResult> {
        let query = parse(raw)?;
        Ok(self.resolve_query(&query, candidates))
    }

    pub fn resolve_query(&self, query: &Query, candidates: &[Candidate]) -> MatchResult {
        if candidates.is_empty() {
            debug!(query = query.raw(), "no candidates");
            return MatchResult::NoMatch;
        }

        if query.is_split() {
            self.resolve_pair(query, candidates)
        } else {
            self.resolve_keyword(query, candidates)
        }
    }

    /// "title-artist" input: artist is a hard filter, best title wins.
    fn resolve_pair(&self, query: &Query, candidates: &[Candidate]) -> MatchResult {
        let hints = NormalizedHints::from_query(query);
        if let Some(best) = best_match_with_hints(&hints, candidates) {
            debug!(id = %best.candidate.id, score = best.score, "exact pair match");
            return single(best.candidate);
        }
        debug!(query = query.raw(), "no exact pair match");
        self.fallback(candidates, ShortlistReason::NoExactPairMatch)
    }

    /// Bare keyword: decide between artist intent and title intent.
    fn resolve_keyword(&self, query: &Query, candidates: &[Candidate]) -> MatchResult {
        let hints = NormalizedHints::from_query(query);
        // An empty keyword still names the candidates with no artist
        let hint_norm = hints.title.as_deref().unwrap_or_default();

        let artist_hits = exact_artist_hits(hint_norm, candidates);
        debug!(
            hits = artist_hits.len(),
            threshold = self.config.artist_intent_threshold,
            "exact artist hits for keyword"
        );
        if artist_hits.len() >= self.config.artist_intent_threshold {
            return MatchResult::Shortlist {
                candidates: artist_hits
                    .into_iter()
                    .take(self.config.artist_shortlist_cap)
                    .cloned()
                    .collect(),
                reason: ShortlistReason::ArtistIntent,
            };
        }

        match best_match_with_hints(&hints, candidates) {
            Some(best) => {
                debug!(id = %best.candidate.id, score = best.score, "title match");
                single(best.candidate)
            }
            None => self.fallback(candidates, ShortlistReason::NoConfidentTitleMatch),
        }
    }

    /// Leading slice of the unfiltered provider list.
    fn fallback(&self, candidates: &[Candidate], reason: ShortlistReason) -> MatchResult {
        MatchResult::Shortlist {
            candidates: candidates
                .iter()
                .take(self.config.fallback_shortlist_cap)
                .cloned()
                .collect(),
            reason,
        }
    }
}

fn single(candidate: &Candidate) -> MatchResult {
    MatchResult::SingleMatch {
        candidate: candidate.clone(),
    }
}

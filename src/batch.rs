//! Batch resolution: many queries, each with its own provider result list.
//!
//! Jobs are independent, so they run on the rayon pool with no locking. Output
//! keeps input order.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::models::{Candidate, MatchResult};
use crate::progress::{Phase, Reporter};
use crate::records::candidate_from_value;
use crate::resolver::Resolver;

/// One line of batch input: a query and the raw records its search returned.
#[derive(Clone, Debug, Deserialize)]
pub struct Job {
    pub query: String,
    #[serde(default)]
    pub candidates: Vec<Value>,
}

/// Result of one job. Exactly one of `result` / `error` is set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn decode(records: &[Value]) -> Result<Vec<Candidate>> {
    records
        .iter()
        .enumerate()
        .map(|(i, v)| candidate_from_value(i, v))
        .collect()
}

pub fn run_job(resolver: &Resolver, job: &Job) -> Outcome {
    let resolved = decode(&job.candidates).and_then(|cands| resolver.resolve(&job.query, &cands));
    match resolved {
        Ok(result) => Outcome {
            query: job.query.clone(),
            result: Some(result),
            error: None,
        },
        Err(e) => Outcome {
            query: job.query.clone(),
            result: None,
            error: Some(e.to_string()),
        },
    }
}

/// Resolve every job in parallel, reporting once per finished job.
pub fn resolve_batch(resolver: &Resolver, jobs: &[Job], reporter: &Reporter) -> Vec<Outcome> {
    let done = AtomicU64::new(0);
    let total = jobs.len() as u64;
    let pb = reporter.start(Phase::Resolving, Some(total));

    let outcomes: Vec<Outcome> = jobs
        .par_iter()
        .map(|job| {
            let outcome = run_job(resolver, job);
            pb.inc(1);
            let current = done.fetch_add(1, Ordering::Relaxed) + 1;
            reporter.tick(Phase::Resolving, current, total);
            outcome
        })
        .collect();
    pb.finish_and_clear();
    outcomes
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub single_match: usize,
    pub shortlist: usize,
    pub no_match: usize,
    pub errors: usize,
    /// Shortlist count per reason label.
    pub shortlist_reasons: FxHashMap<String, usize>,
}

impl BatchStats {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut stats = BatchStats {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Some(MatchResult::SingleMatch { .. }) => stats.single_match += 1,
                Some(MatchResult::Shortlist { reason, .. }) => {
                    stats.shortlist += 1;
                    *stats
                        .shortlist_reasons
                        .entry(reason.as_str().to_string())
                        .or_default() += 1;
                }
                Some(MatchResult::NoMatch) => stats.no_match += 1,
                None => stats.errors += 1,
            }
        }
        stats
    }

    /// Reason counts sorted by label, for stable printing.
    pub fn sorted_reasons(&self) -> Vec<(&str, usize)> {
        let mut reasons: Vec<(&str, usize)> = self
            .shortlist_reasons
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        reasons.sort_unstable();
        reasons
    }
}

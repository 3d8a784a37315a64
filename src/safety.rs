//! File-system safety helpers for the binaries.
//!
//! Output paths are checked before anything is written, and download file names
//! for the sink are reduced to a portable character set.

use anyhow::{bail, Result};
use std::path::Path;

use crate::models::Candidate;

/// Validates that a batch output path is safe to overwrite.
///
/// Checks:
/// - Output must be a `.json` file
/// - Output cannot be the same file as any input (compared after canonicalizing
///   when both exist)
pub fn validate_output_path(output: &Path, source_paths: &[&Path]) -> Result<()> {
    let is_json = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        bail!(
            "Safety check failed: output file '{}' must have a .json extension",
            output.display()
        );
    }

    let output_canon = output.canonicalize().ok();
    for source in source_paths {
        let same_canon = match (&output_canon, source.canonicalize().ok()) {
            (Some(o), Some(s)) => *o == s,
            _ => false,
        };
        if output == *source || same_canon {
            bail!(
                "Safety check failed: output '{}' cannot be the same as input '{}'",
                output.display(),
                source.display()
            );
        }
    }

    Ok(())
}

/// Keep alphanumerics (any script), space, '.' and '_'.
fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// File name for a downloaded track: `"{title} - {artist}_{id}.{ext}"`.
pub fn safe_file_name(candidate: &Candidate, ext: &str) -> String {
    format!(
        "{} - {}_{}.{}",
        sanitize(&candidate.title),
        sanitize(&candidate.artist),
        sanitize(&candidate.id.to_string()),
        ext.trim_start_matches('.')
    )
}

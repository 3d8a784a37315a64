//! Resolver tunables.
//!
//! The defaults are the thresholds the scraper scripts shipped with. They can be
//! loaded from a JSON file; missing keys keep their defaults.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ResolveError, Result};

/// Exact-artist hits needed before a bare keyword is read as an artist name.
pub const DEFAULT_ARTIST_INTENT_THRESHOLD: usize = 5;
/// Most candidates returned for an artist-intent shortlist.
pub const DEFAULT_ARTIST_SHORTLIST_CAP: usize = 50;
/// Most candidates returned when nothing matched confidently.
pub const DEFAULT_FALLBACK_SHORTLIST_CAP: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub artist_intent_threshold: usize,
    pub artist_shortlist_cap: usize,
    pub fallback_shortlist_cap: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            artist_intent_threshold: DEFAULT_ARTIST_INTENT_THRESHOLD,
            artist_shortlist_cap: DEFAULT_ARTIST_SHORTLIST_CAP,
            fallback_shortlist_cap: DEFAULT_FALLBACK_SHORTLIST_CAP,
        }
    }
}

impl ResolverConfig {
    /// All three values must be at least 1.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("artist_intent_threshold", self.artist_intent_threshold),
            ("artist_shortlist_cap", self.artist_shortlist_cap),
            ("fallback_shortlist_cap", self.fallback_shortlist_cap),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ResolveError::Config(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ResolveError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}

/// Command-line tunables shared by the binaries. Flags override the file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON file with resolver tunables
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exact-artist hits needed to treat a bare keyword as an artist
    #[arg(long)]
    pub artist_threshold: Option<usize>,

    /// Max candidates in an artist-intent shortlist
    #[arg(long)]
    pub artist_cap: Option<usize>,

    /// Max candidates in a fallback shortlist
    #[arg(long)]
    pub fallback_cap: Option<usize>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_file(path)?,
            None => ResolverConfig::default(),
        };
        if let Some(n) = self.artist_threshold {
            config.artist_intent_threshold = n;
        }
        if let Some(n) = self.artist_cap {
            config.artist_shortlist_cap = n;
        }
        if let Some(n) = self.fallback_cap {
            config.fallback_shortlist_cap = n;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.artist_intent_threshold, 5);
        assert_eq!(config.artist_shortlist_cap, 50);
        assert_eq!(config.fallback_shortlist_cap, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ResolverConfig::from_json(r#"{"artist_intent_threshold": 3}"#).unwrap();
        assert_eq!(config.artist_intent_threshold, 3);
        assert_eq!(config.artist_shortlist_cap, 50);
    }

    #[test]
    fn test_zero_rejected() {
        let result = ResolverConfig::from_json(r#"{"fallback_shortlist_cap": 0}"#);
        assert!(matches!(result, Err(ResolveError::Config(msg)) if msg.contains("fallback_shortlist_cap")));
    }

    #[test]
    fn test_flags_override() {
        let args = ConfigArgs {
            artist_threshold: Some(3),
            fallback_cap: Some(20),
            ..Default::default()
        };
        let config = args.load().unwrap();
        assert_eq!(config.artist_intent_threshold, 3);
        assert_eq!(config.artist_shortlist_cap, 50);
        assert_eq!(config.fallback_shortlist_cap, 20);

        let zero = ConfigArgs {
            artist_cap: Some(0),
            ..Default::default()
        };
        assert!(zero.load().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ResolverConfig::from_json("{not json"),
            Err(ResolveError::Payload(_))
        ));
    }
}

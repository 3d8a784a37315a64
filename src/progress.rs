//! Progress reporting for batch runs.
//!
//! Each batch phase gets one indicatif display on stderr: a spinner while the
//! job count is unknown, a bar once it is. In log-only mode displays stay hidden
//! and periodic `tracing` lines are emitted instead.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tracing::info;

const BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})";
const SPINNER_TEMPLATE: &str = "{msg} {spinner} [{elapsed_precise}]";

/// Stages of a batch run, in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Reading,
    Resolving,
    Writing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Reading => "Reading jobs",
            Phase::Resolving => "Resolving",
            Phase::Writing => "Writing results",
        }
    }
}

/// How a batch run reports progress.
#[derive(Clone, Copy, Debug)]
pub struct Reporter {
    log_only: bool,
    log_interval: u64,
}

impl Reporter {
    pub fn new(log_only: bool, log_interval: u64) -> Self {
        Self {
            log_only,
            log_interval,
        }
    }

    /// Never draws and never logs.
    pub fn silent() -> Self {
        Self::new(true, 0)
    }

    /// Display for `phase`. `len` of `None` gives a spinner.
    pub fn start(&self, phase: Phase, len: Option<u64>) -> ProgressBar {
        let (pb, template) = match len {
            Some(n) => (ProgressBar::new(n), BAR_TEMPLATE),
            None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
        };
        pb.set_message(phase.label());
        if self.log_only {
            pb.set_draw_target(ProgressDrawTarget::hidden());
            return pb;
        }
        if let Ok(style) = ProgressStyle::with_template(template) {
            pb.set_style(style.progress_chars("=> "));
        }
        if len.is_none() {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        pb
    }

    /// Emit a progress line for `phase` at reporting points. Log-only mode only.
    pub fn tick(&self, phase: Phase, current: u64, total: u64) {
        if self.log_only && total > 0 && should_log(current, total, self.log_interval) {
            let pct = 100.0 * current as f64 / total as f64;
            info!(phase = phase.label(), "{}/{} ({:.1}%)", current, total, pct);
        }
    }
}

/// "850ms", "12.3s" or "2.1m".
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

/// Whether `current` is a reporting point: every `interval` items, and the last one.
pub fn should_log(current: u64, total: u64, interval: u64) -> bool {
    interval > 0 && (current % interval == 0 || current == total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(850)), "850ms");
        assert_eq!(format_duration(Duration::from_millis(12_340)), "12.3s");
        assert_eq!(format_duration(Duration::from_secs(126)), "2.1m");
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(100, 1000, 100));
        assert!(!should_log(101, 1000, 100));
        assert!(should_log(1000, 1000, 300));
        assert!(should_log(7, 7, 100));
        assert!(!should_log(5, 10, 0));
    }

    #[test]
    fn test_log_only_displays_are_hidden() {
        let reporter = Reporter::new(true, 10);
        let bar = reporter.start(Phase::Resolving, Some(5));
        assert!(bar.is_hidden());
        assert_eq!(bar.length(), Some(5));
        assert_eq!(bar.message(), "Resolving");

        let spinner = reporter.start(Phase::Reading, None);
        assert!(spinner.is_hidden());
        assert_eq!(spinner.message(), "Reading jobs");
    }
}

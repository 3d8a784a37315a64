//! String normalization for title/artist comparison.
//!
//! Titles and artists go through the same pipeline so that a hint typed by a
//! user and a record returned by a provider compare on equal footing.
//!
//! Any change here shifts every score the resolver produces. Run tests after changes.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Bracketed annotations in the four styles providers use:
/// "(Live)", "（翻自 王力宏）", "[Remix]", "【伴奏】".
/// Non-greedy and non-recursive: each opener consumes up to its nearest closer.
pub static BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\(.*?\)|（.*?）|\[.*?\]|【.*?】").unwrap()
});

/// Trailing release-variant qualifier: "心跳 - Live", "晴天-伴奏", "Song - Remix 2020".
/// Everything from the dash to the end of the string goes.
pub static QUALIFIER_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\s*-\s*(?:live|伴奏|demo|纯音乐|remix|现场版|粤语版|国语版).*$").unwrap()
});

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Remove every bracketed span. Unbalanced openers are left in place.
pub fn strip_brackets(s: &str) -> String {
    BRACKETED.replace_all(s, "").into_owned()
}

/// Cut a trailing variant qualifier, if any.
pub fn strip_qualifier_suffix(s: &str) -> String {
    QUALIFIER_SUFFIX.replace(s, "").into_owned()
}

/// Normalize a title or artist for matching.
///
/// Strips bracketed content, then a trailing variant qualifier, then trims and
/// lowercases. CJK text has no case and passes through unchanged.
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let result = strip_brackets(s);
    let result = strip_qualifier_suffix(&result);
    result.trim().to_lowercase()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_all_bracket_styles() {
        assert_eq!(normalize("心跳 (Live)"), "心跳");
        assert_eq!(normalize("心跳（翻自 王力宏）"), "心跳");
        assert_eq!(normalize("心跳 [Remix]"), "心跳");
        assert_eq!(normalize("心跳【伴奏】"), "心跳");
    }

    #[test]
    fn test_brackets_non_greedy() {
        assert_eq!(strip_brackets("a (b) c (d) e"), "a  c  e");
        // Nested: the inner closer ends the span, the outer one survives
        assert_eq!(strip_brackets("x (a (b) c) y"), "x  c) y");
    }

    #[test]
    fn test_unbalanced_bracket_kept() {
        assert_eq!(normalize("Song (unfinished"), "song (unfinished");
    }

    #[test]
    fn test_bracket_annotation_matches_plain_title() {
        assert_eq!(
            normalize("遗失的心跳 (心跳100影音庆功版)"),
            normalize("遗失的心跳")
        );
    }

    #[test]
    fn test_qualifier_suffix() {
        assert_eq!(normalize("晴天 - Live"), "晴天");
        assert_eq!(normalize("晴天-伴奏"), "晴天");
        assert_eq!(normalize("晴天 -纯音乐版"), "晴天");
        assert_eq!(normalize("Hello - REMIX by someone"), "hello");
        assert_eq!(normalize("稻香 - 现场版 2019"), "稻香");
        assert_eq!(normalize("红豆 - 粤语版"), "红豆");
        assert_eq!(normalize("红豆 - 国语版"), "红豆");
        assert_eq!(normalize("Track - Demo"), "track");
    }

    #[test]
    fn test_dash_without_qualifier_kept() {
        assert_eq!(normalize("A-Lin"), "a-lin");
        assert_eq!(normalize("Love - Story"), "love - story");
    }

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  Jay Chou  "), "jay chou");
        assert_eq!(normalize("周杰伦"), "周杰伦");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "遗失的心跳 (心跳100影音庆功版)",
            "x (a (b) c) y",
            "((a)) - Live",
            "【a(b】c) - remix",
            "Song (unfinished",
            "  MiXeD Case - 伴奏 ",
            "a - b - Live (x)",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }
}

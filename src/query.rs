//! Free-text query parsing.
//!
//! Users type either "歌名-歌手", "歌名 歌手", a bare title, or a bare artist.
//! This is a heuristic, not a grammar: anything ambiguous becomes a bare keyword.

use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::models::Query;

/// Pick the separator to split on: a lone hyphen first, then a lone space.
fn split_char(input: &str) -> Option<char> {
    if input.matches('-').count() == 1 {
        Some('-')
    } else if input.matches(' ').count() == 1 {
        Some(' ')
    } else {
        None
    }
}

/// Parse raw user input into a [`Query`].
///
/// Splitting uses the right-most separator so "Hello World - Adele" keeps its
/// multi-word title. Both halves must be non-empty after trimming, otherwise
/// the whole input is treated as a title keyword.
pub fn parse(raw: &str) -> Result<Query> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ResolveError::InvalidQuery);
    }

    if let Some(sep) = split_char(input) {
        if let Some((left, right)) = input.rsplit_once(sep) {
            let (title, artist) = (left.trim(), right.trim());
            if !title.is_empty() && !artist.is_empty() {
                debug!(title, artist, "query split into title/artist pair");
                return Ok(Query::split(input, title, artist));
            }
        }
        debug!(input, "separator found but one side is empty, using keyword");
    }

    Ok(Query::keyword(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(parse(""), Err(ResolveError::InvalidQuery));
        assert_eq!(parse("   "), Err(ResolveError::InvalidQuery));
        assert_eq!(parse("\t\n"), Err(ResolveError::InvalidQuery));
    }

    #[test]
    fn test_hyphen_split() {
        let q = parse("爱在西元前-周杰伦").unwrap();
        assert!(q.is_split());
        assert_eq!(q.title_hint(), Some("爱在西元前"));
        assert_eq!(q.artist_hint(), Some("周杰伦"));
    }

    #[test]
    fn test_hyphen_split_keeps_multiword_title() {
        let q = parse("  Hello World - Adele ").unwrap();
        assert!(q.is_split());
        assert_eq!(q.title_hint(), Some("Hello World"));
        assert_eq!(q.artist_hint(), Some("Adele"));
        assert_eq!(q.raw(), "Hello World - Adele");
    }

    #[test]
    fn test_single_space_split() {
        let q = parse("心跳 王力宏").unwrap();
        assert!(q.is_split());
        assert_eq!(q.title_hint(), Some("心跳"));
        assert_eq!(q.artist_hint(), Some("王力宏"));
    }

    #[test]
    fn test_multiple_hyphens_fall_back() {
        let q = parse("a-b-c").unwrap();
        assert!(!q.is_split());
        assert_eq!(q.title_hint(), Some("a-b-c"));
        assert_eq!(q.artist_hint(), None);
    }

    #[test]
    fn test_multiple_hyphens_with_single_space_split_on_space() {
        let q = parse("A-Lin-x Jay").unwrap();
        assert!(q.is_split());
        assert_eq!(q.title_hint(), Some("A-Lin-x"));
        assert_eq!(q.artist_hint(), Some("Jay"));
    }

    #[test]
    fn test_multiple_spaces_fall_back() {
        let q = parse("the sound of silence").unwrap();
        assert!(!q.is_split());
        assert_eq!(q.title_hint(), Some("the sound of silence"));
    }

    #[test]
    fn test_empty_side_falls_back() {
        let q = parse("晴天-").unwrap();
        assert!(!q.is_split());
        assert_eq!(q.title_hint(), Some("晴天-"));

        let q = parse("- 周杰伦").unwrap();
        assert!(!q.is_split());
    }

    #[test]
    fn test_bare_keyword() {
        let q = parse("心跳").unwrap();
        assert!(!q.is_split());
        assert_eq!(q.title_hint(), Some("心跳"));
        assert_eq!(q.artist_hint(), None);
    }
}

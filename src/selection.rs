//! Parsing a user's pick from a displayed shortlist.
//!
//! Accepted forms (1-based, as shown to the user): `3`, `1,3,5`, `2-6`,
//! mixes like `1,4-6`, `all`, and `0` to cancel.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection is empty")]
    Empty,
    #[error("'{0}' is not a number or range")]
    Malformed(String),
    #[error("'{part}' is outside 1-{max}")]
    OutOfRange { part: String, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Cancel,
    /// Sorted, deduplicated, 0-based indices.
    Indices(Vec<usize>),
}

fn parse_index(part: &str, len: usize) -> Result<usize, SelectionError> {
    let n: usize = part
        .parse()
        .map_err(|_| SelectionError::Malformed(part.to_string()))?;
    if n == 0 || n > len {
        return Err(SelectionError::OutOfRange {
            part: part.to_string(),
            max: len,
        });
    }
    Ok(n - 1)
}

/// Parse a selection against a shortlist of `len` entries.
/// Any invalid part rejects the whole input.
pub fn parse_selection(input: &str, len: usize) -> Result<Selection, SelectionError> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    match compact.as_str() {
        "" => return Err(SelectionError::Empty),
        "0" => return Ok(Selection::Cancel),
        "all" => return Ok(Selection::Indices((0..len).collect())),
        _ => {}
    }

    let mut picked = Vec::new();
    for part in compact.split(',') {
        match part.split_once('-') {
            Some((start, end)) => {
                let start_idx = parse_index(start, len)?;
                let end_idx = parse_index(end, len)?;
                if start_idx > end_idx {
                    return Err(SelectionError::Malformed(part.to_string()));
                }
                picked.extend(start_idx..=end_idx);
            }
            None => picked.push(parse_index(part, len)?),
        }
    }

    picked.sort_unstable();
    picked.dedup();
    Ok(Selection::Indices(picked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_list() {
        assert_eq!(parse_selection("3", 10), Ok(Selection::Indices(vec![2])));
        assert_eq!(parse_selection("5, 1,3", 10), Ok(Selection::Indices(vec![0, 2, 4])));
    }

    #[test]
    fn test_ranges_merge_and_dedup() {
        assert_eq!(
            parse_selection("2-4,3,8-8", 10),
            Ok(Selection::Indices(vec![1, 2, 3, 7]))
        );
    }

    #[test]
    fn test_all_and_cancel() {
        assert_eq!(parse_selection(" ALL ", 3), Ok(Selection::Indices(vec![0, 1, 2])));
        assert_eq!(parse_selection("0", 3), Ok(Selection::Cancel));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_selection("  ", 3), Err(SelectionError::Empty));
        assert_eq!(parse_selection("x", 3), Err(SelectionError::Malformed("x".into())));
        assert_eq!(parse_selection("4-2", 5), Err(SelectionError::Malformed("4-2".into())));
        assert_eq!(
            parse_selection("1,11", 10),
            Err(SelectionError::OutOfRange { part: "11".into(), max: 10 })
        );
        assert!(matches!(parse_selection("0,1", 3), Err(SelectionError::OutOfRange { .. })));
        assert!(matches!(parse_selection("1,", 3), Err(SelectionError::Malformed(_))));
    }
}

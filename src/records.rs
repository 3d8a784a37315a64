//! Decoding provider search records into [`Candidate`]s.
//!
//! Each provider names its fields differently:
//! - myfreemp3: `title`, `author`, `songid`
//! - netease:   `name`, `ar: [{name}]`, `id`, `al: {name}`, `dt` (ms)
//! - QQ music:  `song`, `singer`, `id` / `mid`, `interval`
//! - kugou:     `songname`, `singername`, `hash`
//!
//! Missing fields decode as empty strings; only a non-object record is an error.

use serde_json::{Map, Value};

use crate::error::{ResolveError, Result};
use crate::models::{Candidate, CandidateId};

const TITLE_KEYS: &[&str] = &["title", "name", "song", "songname"];
const ARTIST_KEYS: &[&str] = &["artist", "author", "singer", "singername", "ar", "artists"];
const ID_KEYS: &[&str] = &["id", "songid", "mid", "hash"];

/// JSON pointers tried, in order, when the payload is an envelope object.
const LIST_POINTERS: &[&str] = &["/data/list", "/data", "/result/songs", "/list", "/songs"];

/// Netease joins multiple credited artists this way.
const ARTIST_JOINER: &str = ", ";

// ============================================================================
// Field Helpers
// ============================================================================

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A name held directly, or under `name` in a nested object.
fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::Object(o) => o.get("name").and_then(scalar_to_string),
        other => scalar_to_string(other),
    }
}

fn artist_of(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(name_of)
            .collect::<Vec<_>>()
            .join(ARTIST_JOINER),
        other => name_of(other).unwrap_or_default(),
    }
}

fn id_of(value: &Value) -> CandidateId {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(CandidateId::Int)
            .unwrap_or_else(|| CandidateId::Text(n.to_string())),
        Value::String(s) => CandidateId::Text(s.clone()),
        _ => CandidateId::default(),
    }
}

/// Parse "mm:ss" or "h:mm:ss" into seconds.
pub fn parse_clock(s: &str) -> Option<u64> {
    let mut total = 0u64;
    let mut parts = 0;
    for part in s.trim().split(':') {
        total = total.checked_mul(60)?.checked_add(part.trim().parse::<u64>().ok()?)?;
        parts += 1;
    }
    (parts >= 2).then_some(total)
}

fn seconds_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok().or_else(|| parse_clock(s)),
        _ => None,
    }
}

fn duration_of(obj: &Map<String, Value>) -> Option<u64> {
    if let Some(secs) = first_present(obj, &["duration_sec", "duration", "interval"]).and_then(seconds_of) {
        return Some(secs);
    }
    obj.get("dt").and_then(Value::as_u64).map(|ms| ms / 1000)
}

fn album_of(obj: &Map<String, Value>) -> Option<String> {
    first_present(obj, &["album", "al", "albumname"])
        .and_then(name_of)
        .filter(|s| !s.is_empty())
}

// ============================================================================
// Decoding
// ============================================================================

/// Map one provider record to a candidate. `index` is only used for errors.
pub fn candidate_from_value(index: usize, value: &Value) -> Result<Candidate> {
    let obj = value.as_object().ok_or_else(|| ResolveError::Record {
        index,
        reason: "expected a JSON object".to_string(),
    })?;

    Ok(Candidate {
        id: first_present(obj, ID_KEYS).map(id_of).unwrap_or_default(),
        title: first_present(obj, TITLE_KEYS)
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        artist: first_present(obj, ARTIST_KEYS).map(artist_of).unwrap_or_default(),
        album: album_of(obj),
        duration_sec: duration_of(obj),
    })
}

/// Locate the record list inside a provider payload.
pub fn record_list(payload: &Value) -> Result<&[Value]> {
    if let Some(items) = payload.as_array() {
        return Ok(items);
    }
    LIST_POINTERS
        .iter()
        .filter_map(|p| payload.pointer(p))
        .find_map(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ResolveError::Payload("no candidate list found".to_string()))
}

pub fn candidates_from_value(payload: &Value) -> Result<Vec<Candidate>> {
    record_list(payload)?
        .iter()
        .enumerate()
        .map(|(i, v)| candidate_from_value(i, v))
        .collect()
}

/// Decode a raw provider response body.
pub fn candidates_from_json(text: &str) -> Result<Vec<Candidate>> {
    let payload: Value = serde_json::from_str(text)?;
    candidates_from_value(&payload)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_myfreemp3_record() {
        let c = candidate_from_value(0, &json!({"title": "爱在西元前", "author": "周杰伦", "songid": 186001})).unwrap();
        assert_eq!(c.title, "爱在西元前");
        assert_eq!(c.artist, "周杰伦");
        assert_eq!(c.id, CandidateId::Int(186001));
    }

    #[test]
    fn test_netease_record() {
        let c = candidate_from_value(
            0,
            &json!({
                "id": 33497050,
                "name": "心跳",
                "ar": [{"name": "王力宏"}, {"name": "Someone"}],
                "al": {"name": "心跳"},
                "dt": 262000
            }),
        )
        .unwrap();
        assert_eq!(c.artist, "王力宏, Someone");
        assert_eq!(c.album.as_deref(), Some("心跳"));
        assert_eq!(c.duration_sec, Some(262));
    }

    #[test]
    fn test_qq_record() {
        let c = candidate_from_value(0, &json!({"mid": "0039MnYb0qxYhV", "song": "晴天", "singer": "周杰伦", "interval": "04:29"})).unwrap();
        assert_eq!(c.id, CandidateId::Text("0039MnYb0qxYhV".into()));
        assert_eq!(c.title, "晴天");
        assert_eq!(c.duration_sec, Some(269));
    }

    #[test]
    fn test_kugou_record() {
        let c = candidate_from_value(0, &json!({"songname": "稻香", "singername": "周杰伦", "hash": "ABCDEF"})).unwrap();
        assert_eq!(c.title, "稻香");
        assert_eq!(c.artist, "周杰伦");
        assert_eq!(c.id, CandidateId::Text("ABCDEF".into()));
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let c = candidate_from_value(0, &json!({"title": null})).unwrap();
        assert_eq!(c, Candidate::default());
    }

    #[test]
    fn test_non_object_record_errors_with_index() {
        let err = candidates_from_value(&json!([{"title": "a"}, 42])).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Record {
                index: 1,
                reason: "expected a JSON object".to_string()
            }
        );
    }

    #[test]
    fn test_envelopes() {
        let myfreemp3 = r#"{"code": 200, "data": {"list": [{"title": "a", "author": "b"}]}}"#;
        assert_eq!(candidates_from_json(myfreemp3).unwrap().len(), 1);

        let netease = r#"{"code": 200, "result": {"songs": [{"name": "a"}, {"name": "b"}]}}"#;
        assert_eq!(candidates_from_json(netease).unwrap().len(), 2);

        let qq = r#"{"code": 200, "data": [{"song": "a"}]}"#;
        assert_eq!(candidates_from_json(qq).unwrap().len(), 1);

        let flat = r#"{"total": 3, "songs": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#;
        assert_eq!(candidates_from_json(flat).unwrap().len(), 3);

        // Earlier pointers win
        let both = r#"{"list": [{"name": "a"}], "songs": [{"name": "b"}, {"name": "c"}]}"#;
        assert_eq!(candidates_from_json(both).unwrap()[0].title, "a");

        assert!(matches!(candidates_from_json(r#"{"code": 500}"#), Err(ResolveError::Payload(_))));
        assert!(matches!(candidates_from_json("not json"), Err(ResolveError::Payload(_))));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("03:45"), Some(225));
        assert_eq!(parse_clock("1:02:03"), Some(3723));
        assert_eq!(parse_clock("245"), None);
        assert_eq!(parse_clock("ab:cd"), None);
    }
}

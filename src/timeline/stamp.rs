use chrono::DateTime;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

/// Wall-clock instant attached to decisions and hand results.
/// The server writes naive local ISO-8601; offsets are normalized to UTC.
pub type Stamp = NaiveDateTime;

/// Parses an ISO-8601 timestamp, with or without a UTC offset.
pub fn parse_stamp(s: &str) -> Option<Stamp> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.naive_utc()))
}

/// Absolute distance between two instants in milliseconds.
pub fn distance(a: Stamp, b: Stamp) -> i64 {
    (a - b).num_milliseconds().abs()
}

/// Serde adapter: missing, empty, or unparseable timestamps become `None`.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<Stamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_stamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parses_python_isoformat() {
        let stamp = parse_stamp("2025-03-01T12:30:05.123456").unwrap();
        assert_eq!(stamp.to_string(), "2025-03-01 12:30:05.123456");
    }
    #[test]
    fn parses_without_fraction() {
        assert!(parse_stamp("2025-03-01T12:30:05").is_some());
    }
    #[test]
    fn normalizes_offsets_to_utc() {
        let stamp = parse_stamp("2025-03-01T12:30:05+02:00").unwrap();
        assert_eq!(stamp, parse_stamp("2025-03-01T10:30:05").unwrap());
    }
    #[test]
    fn rejects_garbage() {
        assert!(parse_stamp("").is_none());
        assert!(parse_stamp("yesterday").is_none());
    }
    #[test]
    fn distance_is_symmetric() {
        let a = parse_stamp("2025-03-01T12:00:00").unwrap();
        let b = parse_stamp("2025-03-01T12:00:01.500").unwrap();
        assert_eq!(distance(a, b), 1500);
        assert_eq!(distance(b, a), 1500);
    }
}

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Server-assigned record identity.
/// The remote API is free to send ids as JSON numbers or strings; the shape
/// is preserved so a delete echoes back exactly what was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Creation time as sent by the remote store.
/// `raw` is kept verbatim for export; `instant` drives ordering and is `None`
/// when the text matches none of the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    instant: Option<NaiveDateTime>,
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl Timestamp {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let instant = DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.naive_utc())
            .ok()
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            });

        Self {
            raw: raw.to_string(),
            instant,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Ordering key. `None` sorts before every parsed instant.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.instant
    }

    /// Short date for list displays, falling back to the raw text.
    pub fn date_label(&self) -> String {
        match self.instant {
            Some(t) => t.format("%Y-%m-%d").to_string(),
            None => self.raw.clone(),
        }
    }
}

/// One actor/movie association held by the record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub actor_name: String,
    pub movie_name: String,
    pub created_at: Timestamp,
}

/// A record submitted for creation, before the server assigns id and time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub actor_name: String,
    pub movie_name: String,
}

// Wire shapes of the remote record API (snake_case on the wire)

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    pub id: RecordId,
    #[serde(default)]
    pub actor_name: Option<String>,
    #[serde(default)]
    pub movie_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub actor_name: String,
    pub movie_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_formats() {
        let date_only = Timestamp::parse("2024-01-01");
        let mysql = Timestamp::parse("2024-01-01 08:30:00");
        let iso = Timestamp::parse("2024-01-01T09:00:00Z");

        assert!(date_only.instant().is_some());
        assert!(date_only.instant() < mysql.instant());
        assert!(mysql.instant() < iso.instant());
        assert_eq!(mysql.as_str(), "2024-01-01 08:30:00");
    }

    #[test]
    fn test_unparseable_timestamp_sorts_first() {
        let garbage = Timestamp::parse("yesterday-ish");
        let real = Timestamp::parse("1970-01-01");

        assert!(garbage.instant().is_none());
        assert!(garbage.instant() < real.instant());
        assert_eq!(garbage.date_label(), "yesterday-ish");
    }

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let rows: Vec<WireRecord> = serde_json::from_str(
            r#"[
                {"id": 7, "actor_name": "A", "movie_name": "X", "created_at": "2024-01-01"},
                {"id": "8", "actor_name": null, "movie_name": "Y"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows[0].id, RecordId::Number(7));
        assert_eq!(rows[1].id, RecordId::Text("8".to_string()));
        assert_eq!(rows[1].actor_name, None);
        assert_eq!(rows[1].created_at, None);
    }

    #[test]
    fn test_delete_request_echoes_id_shape() {
        let numeric = serde_json::to_string(&DeleteRequest { id: RecordId::Number(3) }).unwrap();
        let text = serde_json::to_string(&DeleteRequest {
            id: RecordId::Text("3".into()),
        })
        .unwrap();

        assert_eq!(numeric, r#"{"id":3}"#);
        assert_eq!(text, r#"{"id":"3"}"#);
    }
}

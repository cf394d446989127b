//! Cell value shapes.
//!
//! A [`Cell`] is the typed value at the intersection of one row and one
//! column. Which variant a cell holds is decided by the owning column type
//! when it decodes the raw row value; nothing outside that column type looks
//! inside the variant.

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Timestamp(Timestamp),
    People(Vec<Person>),
    SurveyResponses(Vec<SurveySubmission>),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            Cell::Number(_) => false,
            Cell::Timestamp(ts) => ts.raw.is_empty(),
            Cell::People(people) => people.is_empty(),
            Cell::SurveyResponses(entries) => entries.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Person {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One historical answer to a survey question, as attached to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub submission_id: u64,
    pub submitted: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl SurveySubmission {
    /// The answer text, treating an empty answer the same as a missing one.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.submitted).ok()
    }
}

/// A timestamp cell keeps the source string as its canonical text and the
/// parsed instant (when the string could be parsed) for ordering and
/// formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub raw: String,
    pub at: Option<NaiveDateTime>,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Self {
        let at = match parse_timestamp(raw) {
            Ok(at) => Some(at),
            Err(err) => {
                debug!("{err}; keeping raw text for ordering");
                None
            }
        };
        Self {
            raw: raw.to_string(),
            at,
        }
    }
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as datetime"))
}

/// Parses either a full datetime or a bare date; dates land on midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    parse_naive_datetime(trimmed).or_else(|_| {
        parse_naive_date(trimmed)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| anyhow!("Failed to parse '{value}' as timestamp"))
    })
}

/// Decodes a JSON list into typed entries, or `None` when the value is not a
/// list. Elements that fail to decode are skipped.
pub(crate) fn decode_list<T>(raw: &JsonValue) -> Option<Vec<T>>
where
    T: DeserializeOwned,
{
    let Some(items) = raw.as_array() else {
        debug!("Expected a list cell but found {raw}");
        return None;
    };
    let entries = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match T::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Skipping malformed list entry {idx}: {err}");
                None
            }
        })
        .collect();
    Some(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_bare_dates() {
        let expected =
            NaiveDateTime::parse_from_str("2023-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parse_timestamp("2023-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-01-01").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-01-01T00:00:00").unwrap(), expected);
    }

    #[test]
    fn parse_timestamp_normalizes_offsets_to_utc() {
        let parsed = parse_timestamp("2023-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed.to_string(), "2023-01-01 00:00:00");
    }

    #[test]
    fn parse_timestamp_rejects_free_text() {
        assert!(parse_timestamp("next tuesday").is_err());
    }

    #[test]
    fn timestamp_keeps_raw_text_when_unparseable() {
        let ts = Timestamp::parse("soon");
        assert_eq!(ts.raw, "soon");
        assert!(ts.at.is_none());
    }

    #[test]
    fn survey_submission_treats_empty_text_as_missing() {
        let entry = SurveySubmission {
            submission_id: 1,
            submitted: "2023-01-01T00:00:00Z".to_string(),
            text: Some(String::new()),
        };
        assert_eq!(entry.text(), None);
    }

    #[test]
    fn decode_list_rejects_non_lists() {
        assert!(decode_list::<Person>(&json!("Alice")).is_none());
        assert!(
            decode_list::<Person>(&json!([{"first_name": "Alice"}]))
                .unwrap()
                .is_empty()
        );
        let people = decode_list::<Person>(&json!([{"id": 1, "first_name": "Alice"}])).unwrap();
        assert_eq!(people[0].display_name(), "Alice ");
    }

    #[test]
    fn decode_list_keeps_well_formed_entries() {
        let raw = json!([
            {"submission_id": 4, "submitted": "2023-01-01T00:00:00Z", "text": "Hi"},
            null,
            {"submitted": "2023-01-02T00:00:00Z"}
        ]);
        let entries = decode_list::<SurveySubmission>(&raw).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].submission_id, 4);

        let people = decode_list::<Person>(&json!([
            {"first_name": "No", "last_name": "Id"},
            {"id": 2, "first_name": "Rosa", "last_name": "Luxemburg"}
        ]))
        .unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].id, 2);
    }

    #[test]
    fn empty_collections_count_as_empty_cells() {
        assert!(Cell::People(Vec::new()).is_empty());
        assert!(Cell::Text(String::new()).is_empty());
        assert!(!Cell::Number(0.0).is_empty());
    }
}

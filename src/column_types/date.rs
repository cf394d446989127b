use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::{
    cell::{Cell, Timestamp},
    column_type::{ColDef, ColumnKind, ColumnType},
    config::FormatContext,
    sort::SortKey,
};

/// Timestamp strings. The source text is canonical; ordering is
/// chronological whenever the text parses.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateColumnType;

fn timestamp_of(cell: &Cell) -> Option<&Timestamp> {
    match cell {
        Cell::Timestamp(ts) if !ts.raw.is_empty() => Some(ts),
        _ => None,
    }
}

impl ColumnType for DateColumnType {
    fn kind(&self) -> ColumnKind {
        ColumnKind::Date
    }

    fn decode(&self, raw: Option<&JsonValue>) -> Cell {
        match raw {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => {
                Cell::Timestamp(Timestamp::parse(s.trim()))
            }
            _ => Cell::Empty,
        }
    }

    fn cell_to_string(&self, cell: &Cell) -> String {
        timestamp_of(cell)
            .map(|ts| ts.raw.clone())
            .unwrap_or_default()
    }

    fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        timestamp_of(cell).map(|ts| ts.raw.clone()).into_iter().collect()
    }

    fn sort_key(&self, cell: &Cell) -> SortKey {
        match timestamp_of(cell) {
            Some(Timestamp { at: Some(at), .. }) => SortKey::Instant(*at),
            Some(ts) => SortKey::text(ts.raw.clone()),
            None => SortKey::Empty,
        }
    }

    fn col_def(&self, _ctx: &FormatContext) -> ColDef {
        ColDef::default()
    }

    fn instant(&self, cell: &Cell) -> Option<NaiveDateTime> {
        timestamp_of(cell).and_then(|ts| ts.at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cmp::Ordering;

    #[test]
    fn canonical_text_is_the_source_string() {
        let cell = DateColumnType.decode(Some(&json!("2023-05-01")));
        assert_eq!(DateColumnType.cell_to_string(&cell), "2023-05-01");
        assert_eq!(DateColumnType.searchable_strings(&cell), vec!["2023-05-01"]);
        assert!(DateColumnType.instant(&cell).is_some());
    }

    #[test]
    fn orders_chronologically_across_formats() {
        let earlier = DateColumnType.decode(Some(&json!("2023-05-01T23:00:00+00:00")));
        let later = DateColumnType.decode(Some(&json!("2023-05-02")));
        assert_eq!(DateColumnType.compare(&earlier, &later), Ordering::Less);
    }

    #[test]
    fn unparseable_dates_sort_after_parsed_ones_but_before_empty() {
        let parsed = DateColumnType.decode(Some(&json!("2023-05-01")));
        let garbled = DateColumnType.decode(Some(&json!("sometime")));
        assert_eq!(DateColumnType.compare(&parsed, &garbled), Ordering::Less);
        assert_eq!(DateColumnType.compare(&garbled, &Cell::Empty), Ordering::Less);
    }

    #[test]
    fn non_string_values_decode_empty() {
        assert_eq!(DateColumnType.decode(Some(&json!(20230501))), Cell::Empty);
        assert_eq!(DateColumnType.decode(None), Cell::Empty);
    }
}

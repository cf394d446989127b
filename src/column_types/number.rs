use serde_json::Value as JsonValue;

use crate::{
    cell::Cell,
    column_type::{ColDef, ColumnKind, ColumnType},
    config::FormatContext,
    sort::SortKey,
};

/// Numeric values (record ids, number custom fields), ordered numerically.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberColumnType;

fn number_of(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(value) => Some(*value),
        _ => None,
    }
}

pub(crate) fn display_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

impl ColumnType for NumberColumnType {
    fn kind(&self) -> ColumnKind {
        ColumnKind::Number
    }

    fn decode(&self, raw: Option<&JsonValue>) -> Cell {
        let parsed = match raw {
            Some(JsonValue::Number(n)) => n.as_f64(),
            Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(value) if value.is_finite() => Cell::Number(value),
            _ => Cell::Empty,
        }
    }

    fn cell_to_string(&self, cell: &Cell) -> String {
        number_of(cell).map(display_number).unwrap_or_default()
    }

    fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        number_of(cell).map(display_number).into_iter().collect()
    }

    fn sort_key(&self, cell: &Cell) -> SortKey {
        number_of(cell).map_or(SortKey::Empty, SortKey::Number)
    }

    fn col_def(&self, _ctx: &FormatContext) -> ColDef {
        ColDef::default()
    }
}

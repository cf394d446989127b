use serde_json::Value as JsonValue;

use super::scalar_text;
use crate::{
    cell::Cell,
    column_type::{ColDef, ColumnKind, ColumnType, RenderStyle, RenderedCell},
    config::FormatContext,
    sort::SortKey,
};

/// Free text: titles, summaries, text custom fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextColumnType;

fn text_of(cell: &Cell) -> &str {
    match cell {
        Cell::Text(text) => text,
        _ => "",
    }
}

fn decode_text(raw: Option<&JsonValue>) -> Cell {
    match scalar_text(raw) {
        Some(text) if !text.is_empty() => Cell::Text(text),
        _ => Cell::Empty,
    }
}

fn text_tokens(cell: &Cell) -> Vec<String> {
    let text = text_of(cell);
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

impl ColumnType for TextColumnType {
    fn kind(&self) -> ColumnKind {
        ColumnKind::Text
    }

    fn decode(&self, raw: Option<&JsonValue>) -> Cell {
        decode_text(raw)
    }

    fn cell_to_string(&self, cell: &Cell) -> String {
        text_of(cell).to_string()
    }

    fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        text_tokens(cell)
    }

    fn sort_key(&self, cell: &Cell) -> SortKey {
        SortKey::text(text_of(cell))
    }

    fn col_def(&self, _ctx: &FormatContext) -> ColDef {
        ColDef::default()
    }
}

/// Text that links to its own value.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlColumnType;

impl ColumnType for UrlColumnType {
    fn kind(&self) -> ColumnKind {
        ColumnKind::Url
    }

    fn decode(&self, raw: Option<&JsonValue>) -> Cell {
        decode_text(raw)
    }

    fn cell_to_string(&self, cell: &Cell) -> String {
        text_of(cell).to_string()
    }

    fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        text_tokens(cell)
    }

    fn sort_key(&self, cell: &Cell) -> SortKey {
        SortKey::text(text_of(cell))
    }

    fn col_def(&self, _ctx: &FormatContext) -> ColDef {
        ColDef {
            render: RenderStyle::Link,
            ..ColDef::default()
        }
    }

    fn render(&self, cell: &Cell, _ctx: &FormatContext) -> RenderedCell {
        match text_of(cell) {
            "" => RenderedCell::Empty,
            url => RenderedCell::Link {
                label: url.to_string(),
                href: url.to_string(),
            },
        }
    }
}

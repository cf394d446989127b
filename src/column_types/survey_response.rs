//! Survey answers attached to a row, one entry per historical submission.
//!
//! Two notions of "the" representative answer coexist here and are kept
//! apart on purpose: the canonical text is the first entry in list order,
//! while rendering leads with the most recently submitted entry.

use std::cmp::Reverse;

use serde_json::Value as JsonValue;

use crate::{
    cell::{Cell, SurveySubmission, decode_list},
    column_type::{
        ColDef, ColumnKind, ColumnType, PreviewEntry, RenderStyle, RenderedCell,
        SubmissionPreview,
    },
    config::FormatContext,
    format::ellipsize,
    sort::SortKey,
};

const SURVEY_COLUMN_WIDTH: u16 = 250;
const INLINE_LINE_CLAMP: u8 = 2;

#[derive(Debug, Default, Clone, Copy)]
pub struct SurveyResponseColumnType;

fn entries_of(cell: &Cell) -> &[SurveySubmission] {
    match cell {
        Cell::SurveyResponses(entries) => entries,
        _ => &[],
    }
}

/// Entries ordered most recent first. Entries whose timestamp does not
/// parse go last; ties keep list order.
pub fn most_recent_first(entries: &[SurveySubmission]) -> Vec<&SurveySubmission> {
    let mut sorted = entries.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|entry| {
        let at = entry.submitted_at();
        (at.is_none(), Reverse(at))
    });
    sorted
}

impl SurveyResponseColumnType {
    pub fn preview(&self, cell: &Cell, ctx: &FormatContext) -> SubmissionPreview {
        let entries = most_recent_first(entries_of(cell))
            .into_iter()
            .filter_map(|entry| entry.text().map(|text| (entry, text)))
            .enumerate()
            .map(|(idx, (entry, text))| PreviewEntry {
                submission_id: entry.submission_id,
                submitted: entry.submitted.clone(),
                matching_content: Some(if idx == 0 {
                    ellipsize(text, ctx.config.preview_max_chars)
                } else {
                    text.to_string()
                }),
            })
            .collect();
        SubmissionPreview { entries }
    }
}

impl ColumnType for SurveyResponseColumnType {
    fn kind(&self) -> ColumnKind {
        ColumnKind::SurveyResponse
    }

    fn decode(&self, raw: Option<&JsonValue>) -> Cell {
        match raw.and_then(decode_list::<SurveySubmission>) {
            Some(entries) if !entries.is_empty() => Cell::SurveyResponses(entries),
            _ => Cell::Empty,
        }
    }

    fn cell_to_string(&self, cell: &Cell) -> String {
        entries_of(cell)
            .first()
            .and_then(|entry| entry.text.clone())
            .unwrap_or_default()
    }

    fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        entries_of(cell)
            .iter()
            .filter_map(|entry| entry.text().map(str::to_string))
            .collect()
    }

    fn sort_key(&self, cell: &Cell) -> SortKey {
        let concatenated = entries_of(cell)
            .iter()
            .filter_map(SurveySubmission::text)
            .collect::<String>();
        SortKey::text(concatenated)
    }

    fn col_def(&self, _ctx: &FormatContext) -> ColDef {
        ColDef {
            render: RenderStyle::ClampedPreview {
                lines: INLINE_LINE_CLAMP,
            },
            filterable: false,
            sortable: true,
            width: Some(SURVEY_COLUMN_WIDTH),
        }
    }

    fn render(&self, cell: &Cell, ctx: &FormatContext) -> RenderedCell {
        let Some(latest) = most_recent_first(entries_of(cell)).first().copied() else {
            return RenderedCell::Empty;
        };
        RenderedCell::Survey {
            inline: latest.text.clone().unwrap_or_default(),
            preview: self.preview(cell, ctx),
        }
    }
}

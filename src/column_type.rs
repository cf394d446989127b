//! The column type contract.
//!
//! A column type is a stateless strategy for one category of cell data. It
//! decodes raw row values into a [`Cell`], serializes cells to canonical
//! text, extracts search tokens, orders cells, and describes how the grid
//! should render them. All operations are pure functions of their
//! arguments and degrade gracefully on empty or malformed cells.
//!
//! [`ColumnKind`] is the closed set of type tags a journey schema may name.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value as JsonValue;

use crate::{cell::Cell, config::FormatContext, sort::SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKind {
    Text,
    Url,
    Number,
    Date,
    People,
    SurveyResponse,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Url => "url",
            ColumnKind::Number => "number",
            ColumnKind::Date => "date",
            ColumnKind::People => "people",
            ColumnKind::SurveyResponse => "survey_response",
        }
    }

    pub fn all() -> &'static [ColumnKind] {
        &[
            ColumnKind::Text,
            ColumnKind::Url,
            ColumnKind::Number,
            ColumnKind::Date,
            ColumnKind::People,
            ColumnKind::SurveyResponse,
        ]
    }

    pub fn variants() -> Vec<&'static str> {
        Self::all().iter().map(ColumnKind::as_str).collect()
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown column type '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for ColumnKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "text" | "string" => Ok(ColumnKind::Text),
            "url" => Ok(ColumnKind::Url),
            "number" | "integer" | "float" => Ok(ColumnKind::Number),
            "date" | "datetime" | "timestamp" => Ok(ColumnKind::Date),
            "people" | "person" | "assignees" => Ok(ColumnKind::People),
            "survey_response" | "survey-response" => Ok(ColumnKind::SurveyResponse),
            _ => Err(UnknownKind(value.to_string())),
        }
    }
}

impl Serialize for ColumnKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColumnKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        ColumnKind::from_str(&token).map_err(|err| {
            de::Error::custom(format!(
                "{err}. Supported types: {}",
                ColumnKind::variants().join(", ")
            ))
        })
    }
}

/// How the grid should draw cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    Plain,
    Link,
    PersonChips,
    /// Inline text clamped to a number of lines, with a hover preview.
    ClampedPreview { lines: u8 },
}

/// Grid-facing descriptor of a column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColDef {
    pub render: RenderStyle,
    pub filterable: bool,
    pub sortable: bool,
    pub width: Option<u16>,
}

impl Default for ColDef {
    fn default() -> Self {
        Self {
            render: RenderStyle::Plain,
            filterable: true,
            sortable: true,
            width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonChip {
    pub id: u64,
    pub name: String,
    pub show_text: bool,
}

/// One line of a survey hover preview. `submission_id` is what the detail
/// surface is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub submission_id: u64,
    pub submitted: String,
    pub matching_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionPreview {
    pub entries: Vec<PreviewEntry>,
}

impl SubmissionPreview {
    pub fn submission_ids(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.submission_id).collect()
    }
}

/// The output of rendering one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedCell {
    Empty,
    Text(String),
    Link { label: String, href: String },
    People(Vec<PersonChip>),
    Survey {
        inline: String,
        preview: SubmissionPreview,
    },
}

impl RenderedCell {
    /// Flattens the rendered cell for contexts that can only show text.
    pub fn to_plain(&self) -> String {
        match self {
            RenderedCell::Empty => String::new(),
            RenderedCell::Text(text) => text.clone(),
            RenderedCell::Link { label, .. } => label.clone(),
            RenderedCell::People(chips) => chips.iter().map(|chip| &chip.name).join(", "),
            RenderedCell::Survey { inline, .. } => inline.clone(),
        }
    }
}

pub trait ColumnType: fmt::Debug + Send + Sync {
    fn kind(&self) -> ColumnKind;

    /// Turns the raw row value (absent when the row has no such field) into
    /// this type's cell shape. Values of the wrong shape decode as empty.
    fn decode(&self, raw: Option<&JsonValue>) -> Cell;

    /// Canonical, locale-naive text for plain-text contexts.
    fn cell_to_string(&self, cell: &Cell) -> String;

    /// Every string full-text search should match for this cell.
    fn searchable_strings(&self, cell: &Cell) -> Vec<String>;

    fn sort_key(&self, cell: &Cell) -> SortKey;

    fn col_def(&self, ctx: &FormatContext) -> ColDef;

    fn render(&self, cell: &Cell, ctx: &FormatContext) -> RenderedCell {
        let _ = ctx;
        let text = self.cell_to_string(cell);
        if text.is_empty() {
            RenderedCell::Empty
        } else {
            RenderedCell::Text(text)
        }
    }

    /// The instant a cell refers to, for types that carry one.
    fn instant(&self, cell: &Cell) -> Option<NaiveDateTime> {
        let _ = cell;
        None
    }

    fn compare(&self, left: &Cell, right: &Cell) -> Ordering {
        self.sort_key(left).cmp(&self.sort_key(right))
    }
}

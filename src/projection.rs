//! Row projection: how each column finds its raw value inside a row.
//!
//! Projections are declared per column as a closed set of lookups instead
//! of free-form property paths, so an unsupported lookup cannot be
//! expressed at all and a missing intermediate object simply yields no
//! value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{cell::Cell, column_type::ColumnType};

/// A raw record as delivered by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, JsonValue>);

impl Row {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON value, treating anything other than an object as an
    /// empty row.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field).filter(|value| !value.is_null())
    }
}

/// Fields of the row's `next_milestone` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneField {
    Title,
    Deadline,
}

impl MilestoneField {
    fn key(self) -> &'static str {
        match self {
            MilestoneField::Title => "title",
            MilestoneField::Deadline => "deadline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The top-level row value stored under this key.
    Field(String),
    /// A field of the row's `next_milestone` object.
    NextMilestone(MilestoneField),
}

impl Projection {
    pub const NEXT_MILESTONE_KEY: &'static str = "next_milestone";

    pub fn field(key: impl Into<String>) -> Self {
        Projection::Field(key.into())
    }

    pub fn raw<'r>(&self, row: &'r Row) -> Option<&'r JsonValue> {
        match self {
            Projection::Field(key) => row.get(key),
            Projection::NextMilestone(field) => row
                .get(Self::NEXT_MILESTONE_KEY)
                .and_then(|milestone| milestone.get(field.key()))
                .filter(|value| !value.is_null()),
        }
    }

    /// Whether the column reads through a nested object rather than its own
    /// row key.
    pub fn is_nested(&self) -> bool {
        matches!(self, Projection::NextMilestone(_))
    }

    pub fn project(&self, row: &Row, column_type: &dyn ColumnType) -> Cell {
        column_type.decode(self.raw(row))
    }
}

//! Ordering rules shared by every column type.
//!
//! Column types reduce a cell to a [`SortKey`] that mirrors the cell's
//! canonical text: numbers and timestamps keep their natural order, every
//! other cell compares as a string. Empty cells sort after all non-empty
//! cells and are equal to each other.

use std::{cmp::Ordering, fmt};

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Instant(NaiveDateTime),
    Text(String),
    Empty,
}

impl SortKey {
    /// Builds a text key, collapsing an empty string to [`SortKey::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            SortKey::Empty
        } else {
            SortKey::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SortKey::Empty)
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Instant(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Empty => 3,
        }
    }
}

impl Eq for SortKey {}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Empty, SortKey::Empty) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Applies the direction to an ascending comparison of two keys while
    /// keeping empty keys at the end.
    pub fn apply(self, left: &SortKey, right: &SortKey) -> Ordering {
        match (left.is_empty(), right.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) if self.is_ascending() => left.cmp(right),
            (false, false) => right.cmp(left),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `field[:asc|desc]` sort request against one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split(':');
        let field = parts
            .next()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("Sort directive is missing a column"))?;
        let direction = match parts.next().map(|s| s.trim().to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(dir) if dir == "asc" => SortDirection::Asc,
            Some(dir) if dir == "desc" => SortDirection::Desc,
            Some(other) => return Err(anyhow!("Unknown sort direction '{other}'")),
        };
        if parts.next().is_some() {
            return Err(anyhow!("Sort directive '{spec}' has too many ':' separators"));
        }
        Ok(SortDirective {
            field: field.to_string(),
            direction,
        })
    }
}

pub fn parse_sort_directives(specs: &[String]) -> Result<Vec<SortDirective>> {
    specs
        .iter()
        .flat_map(|s| s.split(','))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(SortDirective::parse)
        .collect()
}

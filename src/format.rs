//! Value formatters for columns whose human-readable text differs from the
//! cell's canonical string.

use chrono::{NaiveDateTime, TimeDelta};

use crate::{cell::Cell, column_type::ColumnType, config::FormatContext};

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueFormatter {
    /// `"{singular_name} #{value}"`, e.g. "Case #12".
    RecordLabel { singular_name: String },
    /// Calendar date using the configured `date_format`.
    CalendarDate,
    /// Distance from now, e.g. "3 days ago" or, without suffix, "3 days".
    Relative { with_suffix: bool },
}

impl ValueFormatter {
    pub fn format(&self, column_type: &dyn ColumnType, cell: &Cell, ctx: &FormatContext) -> String {
        if cell.is_empty() {
            return String::new();
        }
        match self {
            ValueFormatter::RecordLabel { singular_name } => {
                format!("{singular_name} #{}", column_type.cell_to_string(cell))
            }
            ValueFormatter::CalendarDate => match column_type.instant(cell) {
                Some(at) => at.format(&ctx.config.date_format).to_string(),
                None => column_type.cell_to_string(cell),
            },
            ValueFormatter::Relative { with_suffix } => match column_type.instant(cell) {
                Some(at) => relative_time(at, ctx.now_naive(), *with_suffix),
                None => column_type.cell_to_string(cell),
            },
        }
    }
}

/// Humanizes the distance between `at` and `now`.
pub fn relative_time(at: NaiveDateTime, now: NaiveDateTime, with_suffix: bool) -> String {
    let delta = at.signed_duration_since(now);
    let phrase = humanize(delta.abs());
    if !with_suffix {
        phrase
    } else if delta <= TimeDelta::zero() {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}

fn humanize(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds();
    let minutes = round_div(seconds, 60);
    let hours = round_div(seconds, 3_600);
    let days = round_div(seconds, 86_400);
    match seconds {
        s if s < 45 => "a few seconds".to_string(),
        s if s < 90 => "a minute".to_string(),
        _ if minutes < 45 => format!("{minutes} minutes"),
        _ if minutes < 90 => "an hour".to_string(),
        _ if hours < 22 => format!("{hours} hours"),
        _ if hours < 36 => "a day".to_string(),
        _ if days < 26 => format!("{days} days"),
        _ if days < 45 => "a month".to_string(),
        _ if days < 320 => format!("{} months", round_div(days, 30).max(2)),
        _ if days < 548 => "a year".to_string(),
        _ => format!("{} years", round_div(days, 365).max(2)),
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

/// Cuts `value` to at most `max_chars` characters, ending in "..." when cut.
pub fn ellipsize(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    if max_chars < ELLIPSIS.len() {
        return value.chars().take(max_chars).collect();
    }
    let keep = max_chars - ELLIPSIS.len();
    let mut cut = value.chars().take(keep).collect::<String>();
    cut.push_str(ELLIPSIS);
    cut
}

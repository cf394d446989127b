//! Concrete column types.
//!
//! Each type owns exactly one [`Cell`](crate::cell::Cell) shape. Cells of any
//! other shape are treated as empty by that type's operations.

mod date;
mod number;
mod people;
mod survey_response;
mod text;

pub use date::DateColumnType;
pub use number::NumberColumnType;
pub use people::PeopleColumnType;
pub use survey_response::SurveyResponseColumnType;
pub use text::{TextColumnType, UrlColumnType};

use serde_json::Value as JsonValue;

/// Reads scalar JSON as text. Lists and objects are not text.
pub(crate) fn scalar_text(raw: Option<&JsonValue>) -> Option<String> {
    match raw? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => None,
        other => {
            log::debug!("Expected a scalar cell but found {other}");
            None
        }
    }
}

//! Configuration errors raised while assembling or addressing table columns.
//!
//! Malformed cell values are never errors; every column type degrades them to
//! an empty cell. The variants here describe a table that cannot be shown
//! correctly at all, so they are surfaced to the caller instead of defaulted.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// No header text exists for a column in the translation table.
    #[error("Missing translation for column '{field}'")]
    MissingTranslation { field: String },

    /// The journey schema references a column type the registry cannot serve.
    #[error("Column '{field}' uses unknown column type '{tag}'")]
    UnknownColumnType { field: String, tag: String },

    /// Two columns of one table share a field key.
    #[error("Column '{field}' is defined more than once")]
    DuplicateField { field: String },

    /// A caller addressed a column the table does not have.
    #[error("Column '{field}' not found")]
    UnknownField { field: String },
}

impl ColumnError {
    pub fn missing_translation(field: impl Into<String>) -> Self {
        Self::MissingTranslation {
            field: field.into(),
        }
    }

    pub fn unknown_column_type(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::UnknownColumnType {
            field: field.into(),
            tag: tag.into(),
        }
    }

    pub fn duplicate_field(field: impl Into<String>) -> Self {
        Self::DuplicateField {
            field: field.into(),
        }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }
}

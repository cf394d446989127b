//! Registry mapping column type tags to their strategies.

use std::{collections::BTreeMap, str::FromStr, sync::Arc};

use crate::{
    column_type::{ColumnKind, ColumnType},
    column_types::{
        DateColumnType, NumberColumnType, PeopleColumnType, SurveyResponseColumnType,
        TextColumnType, UrlColumnType,
    },
    error::ColumnError,
};

/// The built-in strategy for a tag. Adding a [`ColumnKind`] without a
/// strategy fails to compile here.
pub fn builtin(kind: ColumnKind) -> Arc<dyn ColumnType> {
    match kind {
        ColumnKind::Text => Arc::new(TextColumnType),
        ColumnKind::Url => Arc::new(UrlColumnType),
        ColumnKind::Number => Arc::new(NumberColumnType),
        ColumnKind::Date => Arc::new(DateColumnType),
        ColumnKind::People => Arc::new(PeopleColumnType),
        ColumnKind::SurveyResponse => Arc::new(SurveyResponseColumnType),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnTypeRegistry {
    types: BTreeMap<ColumnKind, Arc<dyn ColumnType>>,
}

impl ColumnTypeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry serving every built-in column type.
    pub fn standard() -> Self {
        ColumnKind::all()
            .iter()
            .fold(Self::empty(), |registry, kind| registry.with(builtin(*kind)))
    }

    /// Registers a strategy under its own kind, replacing any previous one.
    pub fn with(mut self, column_type: Arc<dyn ColumnType>) -> Self {
        self.register(column_type);
        self
    }

    pub fn register(&mut self, column_type: Arc<dyn ColumnType>) {
        self.types.insert(column_type.kind(), column_type);
    }

    pub fn get(&self, kind: ColumnKind) -> Option<Arc<dyn ColumnType>> {
        self.types.get(&kind).cloned()
    }

    /// Resolves a schema type tag for `field`, failing on tags that are
    /// unknown or not registered.
    pub fn resolve(&self, field: &str, tag: &str) -> Result<Arc<dyn ColumnType>, ColumnError> {
        ColumnKind::from_str(tag)
            .ok()
            .and_then(|kind| self.get(kind))
            .ok_or_else(|| ColumnError::unknown_column_type(field, tag))
    }

    pub(crate) fn require(
        &self,
        field: &str,
        kind: ColumnKind,
    ) -> Result<Arc<dyn ColumnType>, ColumnError> {
        self.get(kind)
            .ok_or_else(|| ColumnError::unknown_column_type(field, kind.as_str()))
    }
}

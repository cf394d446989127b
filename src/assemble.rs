//! Dynamic column assembly.
//!
//! Columns for a journey table are derived from the journey schema at run
//! time: fixed system columns first, in a declared order, then one column
//! per custom field in schema order. Every column gets its header from the
//! translation table and its behavior from the column type registry.
//! Assembly is deterministic; the same inputs always produce the same
//! column list, because saved views remember columns by position.

use std::{cmp::Ordering, collections::HashSet, sync::Arc};

use log::debug;

use crate::{
    cell::Cell,
    column_type::{ColDef, ColumnKind, ColumnType, RenderedCell},
    config::FormatContext,
    error::ColumnError,
    format::ValueFormatter,
    journey::{JourneySchema, Translations},
    projection::{MilestoneField, Projection, Row},
    registry::ColumnTypeRegistry,
    sort::SortKey,
};

/// One column of an assembled table.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub field: String,
    pub header_name: String,
    pub kind: ColumnKind,
    pub width: Option<u16>,
    projection: Projection,
    formatter: Option<ValueFormatter>,
    column_type: Arc<dyn ColumnType>,
}

impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.header_name == other.header_name
            && self.kind == other.kind
            && self.width == other.width
            && self.projection == other.projection
            && self.formatter == other.formatter
    }
}

impl ColumnDescriptor {
    pub fn column_type(&self) -> &dyn ColumnType {
        self.column_type.as_ref()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn formatter(&self) -> Option<&ValueFormatter> {
        self.formatter.as_ref()
    }

    /// The grid descriptor for this column, with the column's own width
    /// taking precedence over the type's default.
    pub fn col_def(&self, ctx: &FormatContext) -> ColDef {
        let mut def = self.column_type.col_def(ctx);
        if self.width.is_some() {
            def.width = self.width;
        }
        def
    }

    pub fn cell(&self, row: &Row) -> Cell {
        self.projection.project(row, self.column_type())
    }

    pub fn cell_to_string(&self, cell: &Cell) -> String {
        self.column_type.cell_to_string(cell)
    }

    pub fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        self.column_type.searchable_strings(cell)
    }

    pub fn sort_key(&self, cell: &Cell) -> SortKey {
        self.column_type.sort_key(cell)
    }

    pub fn compare(&self, left: &Cell, right: &Cell) -> Ordering {
        self.column_type.compare(left, right)
    }

    /// Human-readable text: the formatter's output when the column has
    /// one, otherwise the canonical text.
    pub fn display(&self, cell: &Cell, ctx: &FormatContext) -> String {
        match &self.formatter {
            Some(formatter) => formatter.format(self.column_type(), cell, ctx),
            None => self.column_type.cell_to_string(cell),
        }
    }

    pub fn render(&self, cell: &Cell, ctx: &FormatContext) -> RenderedCell {
        if self.formatter.is_none() {
            return self.column_type.render(cell, ctx);
        }
        match self.display(cell, ctx) {
            text if text.is_empty() => RenderedCell::Empty,
            text => RenderedCell::Text(text),
        }
    }
}

struct ColumnSpec {
    field: String,
    kind: ColumnKind,
    projection: Projection,
    formatter: Option<ValueFormatter>,
}

impl ColumnSpec {
    fn own(field: &str, kind: ColumnKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
            projection: Projection::field(field),
            formatter: None,
        }
    }

    fn nested(field: &str, kind: ColumnKind, milestone: MilestoneField) -> Self {
        Self {
            field: field.to_string(),
            kind,
            projection: Projection::NextMilestone(milestone),
            formatter: None,
        }
    }

    fn formatted(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

pub const SYSTEM_FIELDS: &[&str] = &[
    "id",
    "people",
    "assigned_to",
    "created_at",
    "updated_at",
    "next_milestone_title",
    "next_milestone_deadline",
    "summary",
];

fn system_columns(journey: &JourneySchema) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::own("id", ColumnKind::Number).formatted(ValueFormatter::RecordLabel {
            singular_name: journey.singular_name.clone(),
        }),
        ColumnSpec::own("people", ColumnKind::People),
        ColumnSpec::own("assigned_to", ColumnKind::People),
        ColumnSpec::own("created_at", ColumnKind::Date).formatted(ValueFormatter::CalendarDate),
        ColumnSpec::own("updated_at", ColumnKind::Date)
            .formatted(ValueFormatter::Relative { with_suffix: true }),
        ColumnSpec::nested("next_milestone_title", ColumnKind::Text, MilestoneField::Title),
        ColumnSpec::nested(
            "next_milestone_deadline",
            ColumnKind::Date,
            MilestoneField::Deadline,
        )
        .formatted(ValueFormatter::Relative { with_suffix: false }),
        ColumnSpec::own("summary", ColumnKind::Text),
    ]
}

/// Every column field a journey table will have, in column order, without
/// resolving headers or types.
pub fn column_fields(journey: &JourneySchema) -> Vec<String> {
    SYSTEM_FIELDS
        .iter()
        .map(|field| field.to_string())
        .chain(journey.custom_fields.iter().map(|field| field.slug.clone()))
        .collect()
}

pub fn assemble_columns(
    journey: &JourneySchema,
    translations: &Translations,
    registry: &ColumnTypeRegistry,
) -> Result<Vec<ColumnDescriptor>, ColumnError> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(SYSTEM_FIELDS.len() + journey.custom_fields.len());

    for spec in system_columns(journey) {
        let column_type = registry.require(&spec.field, spec.kind)?;
        columns.push(build_descriptor(spec, column_type, translations, &mut seen)?);
    }

    for field in &journey.custom_fields {
        let column_type = registry.resolve(&field.slug, &field.type_tag)?;
        let spec = ColumnSpec::own(&field.slug, column_type.kind());
        columns.push(build_descriptor(spec, column_type, translations, &mut seen)?);
    }

    debug!(
        "Assembled {} column(s) for journey '{}' ({} custom)",
        columns.len(),
        journey.singular_name,
        journey.custom_fields.len()
    );
    Ok(columns)
}

fn build_descriptor(
    spec: ColumnSpec,
    column_type: Arc<dyn ColumnType>,
    translations: &Translations,
    seen: &mut HashSet<String>,
) -> Result<ColumnDescriptor, ColumnError> {
    if !seen.insert(spec.field.clone()) {
        return Err(ColumnError::duplicate_field(spec.field));
    }
    let header_name = translations.header(&spec.field)?.to_string();
    Ok(ColumnDescriptor {
        kind: column_type.kind(),
        width: None,
        header_name,
        field: spec.field,
        projection: spec.projection,
        formatter: spec.formatter,
        column_type,
    })
}

/// Reassembles columns only when the schema or translations change.
#[derive(Debug)]
pub struct ColumnAssembler {
    registry: ColumnTypeRegistry,
    cached: Option<CachedColumns>,
}

#[derive(Debug)]
struct CachedColumns {
    journey: JourneySchema,
    translations: Translations,
    columns: Arc<[ColumnDescriptor]>,
}

impl ColumnAssembler {
    pub fn new(registry: ColumnTypeRegistry) -> Self {
        Self {
            registry,
            cached: None,
        }
    }

    pub fn columns(
        &mut self,
        journey: &JourneySchema,
        translations: &Translations,
    ) -> Result<Arc<[ColumnDescriptor]>, ColumnError> {
        if let Some(cached) = &self.cached
            && cached.journey == *journey
            && cached.translations == *translations
        {
            return Ok(Arc::clone(&cached.columns));
        }
        let columns: Arc<[ColumnDescriptor]> =
            assemble_columns(journey, translations, &self.registry)?.into();
        self.cached = Some(CachedColumns {
            journey: journey.clone(),
            translations: translations.clone(),
            columns: Arc::clone(&columns),
        });
        Ok(columns)
    }
}

//! Table-level operations over assembled columns: projecting rows into
//! cells, full-text search, multi-column sorting, display text and CSV
//! export. All of it goes through the column contract; nothing here looks
//! inside a cell.

use std::{cmp::Ordering, io::Write};

use anyhow::{Context, Result};
use log::debug;

use crate::{
    assemble::ColumnDescriptor,
    cell::Cell,
    column_type::RenderedCell,
    config::FormatContext,
    error::ColumnError,
    projection::Row,
    sort::{SortDirection, SortDirective, SortKey},
};

#[derive(Debug, Clone)]
pub struct GridRow {
    pub row: Row,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct DataGrid<'c> {
    columns: &'c [ColumnDescriptor],
    rows: Vec<GridRow>,
}

impl<'c> DataGrid<'c> {
    pub fn new(columns: &'c [ColumnDescriptor], rows: impl IntoIterator<Item = Row>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| GridRow {
                cells: columns.iter().map(|column| column.cell(&row)).collect(),
                row,
            })
            .collect::<Vec<_>>();
        debug!(
            "Projected {} row(s) across {} column(s)",
            rows.len(),
            columns.len()
        );
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.columns
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, field: &str) -> Result<usize, ColumnError> {
        self.columns
            .iter()
            .position(|column| column.field == field)
            .ok_or_else(|| ColumnError::unknown_field(field))
    }

    /// Keeps rows where any search token of any column contains `term`,
    /// ignoring case. A blank term keeps every row.
    pub fn search(&mut self, term: &str) {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return;
        }
        let columns = self.columns;
        let before = self.rows.len();
        self.rows.retain(|grid_row| {
            columns
                .iter()
                .zip(&grid_row.cells)
                .flat_map(|(column, cell)| column.searchable_strings(cell))
                .any(|token| token.to_lowercase().contains(&needle))
        });
        debug!(
            "Search '{term}' kept {} of {before} row(s)",
            self.rows.len()
        );
    }

    /// Stable multi-key sort. Empty cells stay last in either direction.
    pub fn sort(&mut self, directives: &[SortDirective]) -> Result<(), ColumnError> {
        if directives.is_empty() {
            return Ok(());
        }
        let plan = directives
            .iter()
            .map(|directive| {
                self.column_index(&directive.field)
                    .map(|idx| (idx, directive.direction))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let columns = self.columns;
        let mut keyed = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|grid_row| {
                let keys = plan
                    .iter()
                    .map(|(idx, _)| columns[*idx].sort_key(&grid_row.cells[*idx]))
                    .collect::<Vec<_>>();
                (keys, grid_row)
            })
            .collect::<Vec<_>>();
        keyed.sort_by(|(left, _), (right, _)| compare_keys(&plan, left, right));
        self.rows = keyed.into_iter().map(|(_, grid_row)| grid_row).collect();
        Ok(())
    }

    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.header_name.clone())
            .collect()
    }

    /// Formatted text per cell, as a person reading the table sees it.
    pub fn display_rows(&self, ctx: &FormatContext) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|grid_row| {
                self.columns
                    .iter()
                    .zip(&grid_row.cells)
                    .map(|(column, cell)| column.render(cell, ctx).to_plain())
                    .collect()
            })
            .collect()
    }

    pub fn rendered_rows(&self, ctx: &FormatContext) -> Vec<Vec<RenderedCell>> {
        self.rows
            .iter()
            .map(|grid_row| {
                self.columns
                    .iter()
                    .zip(&grid_row.cells)
                    .map(|(column, cell)| column.render(cell, ctx))
                    .collect()
            })
            .collect()
    }

    /// Canonical text per cell, for plain-text contexts.
    pub fn plain_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|grid_row| {
                self.columns
                    .iter()
                    .zip(&grid_row.cells)
                    .map(|(column, cell)| column.cell_to_string(cell))
                    .collect()
            })
            .collect()
    }

    /// Writes translated headers and canonical cell text as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        csv_writer
            .write_record(self.headers())
            .context("Writing CSV headers")?;
        for (idx, record) in self.plain_rows().into_iter().enumerate() {
            csv_writer
                .write_record(&record)
                .with_context(|| format!("Writing CSV row {}", idx + 1))?;
        }
        csv_writer.flush().context("Flushing CSV output")?;
        Ok(())
    }
}

fn compare_keys(
    plan: &[(usize, SortDirection)],
    left: &[SortKey],
    right: &[SortKey],
) -> Ordering {
    plan.iter()
        .zip(left.iter().zip(right))
        .map(|((_, direction), (l, r))| direction.apply(l, r))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

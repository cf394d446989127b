//! Column listing for a journey.
//!
//! Assembles the journey's columns exactly as a table would and prints
//! their position, field, header, type and width as a text table.

use anyhow::{Context, Result};
use log::info;

use crate::{
    assemble::assemble_columns,
    cli::ColumnsArgs,
    config::{FormatContext, GridConfig},
    journey::{JourneySchema, Translations},
    registry::ColumnTypeRegistry,
    table,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let journey = JourneySchema::load(&args.journey)
        .with_context(|| format!("Loading journey from {:?}", args.journey))?;
    let translations = Translations::load(&args.translations)
        .with_context(|| format!("Loading translations from {:?}", args.translations))?;
    let columns = assemble_columns(&journey, &translations, &ColumnTypeRegistry::standard())
        .with_context(|| format!("Assembling columns for {:?}", args.journey))?;

    let config = GridConfig::default();
    let ctx = FormatContext::new(config.clone(), chrono::Utc::now());
    let rows = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let def = column.col_def(&ctx);
            vec![
                (idx + 1).to_string(),
                column.field.clone(),
                column.header_name.clone(),
                column.kind.to_string(),
                def.width.map(|w| w.to_string()).unwrap_or_default(),
            ]
        })
        .collect::<Vec<_>>();
    let headers = ["#", "field", "header", "type", "width"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows, config.max_cell_width);
    info!(
        "Listed {} column(s) for journey '{}'",
        columns.len(),
        journey.singular_name
    );
    Ok(())
}

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};

use crate::{
    assemble::assemble_columns,
    cli::{OutputFormat, RenderArgs},
    config::{FormatContext, GridConfig},
    grid::DataGrid,
    io_utils,
    journey::{JourneySchema, Translations},
    registry::ColumnTypeRegistry,
    sort::parse_sort_directives,
    table,
};

pub fn execute(args: &RenderArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let journey = JourneySchema::load(&args.journey)
        .with_context(|| format!("Loading journey from {:?}", args.journey))?;
    let translations = Translations::load(&args.translations)
        .with_context(|| format!("Loading translations from {:?}", args.translations))?;
    let directives = parse_sort_directives(&args.sort)?;
    let columns = assemble_columns(&journey, &translations, &ColumnTypeRegistry::standard())
        .with_context(|| format!("Assembling columns for {:?}", args.journey))?;
    let rows = io_utils::read_rows(&args.rows)?;
    info!(
        "Rendering {} record(s) of journey '{}' across {} column(s)",
        rows.len(),
        journey.singular_name,
        columns.len()
    );

    let mut grid = DataGrid::new(&columns, rows);
    if let Some(term) = &args.search {
        grid.search(term);
    }
    grid.sort(&directives).context("Sorting rows")?;
    if let Some(limit) = args.limit {
        grid.truncate(limit);
    }
    debug!("Emitting {} row(s) as {:?}", grid.len(), args.format);

    let mut output = io_utils::open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Csv => grid.write_csv(&mut output)?,
        OutputFormat::Table => {
            let ctx = FormatContext::new(config.clone(), args.now.unwrap_or_else(Utc::now));
            let rendered =
                table::render_table(&grid.headers(), &grid.display_rows(&ctx), config.max_cell_width);
            output
                .write_all(rendered.as_bytes())
                .context("Writing table output")?;
        }
    }
    output.flush().context("Flushing output")?;
    Ok(())
}

fn resolve_config(args: &RenderArgs) -> Result<GridConfig> {
    let mut config = match &args.config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("Loading config from {path:?}"))?,
        None => GridConfig::default(),
    };
    if let Some(pattern) = &args.date_format {
        config.date_format = pattern.clone();
    }
    if let Some(width) = args.max_cell_width {
        config.max_cell_width = width;
    }
    config.validate()?;
    Ok(config)
}

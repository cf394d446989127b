//! Translation table scaffolding.

use std::io::Write;

use anyhow::{Context, Result};
use log::info;

use crate::{
    assemble::column_fields, cli::TranslationsArgs, io_utils, journey::JourneySchema,
    journey::Translations,
};

pub fn execute(args: &TranslationsArgs) -> Result<()> {
    let journey = JourneySchema::load(&args.journey)
        .with_context(|| format!("Loading journey from {:?}", args.journey))?;
    let fields = column_fields(&journey);
    let skeleton = Translations::scaffold(fields.iter().map(String::as_str));
    let yaml = skeleton.to_yaml_string()?;

    let mut output = io_utils::open_output(args.output.as_deref())?;
    output
        .write_all(yaml.as_bytes())
        .context("Writing translation skeleton")?;
    output.flush().context("Flushing output")?;
    info!(
        "Wrote {} translation placeholder(s) for journey '{}'",
        skeleton.len(),
        journey.singular_name
    );
    Ok(())
}

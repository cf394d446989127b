//! File and stream helpers for the CLI.
//!
//! The `-` path convention routes through standard streams: rows can be
//! piped in and output defaults to stdout.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde_json::Value as JsonValue;

use crate::projection::Row;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("Opening rows file {path:?}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_dash(path) => {
            let file =
                File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Reads a JSON array of records. Each element must be an object.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let reader = open_input(path)?;
    let document: JsonValue =
        serde_json::from_reader(reader).with_context(|| format!("Parsing rows from {path:?}"))?;
    let JsonValue::Array(items) = document else {
        return Err(anyhow!("Rows file {path:?} must contain a JSON array"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            JsonValue::Object(fields) => Ok(Row::new(fields)),
            other => Err(anyhow!(
                "Row {} in {path:?} is not an object: {other}",
                idx + 1
            )),
        })
        .collect()
}

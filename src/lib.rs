pub mod assemble;
pub mod cell;
pub mod cli;
pub mod column_type;
pub mod column_types;
pub mod columns;
pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod io_utils;
pub mod journey;
pub mod projection;
pub mod registry;
pub mod render;
pub mod sort;
pub mod table;
pub mod translations_cmd;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("journey_grid", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Columns(args) => columns::execute(&args),
        Commands::Render(args) => render::execute(&args),
        Commands::Translations(args) => translations_cmd::execute(&args),
    }
}

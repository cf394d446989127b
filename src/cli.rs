use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Render journey records through pluggable column types",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the columns assembled for a journey
    Columns(ColumnsArgs),
    /// Project, search, sort and print journey records
    Render(RenderArgs),
    /// Print a translation table skeleton for a journey
    Translations(TranslationsArgs),
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Journey schema file (YAML or JSON)
    #[arg(short = 'j', long = "journey")]
    pub journey: PathBuf,
    /// Translation table mapping column fields to headers (YAML or JSON)
    #[arg(short = 't', long = "translations")]
    pub translations: PathBuf,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Journey schema file (YAML or JSON)
    #[arg(short = 'j', long = "journey")]
    pub journey: PathBuf,
    /// Translation table mapping column fields to headers (YAML or JSON)
    #[arg(short = 't', long = "translations")]
    pub translations: PathBuf,
    /// JSON array of journey instance records ('-' reads stdin)
    #[arg(short = 'r', long = "rows")]
    pub rows: PathBuf,
    /// Sort directives of the form `field[:asc|desc]`
    #[arg(long = "sort", action = clap::ArgAction::Append)]
    pub sort: Vec<String>,
    /// Keep only rows where some cell contains this text
    #[arg(short = 's', long = "search")]
    pub search: Option<String>,
    /// Limit number of rows emitted
    #[arg(long)]
    pub limit: Option<usize>,
    /// Display configuration file (YAML)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Reference time for relative dates (RFC 3339, defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Override the calendar date pattern (chrono strftime syntax)
    #[arg(long = "date-format")]
    pub date_format: Option<String>,
    /// Override the table cell width cap
    #[arg(long = "max-cell-width")]
    pub max_cell_width: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TranslationsArgs {
    /// Journey schema file (YAML or JSON)
    #[arg(short = 'j', long = "journey")]
    pub journey: PathBuf,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table with formatted values
    Table,
    /// CSV with canonical cell text
    Csv,
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("Invalid RFC 3339 timestamp '{value}': {err}"))
}

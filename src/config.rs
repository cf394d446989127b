//! Display configuration threaded into formatters and render descriptors.
//!
//! Nothing in the column engine reads ambient state: date patterns, preview
//! bounds and the current time all arrive through a [`FormatContext`].

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use chrono::{
    DateTime, NaiveDateTime, Utc,
    format::{Item, StrftimeItems},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";
pub const DEFAULT_PREVIEW_MAX_CHARS: usize = 300;
pub const DEFAULT_MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// `chrono` strftime pattern for calendar-date columns.
    pub date_format: String,
    /// Bound for the survey preview summary, in characters.
    pub preview_max_chars: usize,
    /// Terminal column width cap used by plain-text rendering.
    pub max_cell_width: usize,
    /// Whether person chips carry visible names.
    pub show_person_names: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            preview_max_chars: DEFAULT_PREVIEW_MAX_CHARS,
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            show_person_names: false,
        }
    }
}

impl GridConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let reader = BufReader::new(file);
        let config: GridConfig =
            serde_yaml::from_reader(reader).context("Parsing grid config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.date_format.trim().is_empty(),
            "date_format must not be empty"
        );
        ensure!(
            !StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)),
            "date_format '{}' is not a valid strftime pattern",
            self.date_format
        );
        ensure!(
            self.preview_max_chars >= 4,
            "preview_max_chars must leave room for an ellipsis (got {})",
            self.preview_max_chars
        );
        ensure!(
            self.max_cell_width >= 4,
            "max_cell_width must leave room for an ellipsis (got {})",
            self.max_cell_width
        );
        Ok(())
    }
}

/// Everything a formatter or renderer may depend on besides the cell itself.
#[derive(Debug, Clone)]
pub struct FormatContext {
    pub config: GridConfig,
    pub now: DateTime<Utc>,
}

impl FormatContext {
    pub fn new(config: GridConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }

    pub fn now_naive(&self) -> NaiveDateTime {
        self.now.naive_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "preview_max_chars: 120").unwrap();
        let config = GridConfig::load(file.path()).expect("load config");
        assert_eq!(config.preview_max_chars, 120);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert!(!config.show_person_names);
    }

    #[test]
    fn load_rejects_tiny_preview_bound() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "preview_max_chars: 2").unwrap();
        let err = GridConfig::load(file.path()).expect_err("bound too small");
        assert!(err.to_string().contains("preview_max_chars"));
    }

    #[test]
    fn validate_rejects_unknown_strftime_specifiers() {
        let mut config = GridConfig::default();
        config.date_format = "%Q".to_string();
        let err = config.validate().expect_err("unknown specifier");
        assert!(err.to_string().contains("'%Q'"));

        config.date_format = "%Y-%m-%d".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_cell_width_without_room_for_ellipsis() {
        let mut config = GridConfig::default();
        for width in [0, 1, 2, 3] {
            config.max_cell_width = width;
            assert!(config.validate().is_err(), "width {width} should be rejected");
        }
        config.max_cell_width = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GridConfig::load(Path::new("no_such_grid_config.yml"))
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("no_such_grid_config.yml"));
    }
}

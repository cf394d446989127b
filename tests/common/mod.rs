#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use journey_grid::{
    assemble::{ColumnDescriptor, assemble_columns},
    io_utils,
    journey::{JourneySchema, Translations},
    projection::Row,
    registry::ColumnTypeRegistry,
};
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn fixture_journey() -> JourneySchema {
    JourneySchema::load(&fixture_path("journey.yaml")).expect("load journey fixture")
}

pub fn fixture_translations() -> Translations {
    Translations::load(&fixture_path("translations.yaml")).expect("load translations fixture")
}

pub fn fixture_rows() -> Vec<Row> {
    io_utils::read_rows(&fixture_path("instances.json")).expect("load instance fixture")
}

pub fn fixture_columns() -> Vec<ColumnDescriptor> {
    assemble_columns(
        &fixture_journey(),
        &fixture_translations(),
        &ColumnTypeRegistry::standard(),
    )
    .expect("assemble fixture columns")
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

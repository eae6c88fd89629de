// Shared test helpers for dataset files.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::PathBuf;
use tempfile::TempDir;

/// Sample dataset with two schools.
#[allow(dead_code)] // Used by other test files
pub const SAMPLE_CSV: &str = "id,name,abbreviations,alternatives\n\
1,Acme School,\"{\"\"AS\"\"}\",{}\n\
2,Beta College,\"{\"\"BC\"\",\"\"BCO\"\"}\",\"{\"\"Beta\"\"}\"\n";

/// Writes `contents` to `schools.csv` in a fresh temporary directory.
///
/// The directory is returned so it lives as long as the test needs the file.
#[allow(dead_code)]
pub fn write_dataset(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("schools.csv");
    std::fs::write(&path, contents).expect("Failed to write dataset");
    (dir, path)
}

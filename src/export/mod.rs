//! Export functionality for the schools dataset.
//!
//! This module provides functions to export the dataset into the shapes other
//! systems ingest.

mod csv;

pub use csv::{export_for_database, write_database_csv};

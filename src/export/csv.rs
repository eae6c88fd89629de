//! Database CSV export.
//!
//! Writes the `id,name` projection of every school with every field quoted, so
//! the file reads back the same no matter what the names contain.

use csv::{QuoteStyle, WriterBuilder};
use log::info;
use std::io::Write;

use crate::config::{OutputTarget, COLUMN_ID, COLUMN_NAME};
use crate::error_handling::StoreError;
use crate::store::SchoolStore;
use crate::utils::write_output;

/// Writes the database projection of `store` to `writer`.
///
/// # Returns
///
/// The number of rows written, not counting the header.
pub fn write_database_csv<W: Write>(store: &SchoolStore, writer: W) -> Result<usize, StoreError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    writer.write_record([COLUMN_ID, COLUMN_NAME])?;

    let mut record_count = 0;
    for row in store.database_rows() {
        writer.serialize(row)?;
        record_count += 1;
    }

    writer.flush()?;

    Ok(record_count)
}

/// Exports the database projection to a file or stdout.
///
/// # Arguments
///
/// * `store` - Snapshot to export
/// * `output` - Destination; an existing file is overwritten
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub fn export_for_database(store: &SchoolStore, output: &OutputTarget) -> Result<usize, StoreError> {
    let record_count = write_output(output, |w| write_database_csv(store, w))?;
    info!("Exported {} schools to {}", record_count, output);
    Ok(record_count)
}

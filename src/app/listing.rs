//! Human-readable dataset listing.

use std::io::Write;

use crate::error_handling::StoreError;
use crate::store::SchoolStore;

/// Writes one tab-separated line per school with decoded list columns.
///
/// Every record is decoded before the first line is written, so a malformed
/// row produces no partial output.
pub fn write_listing<W: Write>(store: &SchoolStore, mut writer: W) -> Result<usize, StoreError> {
    let documents = store.search_documents()?;
    for doc in &documents {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            doc.object_id,
            doc.name,
            doc.abbreviations.join(", "),
            doc.alternatives.join(", ")
        )?;
    }
    writer.flush()?;
    Ok(documents.len())
}

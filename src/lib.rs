//! schools library: curation and publishing of the verified schools dataset.
//!
//! The dataset is a CSV file with an `id,name,abbreviations,alternatives`
//! header. The two list columns hold set literals such as `{"AS","ACME"}`.
//! This crate loads that file into an immutable [`SchoolStore`] snapshot,
//! appends records, exports the `id,name` projection for the database, and
//! publishes search documents to a hosted Algolia index.
//!
//! # Example
//!
//! ```no_run
//! use schools::store::{NewSchool, StoreSource};
//! use schools::OutputTarget;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = StoreSource::new("schools.csv");
//! let store = source.load()?;
//! let next = store.append(NewSchool {
//!     name: "Acme School".to_string(),
//!     abbreviations: vec!["AS".to_string()],
//!     alternatives: vec![],
//! })?;
//! next.save(&OutputTarget::File(source.path().to_path_buf()))?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod search;
pub mod store;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputTarget};
pub use error_handling::{CodecError, SearchError, StoreError};
pub use store::{SchoolRecord, SchoolStore, SearchDocument};

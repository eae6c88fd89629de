//! Derived views of a school record.
//!
//! Neither projection is persisted; both are recomputed from the store every
//! time a command needs them.

use serde::{Deserialize, Serialize};

use super::{SchoolRecord, SchoolStore};
use crate::config::{COLUMN_ABBREVIATIONS, COLUMN_ALTERNATIVES};
use crate::error_handling::StoreError;

/// A row of the database export: `id` and `name` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// A record as pushed to the search index, keyed by `objectID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub name: String,
    pub abbreviations: Vec<String>,
    pub alternatives: Vec<String>,
}

impl SchoolRecord {
    /// Narrows the record to its database columns.
    pub fn to_database_row(&self) -> DatabaseRow<'_> {
        DatabaseRow {
            id: &self.id,
            name: &self.name,
        }
    }

    /// Builds the search document, decoding both list columns.
    pub fn to_search_document(&self) -> Result<SearchDocument, StoreError> {
        let decode_field = |field: &'static str, literal: &super::SetLiteral| {
            literal.values().map_err(|source| StoreError::Decode {
                record_id: self.id.clone(),
                field,
                source,
            })
        };
        Ok(SearchDocument {
            object_id: self.id.clone(),
            name: self.name.clone(),
            abbreviations: decode_field(COLUMN_ABBREVIATIONS, &self.abbreviations)?,
            alternatives: decode_field(COLUMN_ALTERNATIVES, &self.alternatives)?,
        })
    }
}

impl SchoolStore {
    /// Database rows in store order.
    pub fn database_rows(&self) -> impl Iterator<Item = DatabaseRow<'_>> {
        self.records().iter().map(SchoolRecord::to_database_row)
    }

    /// Search documents for every record, in store order.
    ///
    /// Fails on the first record whose list columns do not decode; no partial
    /// result is returned.
    pub fn search_documents(&self) -> Result<Vec<SearchDocument>, StoreError> {
        self.records()
            .iter()
            .map(SchoolRecord::to_search_document)
            .collect()
    }
}

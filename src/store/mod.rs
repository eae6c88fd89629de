//! The schools dataset.
//!
//! A [`SchoolStore`] is an immutable snapshot of every record in the source
//! CSV file. Appending produces a new snapshot; the old one is left as it was.
//!
//! List columns stay in their stored set-literal form ([`SetLiteral`]) until a
//! projection decodes them, so rows that are read and written back without
//! being touched keep their exact bytes.

pub mod codec;
mod projection;

use std::collections::HashSet;
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{
    OutputTarget, COLUMN_ABBREVIATIONS, COLUMN_ALTERNATIVES, COLUMN_ID, COLUMN_NAME,
};
use crate::error_handling::{CodecError, StoreError};
use crate::utils::write_output;

pub use projection::{DatabaseRow, SearchDocument};

/// Header of the source file.
pub const HEADER: [&str; 4] = [
    COLUMN_ID,
    COLUMN_NAME,
    COLUMN_ABBREVIATIONS,
    COLUMN_ALTERNATIVES,
];

/// A list column in its stored set-literal encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetLiteral(String);

impl SetLiteral {
    /// Encodes `values` into a new literal.
    pub fn encode<S: AsRef<str>>(values: &[S]) -> Self {
        SetLiteral(codec::encode(values))
    }

    /// Wraps a value read from the file without checking it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        SetLiteral(raw.into())
    }

    /// The stored text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the literal. An empty cell is an empty list.
    pub fn values(&self) -> Result<Vec<String>, CodecError> {
        if self.0.trim().is_empty() {
            return Ok(Vec::new());
        }
        codec::decode(&self.0)
    }
}

impl fmt::Display for SetLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: String,
    pub name: String,
    pub abbreviations: SetLiteral,
    pub alternatives: SetLiteral,
}

/// Field values for a school that has not been added yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub abbreviations: Vec<String>,
    pub alternatives: Vec<String>,
}

impl NewSchool {
    /// Checks the values before anything is encoded or written.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation(
                "school name must not be empty".to_string(),
            ));
        }
        for (field, values) in [
            (COLUMN_ABBREVIATIONS, &self.abbreviations),
            (COLUMN_ALTERNATIVES, &self.alternatives),
        ] {
            if let Some(bad) = values.iter().find(|v| !codec::is_encodable(v)) {
                return Err(StoreError::Validation(format!(
                    "{} value {:?} contains a double quote, backslash, or control character",
                    field, bad
                )));
            }
        }
        Ok(())
    }
}

/// Immutable snapshot of every record, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolStore {
    records: Vec<SchoolRecord>,
}

impl SchoolStore {
    /// Builds a snapshot, rejecting duplicate ids.
    pub fn new(records: Vec<SchoolRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(StoreError::InvariantViolation {
                    id: record.id.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Parses a CSV document with an `id,name,abbreviations,alternatives` header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new().from_reader(reader);
        let records = reader
            .deserialize()
            .collect::<Result<Vec<SchoolRecord>, csv::Error>>()?;
        Self::new(records)
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        let store = Self::from_reader(file)?;
        debug!("Loaded {} schools from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a record up by id.
    pub fn get(&self, id: &str) -> Option<&SchoolRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns a new snapshot with `school` appended under a fresh random id.
    ///
    /// Existing rows keep their order and contents; the new row is last.
    pub fn append(&self, school: NewSchool) -> Result<Self, StoreError> {
        self.append_with_id(uuid::Uuid::new_v4().to_string(), school)
    }

    pub(crate) fn append_with_id(&self, id: String, school: NewSchool) -> Result<Self, StoreError> {
        school.validate()?;
        if self.get(&id).is_some() {
            return Err(StoreError::InvariantViolation { id });
        }

        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend_from_slice(&self.records);
        records.push(SchoolRecord {
            id,
            name: school.name,
            abbreviations: SetLiteral::encode(&school.abbreviations),
            alternatives: SetLiteral::encode(&school.alternatives),
        });
        Ok(Self { records })
    }

    /// Writes the snapshot as CSV, header first.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(HEADER)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the snapshot to a file (replaced atomically) or stdout.
    pub fn save(&self, target: &OutputTarget) -> Result<(), StoreError> {
        write_output(target, |w| self.write_to(w))?;
        info!("Wrote {} schools to {}", self.len(), target);
        Ok(())
    }
}

/// The dataset file, not yet parsed.
///
/// Commands that never touch the records never pay for reading them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSource {
    path: PathBuf,
}

impl StoreSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current snapshot.
    pub fn load(&self) -> Result<SchoolStore, StoreError> {
        SchoolStore::load(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "id,name,abbreviations,alternatives\n\
1,Acme School,\"{\"\"AS\"\"}\",{}\n\
2,Beta College,\"{\"\"BC\"\",\"\"BCO\"\"}\",\"{\"\"Beta\"\"}\"\n";

    fn sample() -> SchoolStore {
        SchoolStore::from_reader(SAMPLE.as_bytes()).expect("sample should parse")
    }

    fn school(name: &str) -> NewSchool {
        NewSchool {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_reader() {
        let store = sample();
        assert_eq!(store.len(), 2);
        let acme = store.get("1").unwrap();
        assert_eq!(acme.name, "Acme School");
        assert_eq!(acme.abbreviations.as_str(), r#"{"AS"}"#);
        assert_eq!(acme.alternatives.as_str(), "{}");
        assert_eq!(
            store.get("2").unwrap().abbreviations.values().unwrap(),
            vec!["BC", "BCO"]
        );
    }

    #[test]
    fn test_duplicate_ids_rejected_on_load() {
        let csv = "id,name,abbreviations,alternatives\n1,A,{},{}\n1,B,{},{}\n";
        match SchoolStore::from_reader(csv.as_bytes()) {
            Err(StoreError::InvariantViolation { id }) => assert_eq!(id, "1"),
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "id,name\n1,A\n";
        assert!(matches!(
            SchoolStore::from_reader(csv.as_bytes()),
            Err(StoreError::Csv(_))
        ));
    }

    #[test]
    fn test_empty_cell_is_empty_list() {
        let csv = "id,name,abbreviations,alternatives\n1,A,,{}\n";
        let store = SchoolStore::from_reader(csv.as_bytes()).unwrap();
        assert!(store.get("1").unwrap().abbreviations.values().unwrap().is_empty());
    }

    #[test]
    fn test_append_adds_one_row_last() {
        let store = sample();
        let next = store
            .append(NewSchool {
                name: "Gamma Institute".to_string(),
                abbreviations: vec!["GI".to_string()],
                alternatives: vec![],
            })
            .unwrap();

        assert_eq!(next.len(), store.len() + 1);
        assert_eq!(&next.records()[..store.len()], store.records());
        let added = next.records().last().unwrap();
        assert_eq!(added.name, "Gamma Institute");
        assert_eq!(added.abbreviations.as_str(), r#"{"GI"}"#);
        assert_eq!(added.alternatives.as_str(), "{}");
        assert!(uuid::Uuid::parse_str(&added.id).is_ok());
        // The old snapshot is unchanged
        assert_eq!(store, sample());
    }

    #[test]
    fn test_append_empty_name_is_validation_error() {
        let store = sample();
        assert!(matches!(
            store.append(school("")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.append(school("   ")),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_append_rejects_unencodable_values() {
        let result = sample().append(NewSchool {
            name: "Quote School".to_string(),
            abbreviations: vec!["Q\"S".to_string()],
            alternatives: vec![],
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_append_with_existing_id_is_invariant_violation() {
        let result = sample().append_with_id("2".to_string(), school("Clash"));
        match result {
            Err(StoreError::InvariantViolation { id }) => assert_eq!(id, "2"),
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_write_preserves_untouched_rows() {
        let mut out = Vec::new();
        sample().write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), SAMPLE);
    }

    #[test]
    fn test_write_empty_store_keeps_header() {
        let mut out = Vec::new();
        SchoolStore::default().write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,name,abbreviations,alternatives\n"
        );
    }
}

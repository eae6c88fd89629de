//! Tests for the database CSV export.

use schools::app::for_database;
use schools::export::export_for_database;
use schools::store::StoreSource;
use schools::{OutputTarget, SchoolStore};

#[path = "helpers.rs"]
mod helpers;

use helpers::{write_dataset, SAMPLE_CSV};

#[test]
fn test_export_writes_quoted_id_and_name() {
    let (dir, path) = write_dataset(SAMPLE_CSV);
    let output = dir.path().join("for_database.csv");

    let count = for_database(&StoreSource::new(&path), &OutputTarget::File(output.clone())).unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "\"id\",\"name\"\n\"1\",\"Acme School\"\n\"2\",\"Beta College\"\n"
    );
}

#[test]
fn test_export_overwrites_existing_file() {
    let (dir, path) = write_dataset(SAMPLE_CSV);
    let output = dir.path().join("for_database.csv");
    std::fs::write(&output, "stale data that is much longer than the export itself\n".repeat(10))
        .unwrap();

    for_database(&StoreSource::new(&path), &OutputTarget::File(output.clone())).unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(!contents.contains("stale"));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_export_reads_back_with_csv_reader() {
    let csv = "id,name,abbreviations,alternatives\n\
a,\"Saint Mary's, \"\"Upper\"\" School\",{},{}\n\
b,Plain,{},{}\n";
    let (dir, path) = write_dataset(csv);
    let output = dir.path().join("out.csv");
    let store = SchoolStore::load(&path).unwrap();

    export_for_database(&store, &OutputTarget::File(output.clone())).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<(String, String)> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(
        rows,
        vec![
            ("a".to_string(), "Saint Mary's, \"Upper\" School".to_string()),
            ("b".to_string(), "Plain".to_string()),
        ]
    );
}

//! Integration tests for loading and saving collection documents.

mod common;

use std::fs::File;
use std::io::Write;

use common::{sample_mapping, sample_store};
use marcvoc::{ConceptStore, Marc21, Marc21Options};

#[test]
fn test_load_collection_document_from_file() {
    let document = serde_json::json!({"concepts": sample_mapping()});

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("realfagstermer.json");
    let mut file = File::create(&path).unwrap();
    file.write_all(document.to_string().as_bytes()).unwrap();

    let store = ConceptStore::from_json_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(store.len(), 8);
    assert_eq!(store.by_id("REAL000001").unwrap().pref_label("nb"), Some("Energi"));
}

#[test]
fn test_save_load_export_pipeline() {
    let store = sample_store();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary.json");
    store.to_json_writer(File::create(&path).unwrap()).unwrap();

    let reloaded = ConceptStore::from_json_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(reloaded.len(), store.len());

    let xml = Marc21::from_store(reloaded, Marc21Options::default().agency("NoOU"))
        .serialize()
        .unwrap();
    let xml_path = dir.path().join("vocabulary.marc21.xml");
    std::fs::write(&xml_path, &xml).unwrap();

    let written = std::fs::read_to_string(&xml_path).unwrap();
    assert_eq!(written, xml);
    assert!(written.contains("REAL000001"));
}

#[test]
fn test_malformed_collection_document_fails_before_transcoding() {
    let result = ConceptStore::from_json_str("{\"concepts\": [1, 2, 3]}");
    assert!(result.is_err());

    let result = ConceptStore::from_json_str("not json at all");
    assert!(result.is_err());
}

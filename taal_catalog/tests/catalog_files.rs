//! File-level behaviour of the JSON catalog.

use pretty_assertions::assert_eq;
use taal_catalog::{CatalogError, PatternCatalog, Taal, TaalCatalog};

#[test]
fn save_then_load_preserves_entries() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("taals.json");

    let mut catalog = TaalCatalog::with_defaults();
    catalog
        .insert(Taal::from_bols("Tilwada", ["Dha", "Tirakita", "Dhin", "Dhin"]))
        .unwrap();
    catalog.save_json(&path).unwrap();

    let loaded = TaalCatalog::load_json(&path).unwrap();
    assert_eq!(loaded.list(), catalog.list());
    assert_eq!(loaded.get("Tilwada").unwrap().system, "Custom");
}

#[test]
fn missing_file_reports_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("absent.json");
    match TaalCatalog::load_json(&path) {
        Err(CatalogError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn merge_overrides_builtin() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("override.json");
    std::fs::write(
        &path,
        r#"{ "Hindustani": { "Dadra": { "beats": 3, "bols": ["Dha", "Dhin", "Na"] } } }"#,
    )
    .unwrap();

    let mut catalog = TaalCatalog::with_defaults();
    let n = catalog.merge_json_file(&path).unwrap();
    assert_eq!(n, 1);
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.lookup("Dadra").unwrap().beats, 3);
}

#[test]
fn shipped_data_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/taals.json");
    let catalog = TaalCatalog::load_json(path).unwrap();
    assert!(catalog.get("Teentaal").is_some());
    assert!(catalog.systems().contains(&"Carnatic"));
}

//! Integration tests for entail-store
//!
//! These tests run the full save / history / restore cycle against both backends.

use entail_domain::{Claim, Hypergraph, Implication, SnapshotStore, ROOT_CLAIM_ID};
use entail_store::{FileBackend, SqliteBackend, StoreError, VersionedStore};
use tempfile::TempDir;

fn edit(graph: &mut Hypergraph, name: &str) {
    graph.metadata.name = name.to_string();
}

fn history_cycle<B: SnapshotStore<Error = StoreError>>(mut store: VersionedStore<B>) {
    let mut graph = Hypergraph::new("v1", "", "Root hypothesis");
    store.save(&mut graph).unwrap();

    edit(&mut graph, "v2");
    store.save(&mut graph).unwrap();
    edit(&mut graph, "v3");
    store.save(&mut graph).unwrap();

    let history = store.get_history().unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].timestamp <= history[1].timestamp);
    assert_eq!(store.read_snapshot(&history[0].id).unwrap().metadata.name, "v1");
    assert_eq!(store.read_snapshot(&history[1].id).unwrap().metadata.name, "v2");

    // Restore v1: exactly one new entry holding the state just replaced (v3)
    let (restored, receipt) = store.restore(&history[0].id).unwrap();
    assert_eq!(restored.metadata.name, "v1");
    assert_eq!(store.load().unwrap().unwrap().metadata.name, "v1");

    let after = store.get_history().unwrap();
    assert_eq!(after.len(), history.len() + 1);
    assert_eq!(&after[..2], &history[..]);
    let newest = after.last().unwrap();
    assert_eq!(receipt.snapshot.as_ref().map(|s| &s.id), Some(&newest.id));
    assert_eq!(store.read_snapshot(&newest.id).unwrap().metadata.name, "v3");

    // The restored snapshot itself is untouched
    assert_eq!(store.read_snapshot(&history[0].id).unwrap().metadata.name, "v1");
}

#[test]
fn test_sqlite_history_cycle() {
    history_cycle(VersionedStore::new(SqliteBackend::in_memory().unwrap()));
}

#[test]
fn test_file_history_cycle() {
    let dir = TempDir::new().unwrap();
    history_cycle(VersionedStore::new(FileBackend::new(dir.path()).unwrap()));
}

#[test]
fn test_sqlite_file_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entail.db");

    {
        let mut store = VersionedStore::new(SqliteBackend::new(&path).unwrap());
        let mut graph = Hypergraph::new("persisted", "", "Root");
        store.save(&mut graph).unwrap();
        edit(&mut graph, "persisted-2");
        store.save(&mut graph).unwrap();
    }

    let store = VersionedStore::new(SqliteBackend::new(&path).unwrap());
    assert_eq!(store.load().unwrap().unwrap().metadata.name, "persisted-2");
    assert_eq!(store.get_history().unwrap().len(), 1);
}

#[test]
fn test_file_backend_document_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let mut store = VersionedStore::new(FileBackend::new(dir.path()).unwrap());

    let mut graph = Hypergraph::new("json", "", "Root");
    graph.claims.push(Claim::new("c1", "Unscored premise"));
    graph.implications.push(Implication::and("i1", &["c1"], ROOT_CLAIM_ID));
    store.save(&mut graph).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("hypergraph.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["claims"][1]["cost"], serde_json::Value::Null);
    assert_eq!(value["claims"][1]["experimental_epistemic_cost"], serde_json::Value::Null);
    assert_eq!(value["implications"][0]["type"], "AND");
    assert!(value["metadata"]["cached_validation"]["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_history_never_shrinks() {
    let mut store = VersionedStore::new(SqliteBackend::in_memory().unwrap());
    let mut graph = Hypergraph::new("n", "", "Root");
    store.save(&mut graph).unwrap();

    let mut previous = 0;
    for i in 0..5 {
        edit(&mut graph, &format!("rev{}", i));
        store.save(&mut graph).unwrap();
        let len = store.get_history().unwrap().len();
        assert!(len > previous);
        previous = len;
    }

    let first = store.get_history().unwrap()[0].id.clone();
    store.restore(&first).unwrap();
    assert_eq!(store.get_history().unwrap().len(), previous + 1);
}

#[test]
fn test_missing_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut store = VersionedStore::new(FileBackend::new(dir.path()).unwrap());
    let mut graph = Hypergraph::new("n", "", "Root");
    store.save(&mut graph).unwrap();

    let err = store.restore(&"000042-20240101T000000.000000Z".into()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(store.get_history().unwrap().is_empty());
}

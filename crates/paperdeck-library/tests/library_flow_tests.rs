//! End-to-end flows across the meta store and ledger, including persistence.

use std::collections::HashSet;

use paperdeck_domain::{ReadStatus, SwipeAction};
use paperdeck_library::{LibraryMetaStore, SwipeLedger};

fn ids(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn folder_lifecycle_scenario() {
    let mut store = LibraryMetaStore::in_memory();

    store.sync_saved_ids(&ids(&["p1", "p2"]));
    assert_eq!(store.meta("p1").unwrap().folder_id, None);
    assert_eq!(store.meta("p2").unwrap().folder_id, None);

    let f1 = store.add_folder("ML", None).unwrap();
    store.update_folder("p1", Some(f1.id.as_str()));
    assert_eq!(store.direct_paper_count(&f1.id), 1);
    assert_eq!(store.total_paper_count(&f1.id), 1);

    let f2 = store.add_folder("Sub", Some(f1.id.as_str())).unwrap();
    store.update_folder("p2", Some(f2.id.as_str()));
    assert_eq!(store.total_paper_count(&f1.id), 2);
    assert_eq!(store.direct_paper_count(&f1.id), 1);

    store.remove_folder(&f1.id);
    assert_eq!(store.meta("p1").unwrap().folder_id, None);
    assert_eq!(store.meta("p2").unwrap().folder_id, None);
    assert_eq!(store.folder_count(), 0);
}

#[test]
fn flat_tree_excludes_subtree_of_excluded_folder() {
    let mut store = LibraryMetaStore::in_memory();
    let f1 = store.add_folder("ML", None).unwrap();
    let f2 = store.add_folder("Sub", Some(f1.id.as_str())).unwrap();
    let other = store.add_folder("Other", None).unwrap();

    let visible: Vec<String> = store
        .flat_folder_tree(Some(&f1.id))
        .into_iter()
        .map(|(f, _)| f.id)
        .collect();
    assert!(!visible.contains(&f1.id));
    assert!(!visible.contains(&f2.id));
    assert_eq!(visible, vec![other.id]);
}

#[test]
fn meta_store_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_store.json");

    let folder_id;
    {
        let mut store = LibraryMetaStore::open(&path);
        store.sync_saved_ids(&ids(&["p1", "p2"]));
        let folder = store.add_folder("Persisted", None).unwrap();
        folder_id = folder.id.clone();
        store.update_folder("p1", Some(folder.id.as_str()));
        store.update_tags("p1", ["rust", "storage"]);
        store.update_status("p2", ReadStatus::Reading);
        store.update_note("p2", "revisit section 3");
    }

    let store = LibraryMetaStore::open(&path);
    assert_eq!(store.folder_count(), 1);
    assert_eq!(store.folder_name(Some(&folder_id)), Some("Persisted"));

    let p1 = store.meta("p1").unwrap();
    assert_eq!(p1.folder_id, Some(folder_id));
    assert_eq!(p1.tags, vec!["rust", "storage"]);

    let p2 = store.meta("p2").unwrap();
    assert_eq!(p2.status, ReadStatus::Reading);
    assert_eq!(p2.note, "revisit section 3");
}

#[test]
fn corrupt_library_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_store.json");
    std::fs::write(&path, "definitely not json").unwrap();

    let store = LibraryMetaStore::open(&path);
    assert_eq!(store.folder_count(), 0);
    assert!(store.meta("p1").is_none());
}

#[test]
fn nested_removal_reparents_to_grandparent_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_store.json");

    let mut store = LibraryMetaStore::open(&path);
    let root = store.add_folder("Root", None).unwrap();
    let mid = store.add_folder("Mid", Some(root.id.as_str())).unwrap();
    store.sync_saved_ids(&ids(&["p1"]));
    store.update_folder("p1", Some(mid.id.as_str()));
    store.remove_folder(&mid.id);

    let reloaded = LibraryMetaStore::open(&path);
    assert_eq!(reloaded.meta("p1").unwrap().folder_id, Some(root.id));
    assert!(reloaded.folder(&mid.id).is_none());
}

#[test]
fn ledger_drives_meta_reconciliation() {
    let mut ledger = SwipeLedger::in_memory();
    let mut store = LibraryMetaStore::in_memory();

    ledger.save("p1");
    ledger.record_event("p1", SwipeAction::Like);
    ledger.save("p2");
    ledger.record_event("p2", SwipeAction::Like);
    store.sync_saved_ids(ledger.saved_ids());
    assert!(store.meta("p1").is_some());
    assert!(store.meta("p2").is_some());

    ledger.remove_saved("p1");
    store.sync_saved_ids(ledger.saved_ids());
    assert!(store.meta("p1").is_none());
    assert!(store.meta("p2").is_some());

    // The audit log is unaffected by removal.
    assert_eq!(ledger.events().len(), 2);
}

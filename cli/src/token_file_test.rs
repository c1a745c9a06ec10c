use super::*;

fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
    FileTokenStore::new(dir.path().join("token"))
}

#[test]
fn missing_file_is_empty_slot() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.get(), None);
    assert!(!store.has_token());
}

#[test]
fn set_then_get_returns_exact_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set("\"abc.def.ghi\"");
    assert_eq!(store.get().as_deref(), Some("\"abc.def.ghi\""));
    assert_eq!(store.token().as_deref(), Some("abc.def.ghi"));
}

#[test]
fn trailing_newline_from_editors_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "tok\n").unwrap();
    assert_eq!(store.get().as_deref(), Some("tok"));
}

#[test]
fn clear_removes_file_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set("tok");
    store.clear();
    assert!(!store.path().exists());
    assert_eq!(store.get(), None);
    store.remove().unwrap();
}

use std::sync::Arc;

use aether_vault::db;
use aether_vault::identity::Session;
use aether_vault::store::{KvBlobStore, LocalStore, RemoteStore};
use aether_vault::vault::types::SaveRequest;
use aether_vault::vault::Vault;
use tempfile::TempDir;

#[test]
fn open_creates_new_db_at_nonexistent_path() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("subdir").join("remote.db");
    assert!(!db_path.exists());

    let conn = db::open_database(&db_path).unwrap();
    assert!(db_path.exists());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn health_check_passes_on_fresh_db() {
    let conn = db::open_memory_database().unwrap();

    let report = db::check_database_health(&conn).unwrap();
    assert!(report.integrity_ok);
    assert_eq!(report.schema_version, db::migrations::CURRENT_SCHEMA_VERSION);
    assert_eq!(report.note_count, 0);
    assert_eq!(report.owner_count, 0);
}

#[test]
fn busy_timeout_is_set() {
    let tmp = TempDir::new().unwrap();
    let conn = db::open_database(tmp.path().join("test.db")).unwrap();

    let timeout: i64 = conn
        .pragma_query_value(None, "busy_timeout", |row| row.get(0))
        .unwrap();
    assert_eq!(timeout, 5000);
}

#[test]
fn reopening_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("remote.db");

    drop(db::open_database(&db_path).unwrap());
    let conn = db::open_database(&db_path).unwrap();
    assert_eq!(
        db::migrations::get_schema_version(&conn).unwrap(),
        db::migrations::CURRENT_SCHEMA_VERSION
    );
}

#[tokio::test]
async fn remote_notes_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("remote.db");
    let session = Arc::new(Session::signed_in("uid-7"));

    {
        let remote = RemoteStore::open(&db_path, session.clone()).unwrap();
        let vault = Vault::new(LocalStore::new(KvBlobStore::in_memory()), session.clone())
            .with_remote(remote);
        vault
            .save_thought(SaveRequest::new("Persisted", "still here #kept"))
            .await
            .unwrap();
    }

    let remote = RemoteStore::open(&db_path, session.clone()).unwrap();
    let vault =
        Vault::new(LocalStore::new(KvBlobStore::in_memory()), session).with_remote(remote);
    let note = vault.read_thought("persisted.md").await.unwrap().unwrap();
    assert_eq!(note.body, "still here #kept");
    assert_eq!(note.tags, vec!["kept"]);

    let conn = db::open_database(&db_path).unwrap();
    let report = db::check_database_health(&conn).unwrap();
    assert_eq!(report.note_count, 1);
    assert_eq!(report.owner_count, 1);
}

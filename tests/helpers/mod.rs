#![allow(dead_code)]

use std::sync::Arc;

use aether_vault::identity::{Anonymous, Session};
use aether_vault::store::{FsBlobStore, KvBlobStore, LocalStore, RemoteStore};
use aether_vault::vault::Vault;
use tempfile::TempDir;

/// Local-only vault backed by an in-memory key-value blob.
pub fn memory_vault() -> Vault {
    Vault::new(LocalStore::new(KvBlobStore::in_memory()), Arc::new(Anonymous))
}

/// Local-only vault with one markdown file per note under a temp dir.
/// Keep the `TempDir` alive for as long as the vault is used.
pub fn file_vault() -> (Vault, TempDir) {
    let tmp = TempDir::new().unwrap();
    let store = LocalStore::new(FsBlobStore::new(tmp.path().join("thoughts")));
    (Vault::new(store, Arc::new(Anonymous)), tmp)
}

/// Vault with both stores wired to one session, initially signed out.
pub fn dual_vault() -> (Vault, Arc<Session>) {
    let session = Arc::new(Session::new());
    let remote = RemoteStore::in_memory(session.clone()).unwrap();
    let vault = Vault::new(LocalStore::new(KvBlobStore::in_memory()), session.clone())
        .with_remote(remote);
    (vault, session)
}

/// Ids of a listing, in order.
pub fn ids(notes: &[aether_vault::vault::types::Note]) -> Vec<String> {
    notes.iter().map(|n| n.id.clone()).collect()
}

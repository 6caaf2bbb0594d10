//! Persistence backends behind the vault facade.
//!
//! Both [`LocalStore`] and [`RemoteStore`] implement [`NoteStore`]. The facade
//! resolves ids, timestamps and rename handling before calling `save`, so a
//! store only has to persist what it is given.

pub mod blob;
pub mod local;
pub mod remote;

pub use blob::{BlobStore, FsBlobStore, KvBlobStore};
pub use local::LocalStore;
pub use remote::RemoteStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::vault::types::{Note, NoteWrite};

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Upsert `write` under `write.id`. Returns the id written.
    async fn save(&self, write: NoteWrite) -> Result<String>;

    /// `Ok(None)` when no note exists under `id`.
    async fn read(&self, id: &str) -> Result<Option<Note>>;

    /// All notes, most recently updated first. Archived notes only when asked.
    async fn read_all(&self, include_archived: bool) -> Result<Vec<Note>>;

    /// Remove `id`. Deleting a missing note is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Flip the archive flag and bump `updated_at`. `Ok(false)` if `id` is missing.
    async fn set_archived(&self, id: &str, archived: bool) -> Result<bool>;

    async fn archive(&self, id: &str) -> Result<bool> {
        self.set_archived(id, true).await
    }

    async fn unarchive(&self, id: &str) -> Result<bool> {
        self.set_archived(id, false).await
    }
}

/// Order notes newest-first, breaking ties by id so listings are stable.
pub(crate) fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.recency().cmp(&a.recency()).then_with(|| a.id.cmp(&b.id)));
}

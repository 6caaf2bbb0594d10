//! Device-local note storage over a [`BlobStore`].
//!
//! Each note is one blob: metadata envelope, `# Title` heading, then the body.
//! Reads are forgiving. A blob that cannot be read is reported as absent, and
//! enumeration skips it instead of failing the listing.

use async_trait::async_trait;

use super::blob::BlobStore;
use super::{sort_by_recency, NoteStore};
use crate::error::Result;
use crate::vault::codec::{self, NoteMeta};
use crate::vault::types::{now_millis, Note, NoteWrite};

pub struct LocalStore {
    blobs: Box<dyn BlobStore>,
}

impl LocalStore {
    pub fn new(blobs: impl BlobStore + 'static) -> Self {
        Self::from_boxed(Box::new(blobs))
    }

    pub fn from_boxed(blobs: Box<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Make sure the storage root exists. `true` on first-ever creation.
    pub async fn init(&self) -> Result<bool> {
        self.blobs.ensure_root().await
    }

    /// Destroy every local note and the storage root.
    pub async fn reset(&self) -> Result<()> {
        tracing::warn!("clearing local vault");
        self.blobs.clear().await
    }
}

#[async_trait]
impl NoteStore for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn save(&self, write: NoteWrite) -> Result<String> {
        let blob = codec::compose(&write.meta(), &write.title, &write.body);
        self.blobs.put(&write.id, blob).await?;
        Ok(write.id)
    }

    async fn read(&self, id: &str) -> Result<Option<Note>> {
        match self.blobs.get(id).await {
            Ok(Some(raw)) => Ok(Some(Note::from_stored(id, &raw))),
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!(id, error = %e, "unreadable note treated as absent");
                Ok(None)
            }
        }
    }

    async fn read_all(&self, include_archived: bool) -> Result<Vec<Note>> {
        let keys = self.blobs.keys().await?;
        let mut notes = Vec::with_capacity(keys.len());

        for key in keys {
            match self.blobs.get(&key).await {
                Ok(Some(raw)) => {
                    let note = Note::from_stored(&key, &raw);
                    if include_archived || !note.is_archived {
                        notes.push(note);
                    }
                }
                // Removed between listing and reading.
                Ok(None) => {}
                Err(e) => tracing::warn!(id = %key, error = %e, "skipping unreadable note"),
            }
        }

        sort_by_recency(&mut notes);
        Ok(notes)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.blobs.remove(id).await
    }

    async fn set_archived(&self, id: &str, archived: bool) -> Result<bool> {
        let Some(note) = self.read(id).await? else {
            return Ok(false);
        };

        let now = now_millis();
        let meta = NoteMeta {
            created_at: Some(note.created_at.unwrap_or(now)),
            updated_at: Some(note.updated_at.map_or(now, |prev| now.max(prev.saturating_add(1)))),
            is_archived: archived,
        };
        let blob = codec::compose(&meta, &note.title, &note.body);
        self.blobs.put(id, blob).await?;
        Ok(true)
    }
}

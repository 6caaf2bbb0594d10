//! Per-identity note collection in the document database.
//!
//! Every call resolves the signed-in identity first and fails with
//! [`VaultError::AuthenticationRequired`] when there is none. `save` upserts
//! the whole document; archiving is a partial update that leaves every other
//! field as stored.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::NoteStore;
use crate::db;
use crate::error::{Result, VaultError};
use crate::identity::IdentityProvider;
use crate::vault::codec::{self, NoteMeta};
use crate::vault::types::{now_millis, Note, NoteWrite};

#[derive(Clone)]
pub struct RemoteStore {
    db: Arc<Mutex<Connection>>,
    identity: Arc<dyn IdentityProvider>,
}

impl RemoteStore {
    pub fn new(conn: Connection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            identity,
        }
    }

    pub fn open(path: impl AsRef<Path>, identity: Arc<dyn IdentityProvider>) -> anyhow::Result<Self> {
        Ok(Self::new(db::open_database(path)?, identity))
    }

    pub fn in_memory(identity: Arc<dyn IdentityProvider>) -> anyhow::Result<Self> {
        Ok(Self::new(db::open_memory_database()?, identity))
    }

    fn owner(&self) -> Result<String> {
        self.identity
            .current_identity()
            .ok_or(VaultError::AuthenticationRequired)
    }

    /// Run synchronous SQLite work off the async runtime.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db.lock().unwrap_or_else(|e| e.into_inner());
            f(&conn)
        })
        .await?
    }
}

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at, is_archived";

/// A body that opens with its own heading overrides the stored title, the
/// same way it does for blobs in the local store.
fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let content: String = row.get(2)?;
    let meta = NoteMeta {
        created_at: Some(row.get(3)?),
        updated_at: Some(row.get(4)?),
        is_archived: row.get(5)?,
    };
    Ok(match codec::split_heading(&content) {
        Some((heading, body)) => Note::new(id, heading, body, meta),
        None => Note::new(id, title, content, meta),
    })
}

#[async_trait]
impl NoteStore for RemoteStore {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn save(&self, write: NoteWrite) -> Result<String> {
        let owner = self.owner()?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO notes (owner, id, title, content, created_at, updated_at, is_archived) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
                 ON CONFLICT(owner, id) DO UPDATE SET \
                     title = excluded.title, \
                     content = excluded.content, \
                     created_at = excluded.created_at, \
                     updated_at = excluded.updated_at, \
                     is_archived = excluded.is_archived",
                params![
                    owner,
                    write.id,
                    write.title,
                    write.body,
                    write.created_at,
                    write.updated_at,
                    write.is_archived,
                ],
            )?;
            Ok(write.id)
        })
        .await
    }

    async fn read(&self, id: &str) -> Result<Option<Note>> {
        let owner = self.owner()?;
        let id = id.to_string();
        self.with_conn(move |conn| {
            let note = conn
                .query_row(
                    &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE owner = ?1 AND id = ?2"),
                    params![owner, id],
                    row_to_note,
                )
                .optional()?;
            Ok(note)
        })
        .await
    }

    async fn read_all(&self, include_archived: bool) -> Result<Vec<Note>> {
        let owner = self.owner()?;
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {NOTE_COLUMNS} FROM notes \
                 WHERE owner = ?1 AND (?2 OR is_archived = 0) \
                 ORDER BY updated_at DESC, id ASC"
            ))?;
            let notes = stmt
                .query_map(params![owner, include_archived], row_to_note)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(notes)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let owner = self.owner()?;
        let id = id.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM notes WHERE owner = ?1 AND id = ?2",
                params![owner, id],
            )?;
            Ok(())
        })
        .await
    }

    async fn set_archived(&self, id: &str, archived: bool) -> Result<bool> {
        let owner = self.owner()?;
        let id = id.to_string();
        let now = now_millis();
        self.with_conn(move |conn| {
            let rows = conn.execute(
                "UPDATE notes SET is_archived = ?1, \
                     updated_at = CASE \
                         WHEN updated_at < ?2 THEN ?2 \
                         WHEN updated_at < ?5 THEN updated_at + 1 \
                         ELSE updated_at END \
                 WHERE owner = ?3 AND id = ?4",
                params![archived, now, owner, id, i64::MAX],
            )?;
            Ok(rows > 0)
        })
        .await
    }
}

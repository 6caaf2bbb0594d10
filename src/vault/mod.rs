//! The vault facade: one entry point over the local and remote stores.
//!
//! Every call asks the [`IdentityProvider`] which backend is current, so a
//! sign-in or sign-out between two calls changes where the second one goes.
//! Nothing is cached between calls.
//!
//! Saving derives the id from the title. When an edit changes the title, the
//! note is written under the new id first and the old id is deleted after the
//! write succeeds. The two steps are not atomic: a reader in between may see
//! both records, never neither.

pub mod codec;
pub mod export;
pub mod graph;
pub mod parser;
pub mod stats;
pub mod types;

use std::sync::Arc;

use crate::config::{StorageBackend, VaultConfig};
use crate::error::{Result, VaultError};
use crate::identity::IdentityProvider;
use crate::store::{FsBlobStore, KvBlobStore, LocalStore, NoteStore, RemoteStore};
use graph::Graph;
use stats::VaultStats;
use types::{note_id_for, now_millis, Note, NoteWrite, SaveRequest};

/// Starter notes written into a freshly created vault.
const SEED_NOTES: [(&str, &str); 3] = [
    (
        "Welcome",
        "This is your vault. Link notes with [[Aether Nexus]] and tag them like #start.",
    ),
    (
        "Aether Nexus",
        "The central core of the second brain. It connects [[Thoughts]] through links and #start tags.",
    ),
    (
        "Thoughts",
        "Fleeting ideas captured in markdown. [[Aether Nexus]] organizes them visually. #ideas",
    ),
];

/// Which store a call was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Local,
    Remote,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Remote => "remote",
        })
    }
}

pub struct Vault {
    local: LocalStore,
    remote: Option<RemoteStore>,
    identity: Arc<dyn IdentityProvider>,
    seed_on_init: bool,
}

impl Vault {
    /// A local-only vault. Add a remote store with [`Vault::with_remote`].
    pub fn new(local: LocalStore, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            local,
            remote: None,
            identity,
            seed_on_init: false,
        }
    }

    pub fn with_remote(mut self, remote: RemoteStore) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn seed_on_init(mut self, seed: bool) -> Self {
        self.seed_on_init = seed;
        self
    }

    /// Build the vault described by `config`, sharing `identity` with the remote store.
    pub fn from_config(config: &VaultConfig, identity: Arc<dyn IdentityProvider>) -> anyhow::Result<Self> {
        let vault_dir = config.resolved_vault_dir();
        let local = match config.storage.backend {
            StorageBackend::Files => LocalStore::new(FsBlobStore::new(vault_dir.join("thoughts"))),
            StorageBackend::Kv => LocalStore::new(KvBlobStore::open(vault_dir.join("vault.json"))?),
        };

        let mut vault = Self::new(local, Arc::clone(&identity)).seed_on_init(config.storage.seed_on_init);
        if config.remote.enabled {
            vault = vault.with_remote(RemoteStore::open(config.resolved_remote_db_path(), identity)?);
        }
        Ok(vault)
    }

    /// The backend the next call will use.
    pub fn active_backend(&self) -> Backend {
        match (&self.remote, self.identity.is_active()) {
            (Some(_), true) => Backend::Remote,
            _ => Backend::Local,
        }
    }

    fn store(&self) -> &dyn NoteStore {
        match (self.active_backend(), &self.remote) {
            (Backend::Remote, Some(remote)) => remote as &dyn NoteStore,
            _ => &self.local,
        }
    }

    /// Create local storage on first launch, seeding it if configured.
    /// Returns `true` when the vault was created by this call.
    pub async fn init_vault(&self) -> Result<bool> {
        let created = self.local.init().await?;
        if created && self.seed_on_init {
            for (title, body) in SEED_NOTES {
                save_in(&self.local, SaveRequest::new(title, body)).await?;
            }
            tracing::info!(notes = SEED_NOTES.len(), "seeded new vault");
        }
        Ok(created)
    }

    /// Destroy all local notes and start over. Remote data is untouched.
    pub async fn reset_vault(&self) -> Result<()> {
        self.local.reset().await?;
        self.init_vault().await?;
        Ok(())
    }

    /// Save a note, returning the id it now lives under.
    pub async fn save_thought(&self, request: SaveRequest) -> Result<String> {
        save_in(self.store(), request).await
    }

    pub async fn read_thought(&self, id: &str) -> Result<Option<Note>> {
        self.store().read(id).await
    }

    pub async fn read_all_thoughts(&self, include_archived: bool) -> Result<Vec<Note>> {
        self.store().read_all(include_archived).await
    }

    /// Notes carrying `tag`, most recent first.
    pub async fn read_tagged(&self, tag: &str, include_archived: bool) -> Result<Vec<Note>> {
        let mut notes = self.read_all_thoughts(include_archived).await?;
        notes.retain(|n| n.has_tag(tag));
        Ok(notes)
    }

    /// Notes whose title contains `query`, ignoring case.
    pub async fn search_thoughts(&self, query: &str, include_archived: bool) -> Result<Vec<Note>> {
        let mut notes = self.read_all_thoughts(include_archived).await?;
        notes.retain(|n| n.title_matches(query));
        Ok(notes)
    }

    pub async fn delete_thought(&self, id: &str) -> Result<()> {
        let store = self.store();
        tracing::info!(id, backend = store.name(), "deleting note");
        store.delete(id).await
    }

    /// Hide a note from default listings without removing it.
    pub async fn archive_thought(&self, id: &str) -> Result<()> {
        let store = self.store();
        tracing::info!(id, backend = store.name(), "archiving note");
        if store.archive(id).await? {
            Ok(())
        } else {
            Err(VaultError::NotFound(id.to_string()))
        }
    }

    pub async fn unarchive_thought(&self, id: &str) -> Result<()> {
        let store = self.store();
        tracing::info!(id, backend = store.name(), "unarchiving note");
        if store.unarchive(id).await? {
            Ok(())
        } else {
            Err(VaultError::NotFound(id.to_string()))
        }
    }

    /// Tag co-occurrence graph over every non-archived note.
    pub async fn build_graph(&self) -> Result<Graph> {
        let notes = self.read_all_thoughts(false).await?;
        Ok(graph::tag_graph(&notes))
    }

    /// Wiki-link graph over every non-archived note.
    pub async fn build_note_graph(&self) -> Result<Graph> {
        let notes = self.read_all_thoughts(false).await?;
        Ok(graph::note_graph(&notes))
    }

    /// All non-archived notes as one markdown document.
    pub async fn export_markdown(&self) -> Result<String> {
        let notes = self.read_all_thoughts(false).await?;
        let today = chrono::Local::now().date_naive();
        Ok(export::render_markdown(&notes, today))
    }

    pub async fn stats(&self) -> Result<VaultStats> {
        let notes = self.read_all_thoughts(true).await?;
        Ok(stats::compute(&notes))
    }
}

/// Resolve a save request against `store` and persist it.
///
/// `created_at` and the archive flag carry over from the previous record
/// (or from whatever already sits under the target id), and `updated_at`
/// always moves forward.
async fn save_in(store: &dyn NoteStore, request: SaveRequest) -> Result<String> {
    let title = normalize_title(&request.title);
    let id = note_id_for(&title);
    let lookup = request.previous_id.as_deref().unwrap_or(&id);
    let prior = store.read(lookup).await?;

    let now = now_millis();
    let write = NoteWrite {
        id: id.clone(),
        title,
        body: request.body,
        created_at: prior.as_ref().and_then(|n| n.created_at).unwrap_or(now),
        updated_at: prior
            .as_ref()
            .and_then(|n| n.updated_at)
            .map_or(now, |prev| now.max(prev.saturating_add(1))),
        is_archived: request
            .archived
            .unwrap_or_else(|| prior.as_ref().is_some_and(|n| n.is_archived)),
    };

    let saved = store.save(write).await?;

    if let Some(previous) = request.previous_id.as_deref().filter(|prev| *prev != saved) {
        store.delete(previous).await?;
        tracing::info!(from = previous, to = %saved, backend = store.name(), "note renamed");
    } else {
        tracing::debug!(id = %saved, backend = store.name(), "note saved");
    }

    Ok(saved)
}

/// Titles live on one line in the stored heading.
fn normalize_title(title: &str) -> String {
    title
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

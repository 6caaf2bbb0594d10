//! Key → text blob backends for the local store.
//!
//! [`FsBlobStore`] keeps one file per note. [`KvBlobStore`] keeps the whole map
//! in memory and persists it as a single JSON document, or nowhere at all for
//! [`KvBlobStore::in_memory`].

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::{Result, VaultError};
use crate::vault::types::NOTE_SUFFIX;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create the storage root if missing. Returns `true` when it was created.
    async fn ensure_root(&self) -> Result<bool>;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn put(&self, key: &str, value: String) -> Result<()>;

    /// Idempotent.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Every note key currently stored.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Drop the storage root and everything in it.
    async fn clear(&self) -> Result<()>;
}

/// One `<id>` file per note under a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key onto a file inside the root, refusing anything that could escape it.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let invalid = key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
            || key.contains("..");
        if invalid {
            return Err(VaultError::InvalidId(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn ensure_root(&self) -> Result<bool> {
        if tokio::fs::try_exists(&self.root)
            .await
            .map_err(|e| VaultError::storage(format!("failed to stat {}", self.root.display()), e))?
        {
            return Ok(false);
        }
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| VaultError::storage(format!("failed to create {}", self.root.display()), e))?;
        tracing::info!(root = %self.root.display(), "created vault directory");
        Ok(true)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::storage(format!("failed to read {}", path.display()), e)),
        }
    }

    /// Writes to a hidden temp file then renames it over the target.
    async fn put(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| VaultError::storage(format!("failed to create {}", self.root.display()), e))?;

        let tmp_path = self.root.join(format!(".{key}.tmp"));
        tokio::fs::write(&tmp_path, value)
            .await
            .map_err(|e| VaultError::storage(format!("failed to write {}", tmp_path.display()), e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| VaultError::storage(format!("failed to replace {}", path.display()), e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::storage(format!("failed to delete {}", path.display()), e)),
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(VaultError::storage(format!("failed to list {}", self.root.display()), e))
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| VaultError::storage(format!("failed to list {}", self.root.display()), e))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(NOTE_SUFFIX) && !name.starts_with('.') {
                keys.push(name);
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::storage(format!("failed to remove {}", self.root.display()), e)),
        }
    }
}

#[derive(Debug, Default)]
struct KvState {
    entries: BTreeMap<String, String>,
    initialized: bool,
}

/// The whole vault as one persisted key-value blob.
#[derive(Debug)]
pub struct KvBlobStore {
    path: Option<PathBuf>,
    state: Mutex<KvState>,
}

impl KvBlobStore {
    /// Load the map from `path` if it exists. A missing file is an empty vault.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(json) => KvState {
                entries: serde_json::from_str(&json)?,
                initialized: true,
            },
            Err(e) if e.kind() == ErrorKind::NotFound => KvState::default(),
            Err(e) => return Err(VaultError::storage(format!("failed to read {}", path.display()), e)),
        };
        Ok(Self {
            path: Some(path),
            state: Mutex::new(state),
        })
    }

    /// Nothing is persisted; contents live as long as the value.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(KvState::default()),
        }
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| VaultError::storage(format!("failed to create {}", parent.display()), e))?;
        }
        let json = serde_json::to_string(entries)?;
        let tmp_path = path.with_extension("tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| VaultError::storage(format!("failed to write {}", tmp_path.display()), e))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| VaultError::storage(format!("failed to replace {}", path.display()), e))?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for KvBlobStore {
    async fn ensure_root(&self) -> Result<bool> {
        let mut state = self.state.lock().await;
        if state.initialized {
            return Ok(false);
        }
        self.persist(&state.entries).await?;
        state.initialized = true;
        Ok(true)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state.lock().await.entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let mut state = self.state.lock().await;
        let mut next = state.entries.clone();
        next.insert(key.to_string(), value);
        self.persist(&next).await?;
        state.entries = next;
        state.initialized = true;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = state.entries.clone();
        next.remove(key);
        self.persist(&next).await?;
        state.entries = next;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .state
            .lock()
            .await
            .entries
            .keys()
            .filter(|k| k.ends_with(NOTE_SUFFIX))
            .cloned()
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(VaultError::storage(format!("failed to remove {}", path.display()), e))
                }
            }
        }
        state.entries.clear();
        state.initialized = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn fs_put_get_remove() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::new(tmp.path().join("thoughts"));

        assert!(store.ensure_root().await.unwrap());
        assert!(!store.ensure_root().await.unwrap());

        store.put("a.md", "hello".into()).await.unwrap();
        assert_eq!(store.get("a.md").await.unwrap().as_deref(), Some("hello"));
        assert_eq!(store.keys().await.unwrap(), vec!["a.md"]);

        store.remove("a.md").await.unwrap();
        store.remove("a.md").await.unwrap();
        assert_eq!(store.get("a.md").await.unwrap(), None);
    }

    #[tokio::test]
    async fn fs_keys_skip_non_notes() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("thoughts");
        let store = FsBlobStore::new(&root);
        store.ensure_root().await.unwrap();

        std::fs::write(root.join("readme.txt"), "x").unwrap();
        std::fs::write(root.join(".hidden.md"), "x").unwrap();
        store.put("b.md", "b".into()).await.unwrap();

        assert_eq!(store.keys().await.unwrap(), vec!["b.md"]);
    }

    #[tokio::test]
    async fn fs_rejects_escaping_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::new(tmp.path());

        for key in ["../x.md", "a/b.md", "..", "", ".tmp.md"] {
            assert!(
                matches!(store.get(key).await, Err(VaultError::InvalidId(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn fs_missing_root_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = FsBlobStore::new(tmp.path().join("nope"));
        assert!(store.keys().await.unwrap().is_empty());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn kv_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.json");

        let store = KvBlobStore::open(&path).unwrap();
        assert!(store.ensure_root().await.unwrap());
        store.put("n.md", "note".into()).await.unwrap();
        drop(store);

        let reopened = KvBlobStore::open(&path).unwrap();
        assert!(!reopened.ensure_root().await.unwrap());
        assert_eq!(reopened.get("n.md").await.unwrap().as_deref(), Some("note"));
    }

    #[tokio::test]
    async fn kv_clear_resets_initialization() {
        let store = KvBlobStore::in_memory();
        store.put("n.md", "note".into()).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.keys().await.unwrap().is_empty());
        assert!(store.ensure_root().await.unwrap());
    }

    #[tokio::test]
    async fn kv_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            KvBlobStore::open(&path),
            Err(VaultError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn kv_failed_persist_leaves_map_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.json");
        let store = KvBlobStore::open(&path).unwrap();
        store.put("kept.md", "kept".into()).await.unwrap();

        // The staging file cannot be written while a directory sits in its place.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(store.put("n.md", "x".into()).await.is_err());
        assert_eq!(store.get("n.md").await.unwrap(), None);

        assert!(store.remove("kept.md").await.is_err());
        assert_eq!(store.get("kept.md").await.unwrap().as_deref(), Some("kept"));
        assert_eq!(store.keys().await.unwrap(), vec!["kept.md"]);
    }
}

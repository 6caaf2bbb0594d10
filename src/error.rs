//! Error taxonomy for vault operations.
//!
//! Absent notes are not errors: reads return `Ok(None)`. Corrupt metadata is
//! not an error either; see [`crate::vault::codec::Envelope::Degraded`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    /// A remote operation ran with no active identity.
    #[error("authentication required: no identity is signed in")]
    AuthenticationRequired,

    /// The underlying filesystem or key-value blob could not be used.
    #[error("storage unavailable: {context}")]
    StorageUnavailable {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A key that cannot be mapped onto the backing store.
    #[error("invalid note id: {0:?}")]
    InvalidId(String),

    /// A mutating operation targeted a note that does not exist.
    #[error("note not found: {0}")]
    NotFound(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl VaultError {
    pub(crate) fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;

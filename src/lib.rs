//! Aether vault: a personal markdown note store with wiki-links and a tag graph.
//!
//! Notes are short markdown documents. Writing `[[Title]]` in a body links to
//! another note and `#tag` labels it. From the whole corpus the vault derives a
//! tag co-occurrence graph (and a note link graph) for visual exploration.
//!
//! # Architecture
//!
//! - **Local storage**: one markdown file per note, or a single persisted
//!   key-value JSON document. Each note carries a one-line metadata envelope
//!   (`createdAt`, `updatedAt`, `isArchived`) ahead of its `# Title` heading.
//! - **Remote storage**: a per-identity note collection in SQLite, used while
//!   an identity is signed in.
//! - **Ids**: derived from titles (`"Deep Work"` → `deep-work.md`). Renaming a
//!   note moves it to a new id and removes the old one.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite document database: open, schema, migrations, health checks
//! - [`error`]: The [`VaultError`](error::VaultError) taxonomy
//! - [`identity`]: Who is signed in, consulted on every vault call
//! - [`store`]: The [`NoteStore`](store::NoteStore) trait and its local and remote backends
//! - [`vault`]: Facade, link/tag parser, metadata codec, graphs, export and stats

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod store;
pub mod vault;

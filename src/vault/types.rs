//! Note records and the title → id scheme.
//!
//! Ids are derived from titles: whitespace runs become a single hyphen, every
//! character outside `[A-Za-z0-9-]` is dropped, the result is lower-cased and
//! suffixed with `.md`. Link targets resolve through the same function, so
//! `[[Deep Work]]` finds the note saved as `deep-work.md`.

use serde::{Deserialize, Serialize};

use super::codec::{self, NoteMeta};
use super::parser::{extract_tags, parse_links};

/// Suffix shared by every note id, local or remote.
pub const NOTE_SUFFIX: &str = ".md";

const UNTITLED_SLUG: &str = "untitled";

/// A note as returned to callers. Built fresh on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Markdown body with the envelope and title heading removed.
    pub body: String,
    /// Outgoing `[[...]]` targets, in order, duplicates kept.
    pub links: Vec<String>,
    pub tags: Vec<String>,
    /// Always empty on single-note reads; only the graph builder fills adjacency.
    pub backlinks: Vec<String>,
    /// `None` when the stored metadata was missing or unreadable.
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub is_archived: bool,
}

impl Note {
    /// Assemble a note from its parts, deriving links and tags from `body`.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>, meta: NoteMeta) -> Self {
        let body = body.into();
        Self {
            id: id.into(),
            title: title.into(),
            links: parse_links(&body),
            tags: extract_tags(&body),
            backlinks: Vec::new(),
            created_at: meta.created_at,
            updated_at: meta.updated_at,
            is_archived: meta.is_archived,
            body,
        }
    }

    /// Decode a stored blob (envelope + heading + body). Never fails.
    pub fn from_stored(id: &str, raw: &str) -> Self {
        let envelope = codec::decode(raw);
        if envelope.is_degraded() {
            tracing::debug!(id, "note has no readable metadata envelope");
        }
        let (title, body) = codec::split_title(id, envelope.body());
        Self::new(id, title, body, envelope.meta())
    }

    /// Exact tag match. A leading `#` on `tag` is ignored.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.strip_prefix('#').unwrap_or(tag);
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match on the title. Blank queries match.
    pub fn title_matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.title.to_lowercase().contains(&query)
    }

    /// Sort key used for recency ordering. Unknown timestamps sort last.
    pub fn recency(&self) -> i64 {
        self.updated_at.or(self.created_at).unwrap_or(i64::MIN)
    }
}

/// A fully resolved write handed to a [`crate::store::NoteStore`].
///
/// The facade fills every field; stores only persist it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteWrite {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_archived: bool,
}

impl NoteWrite {
    pub fn meta(&self) -> NoteMeta {
        NoteMeta {
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            is_archived: self.is_archived,
        }
    }
}

/// Arguments to [`crate::vault::Vault::save_thought`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRequest {
    pub title: String,
    pub body: String,
    /// Id the note was previously stored under, when this save edits it.
    pub previous_id: Option<String>,
    /// Explicit archive flag. `None` keeps whatever the previous record had.
    pub archived: Option<bool>,
}

impl SaveRequest {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn replacing(mut self, previous_id: impl Into<String>) -> Self {
        self.previous_id = Some(previous_id.into());
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }
}

/// Slug a title: whitespace runs → `-`, drop everything outside `[A-Za-z0-9-]`,
/// lower-case. Empty results become `untitled`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c.to_ascii_lowercase());
        }
    }
    if slug.is_empty() {
        UNTITLED_SLUG.to_string()
    } else {
        slug
    }
}

/// The storage key for a title. Also used to resolve `[[link]]` targets.
pub fn note_id_for(title: &str) -> String {
    format!("{}{NOTE_SUFFIX}", slugify(title))
}

/// Best-effort display title for an id with no heading: `deep-work.md` → `Deep Work`.
pub fn title_from_id(id: &str) -> String {
    id.strip_suffix(NOTE_SUFFIX)
        .unwrap_or(id)
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

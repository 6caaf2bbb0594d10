//! Whole-vault statistics: note counts, tags and link resolution.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use super::types::{note_id_for, Note};

/// Summary counts over the whole vault, archived notes included.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub total_notes: u64,
    pub active_notes: u64,
    pub archived_notes: u64,
    pub distinct_tags: u64,
    /// `[[...]]` occurrences whose target note exists.
    pub resolved_links: u64,
    /// `[[...]]` occurrences pointing at no note.
    pub dangling_links: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_update: Option<String>,
}

pub fn compute(notes: &[Note]) -> VaultStats {
    let ids: HashSet<&str> = notes.iter().map(|n| n.id.as_str()).collect();
    let tags: HashSet<&str> = notes
        .iter()
        .flat_map(|n| n.tags.iter().map(String::as_str))
        .collect();

    let (resolved, dangling) = notes
        .iter()
        .flat_map(|n| n.links.iter())
        .fold((0, 0), |(ok, missing), title| {
            if ids.contains(note_id_for(title).as_str()) {
                (ok + 1, missing)
            } else {
                (ok, missing + 1)
            }
        });

    let archived = notes.iter().filter(|n| n.is_archived).count() as u64;
    let updates = notes.iter().filter_map(|n| n.updated_at);

    VaultStats {
        total_notes: notes.len() as u64,
        active_notes: notes.len() as u64 - archived,
        archived_notes: archived,
        distinct_tags: tags.len() as u64,
        resolved_links: resolved,
        dangling_links: dangling,
        oldest_update: updates.clone().min().and_then(to_rfc3339),
        newest_update: updates.max().and_then(to_rfc3339),
    }
}

fn to_rfc3339(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339())
}

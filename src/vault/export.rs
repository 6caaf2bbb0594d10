//! Aggregate markdown export, one section per note separated by rules.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Write;

use super::types::Note;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render `notes` as a single markdown document.
pub fn render_markdown(notes: &[Note], generated_on: NaiveDate) -> String {
    let mut out = format!(
        "# Aether Nexus Export\n\n*Generated on: {}*\n\n---\n\n",
        generated_on.format(DATE_FORMAT)
    );

    for note in notes {
        let tags = if note.tags.is_empty() {
            "None".to_string()
        } else {
            note.tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ")
        };

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "## Document: {}\n**Date:** {}\n**Tags:** {}\n\n{}\n\n---\n\n",
            note.title,
            note_date(note),
            tags,
            note.body
        );
    }

    out
}

fn note_date(note: &Note) -> String {
    note.updated_at
        .or(note.created_at)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.date_naive().format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

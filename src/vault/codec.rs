//! Metadata envelope and title heading codec.
//!
//! A stored note is laid out as:
//!
//! ```text
//! <!-- aether:meta {"createdAt":1700000000000,"updatedAt":1700000000000,"isArchived":false} -->
//! # Title
//!
//! body with [[Links]] and #tags
//! ```
//!
//! The envelope line is optional. A missing or malformed envelope decodes to
//! [`Envelope::Degraded`] and the whole blob is treated as the body.

use serde::{Deserialize, Serialize};

use super::types::title_from_id;

const META_OPEN: &str = "<!-- aether:meta ";
const META_CLOSE: &str = " -->";
const HEADING: &str = "# ";

/// Per-note metadata carried in the envelope line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteMeta {
    /// Milliseconds since the Unix epoch.
    pub created_at: Option<i64>,
    /// Milliseconds since the Unix epoch.
    pub updated_at: Option<i64>,
    pub is_archived: bool,
}

/// Result of splitting the envelope off a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<'a> {
    Parsed { meta: NoteMeta, body: &'a str },
    /// No envelope, or one that failed to parse. `0` is the raw blob untouched.
    Degraded(&'a str),
}

impl<'a> Envelope<'a> {
    /// Metadata, or all-absent defaults for a degraded blob.
    pub fn meta(&self) -> NoteMeta {
        match self {
            Self::Parsed { meta, .. } => *meta,
            Self::Degraded(_) => NoteMeta::default(),
        }
    }

    pub fn body(&self) -> &'a str {
        match self {
            Self::Parsed { body, .. } => body,
            Self::Degraded(raw) => raw,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Render the single envelope line, including its trailing newline.
pub fn encode(meta: &NoteMeta) -> String {
    // Serializing a struct of integers and a bool cannot fail.
    let json = serde_json::to_string(meta).unwrap_or_else(|_| "{}".into());
    format!("{META_OPEN}{json}{META_CLOSE}\n")
}

/// Split the envelope line off `raw`. Never fails.
pub fn decode(raw: &str) -> Envelope<'_> {
    let (first, rest) = split_first_line(raw);

    let Some(json) = first
        .strip_prefix(META_OPEN)
        .and_then(|s| s.strip_suffix(META_CLOSE))
    else {
        return Envelope::Degraded(raw);
    };

    match serde_json::from_str::<NoteMeta>(json) {
        Ok(meta) => Envelope::Parsed { meta, body: rest },
        Err(e) => {
            tracing::debug!(error = %e, "malformed metadata envelope, treating as raw body");
            Envelope::Degraded(raw)
        }
    }
}

/// Compose the full stored blob: envelope, heading (unless the body already
/// opens with one), then the body.
pub fn compose(meta: &NoteMeta, title: &str, body: &str) -> String {
    let mut out = encode(meta);
    if !starts_with_heading(body) {
        out.push_str(HEADING);
        out.push_str(title);
        out.push_str("\n\n");
    }
    out.push_str(body);
    out
}

/// Take the title from a leading `# ` heading, or derive it from the id.
///
/// Returns `(title, body)` with the heading line and one following blank line
/// removed, which exactly undoes the heading [`compose`] adds.
pub fn split_title<'a>(id: &str, clean: &'a str) -> (String, &'a str) {
    split_heading(clean).unwrap_or_else(|| (title_from_id(id), clean))
}

/// Like [`split_title`], but `None` when `clean` does not open with a heading.
pub fn split_heading(clean: &str) -> Option<(String, &str)> {
    let (first, rest) = split_first_line(clean);
    let title = first.strip_prefix(HEADING)?;
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);
    Some((title.trim().to_string(), body))
}

fn starts_with_heading(body: &str) -> bool {
    split_first_line(body).0.starts_with(HEADING)
}

/// First line without its terminator, and everything after the terminator.
fn split_first_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => {
            let line = &s[..pos];
            (line.strip_suffix('\r').unwrap_or(line), &s[pos + 1..])
        }
        None => (s, ""),
    }
}

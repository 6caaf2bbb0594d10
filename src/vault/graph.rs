//! Graphs derived from the note corpus.
//!
//! Both graphs are rebuilt from scratch on every call; there is no
//! incremental maintenance.
//!
//! - [`tag_graph`]: nodes are tags, an undirected edge joins two tags that
//!   appear together in at least one note. Notes without tags count towards
//!   the synthetic [`UNTAGGED`] node.
//! - [`note_graph`]: nodes are notes, a directed edge follows each
//!   `[[Title]]` that resolves to another note in the corpus.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::types::{note_id_for, Note};

/// Tag assigned to notes that carry none.
pub const UNTAGGED: &str = "untagged";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Tag mode: notes carrying the tag. Note mode: distinct notes linking in.
    pub frequency: usize,
    /// Adjacent node ids, each listed once.
    pub backlinks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Nodes in first-seen order with an id → position index.
#[derive(Default)]
struct NodeTable {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    fn entry(&mut self, id: &str, label: &str) -> &mut GraphNode {
        let pos = match self.index.get(id) {
            Some(&pos) => pos,
            None => {
                self.nodes.push(GraphNode {
                    id: id.to_string(),
                    label: label.to_string(),
                    frequency: 0,
                    backlinks: Vec::new(),
                });
                self.index.insert(id.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[pos]
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        let pos = *self.index.get(id)?;
        Some(&mut self.nodes[pos])
    }
}

/// Tag co-occurrence graph. O(N·k²) for N notes with k tags each.
pub fn tag_graph(notes: &[Note]) -> Graph {
    let mut table = NodeTable::default();
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    let mut links = Vec::new();

    for note in notes {
        let tags: Vec<&str> = if note.tags.is_empty() {
            vec![UNTAGGED]
        } else {
            note.tags.iter().map(String::as_str).collect()
        };

        for tag in &tags {
            table.entry(tag, tag).frequency += 1;
        }

        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                if a == b {
                    continue;
                }
                let (lo, hi) = if a < b { (*a, *b) } else { (*b, *a) };
                if !seen_pairs.insert((lo.to_string(), hi.to_string())) {
                    continue;
                }
                links.push(GraphLink {
                    source: lo.to_string(),
                    target: hi.to_string(),
                });
                table.entry(lo, lo).backlinks.push(hi.to_string());
                table.entry(hi, hi).backlinks.push(lo.to_string());
            }
        }
    }

    Graph {
        nodes: table.nodes,
        links,
    }
}

/// Wiki-link graph. Links to titles with no matching note are dropped.
pub fn note_graph(notes: &[Note]) -> Graph {
    let mut table = NodeTable::default();
    for note in notes {
        table.entry(&note.id, &note.title);
    }

    let mut seen: HashSet<(&str, String)> = HashSet::new();
    let mut links = Vec::new();

    for note in notes {
        for target_title in &note.links {
            let target = note_id_for(target_title);
            if !table.index.contains_key(&target) || !seen.insert((note.id.as_str(), target.clone())) {
                continue;
            }
            if let Some(node) = table.get_mut(&target) {
                node.frequency += 1;
                node.backlinks.push(note.id.clone());
            }
            links.push(GraphLink {
                source: note.id.clone(),
                target,
            });
        }
    }

    Graph {
        nodes: table.nodes,
        links,
    }
}

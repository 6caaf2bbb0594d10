//! CLI note commands: init, save, show, list, delete, archive, unarchive.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use aether_vault::vault::types::SaveRequest;
use aether_vault::vault::Vault;

use super::format_millis;

pub async fn init(vault: &Vault) -> Result<()> {
    if vault.init_vault().await? {
        println!("Vault created.");
    } else {
        println!("Vault already exists.");
    }
    Ok(())
}

/// Body text from `--body`, `--file`, or stdin, in that order.
pub fn read_body(body: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(body) = body {
        return Ok(body);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read body from stdin")?;
    Ok(buf)
}

pub async fn save(
    vault: &Vault,
    title: String,
    body: String,
    replace: Option<String>,
    archived: bool,
) -> Result<()> {
    let mut request = SaveRequest::new(title, body);
    request.previous_id = replace;
    if archived {
        request = request.archived(true);
    }
    let id = vault.save_thought(request).await?;
    println!("{id}");
    Ok(())
}

pub async fn show(vault: &Vault, id: &str) -> Result<()> {
    let Some(note) = vault.read_thought(id).await? else {
        anyhow::bail!("note not found: {id}");
    };

    println!("# {}", note.title);
    println!();
    println!("Id:        {}", note.id);
    println!("Created:   {}", format_millis(note.created_at));
    println!("Updated:   {}", format_millis(note.updated_at));
    if note.is_archived {
        println!("Archived:  yes");
    }
    if !note.tags.is_empty() {
        println!("Tags:      {}", note.tags.join(", "));
    }
    if !note.links.is_empty() {
        println!("Links:     {}", note.links.join(", "));
    }
    println!();
    println!("{}", note.body);
    Ok(())
}

pub async fn list(
    vault: &Vault,
    include_archived: bool,
    tag: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let notes = match (tag, search) {
        (Some(tag), _) => vault.read_tagged(tag, include_archived).await?,
        (None, Some(query)) => vault.search_thoughts(query, include_archived).await?,
        (None, None) => vault.read_all_thoughts(include_archived).await?,
    };
    if notes.is_empty() {
        println!("No notes.");
        return Ok(());
    }

    for note in &notes {
        let marker = if note.is_archived { " [archived]" } else { "" };
        println!(
            "{:<16}  {:<32}  {}{}",
            format_millis(note.updated_at),
            note.id,
            note.title,
            marker
        );
    }
    eprintln!("{} note(s).", notes.len());
    Ok(())
}

pub async fn delete(vault: &Vault, id: &str) -> Result<()> {
    vault.delete_thought(id).await?;
    println!("Deleted {id}.");
    Ok(())
}

pub async fn archive(vault: &Vault, id: &str) -> Result<()> {
    vault.archive_thought(id).await?;
    println!("Archived {id}.");
    Ok(())
}

pub async fn unarchive(vault: &Vault, id: &str) -> Result<()> {
    vault.unarchive_thought(id).await?;
    println!("Restored {id}.");
    Ok(())
}

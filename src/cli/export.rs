use anyhow::{Context, Result};
use std::path::Path;

use aether_vault::vault::Vault;

/// Export every non-archived note as one markdown document, to a file or stdout.
pub async fn export(vault: &Vault, output: Option<&Path>) -> Result<()> {
    let markdown = vault.export_markdown().await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &markdown)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Exported to {}.", path.display());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

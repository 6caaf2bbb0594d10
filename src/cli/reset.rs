//! CLI `reset` command: delete all local notes after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use aether_vault::config::VaultConfig;
use aether_vault::vault::Vault;

/// Delete every local note after user confirmation. Remote notes are kept.
pub async fn reset(vault: &Vault, config: &VaultConfig) -> Result<()> {
    println!("WARNING: This will permanently delete ALL local notes.");
    println!("Vault: {}", config.resolved_vault_dir().display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    vault.reset_vault().await?;

    println!("Local vault reset complete.");
    Ok(())
}

use anyhow::Result;

use aether_vault::vault::Vault;

/// Display vault statistics in the terminal.
pub async fn stats(vault: &Vault) -> Result<()> {
    let stats = vault.stats().await?;

    println!("Vault Statistics ({})", vault.active_backend());
    println!("{}", "=".repeat(40));
    println!("  Total notes:         {}", stats.total_notes);
    println!("  Active:              {}", stats.active_notes);
    println!("  Archived:            {}", stats.archived_notes);
    println!();
    println!("Distinct tags:         {}", stats.distinct_tags);
    println!("Resolved links:        {}", stats.resolved_links);
    println!("Dangling links:        {}", stats.dangling_links);

    if let Some(ref oldest) = stats.oldest_update {
        println!("Oldest update:         {oldest}");
    }
    if let Some(ref newest) = stats.newest_update {
        println!("Newest update:         {newest}");
    }

    Ok(())
}

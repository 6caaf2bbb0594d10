//! CLI `doctor` command: check the remote note database and print a health report.

use anyhow::{Context, Result};

use aether_vault::config::VaultConfig;
use aether_vault::db;

pub fn doctor(config: &VaultConfig) -> Result<()> {
    let db_path = config.resolved_remote_db_path();

    if !db_path.exists() {
        println!("Remote database: not found at {}", db_path.display());
        println!("Run any command with --identity <user> to create it.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;
    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Aether Health Report");
    println!("====================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!();
    println!("Row counts:");
    println!("  Notes:           {}", report.note_count);
    println!("  Identities:      {}", report.owner_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery: restore remote.db from a backup, or export notes with");
        println!("`aether --identity <user> export -o backup.md` from a good copy.");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use aether_vault::config::VaultConfig;
use aether_vault::identity::Session;
use aether_vault::vault::Vault;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aether", version, about = "Personal markdown vault with wiki-links and a tag graph")]
struct Cli {
    /// Sign in as this identity and use the remote note collection
    #[arg(long, global = true)]
    identity: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the vault if it does not exist yet
    Init,
    /// Delete every local note and start over
    Reset,
    /// Save a note; the body comes from --body, --file, or stdin
    Save {
        title: String,
        #[arg(long, conflicts_with = "file")]
        body: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        /// Id of the note being edited (handles renames)
        #[arg(long)]
        replace: Option<String>,
        /// Save the note as archived
        #[arg(long)]
        archived: bool,
    },
    /// Print one note
    Show { id: String },
    /// List notes, most recently updated first
    List {
        /// Include archived notes
        #[arg(long)]
        all: bool,
        /// Only notes carrying this tag
        #[arg(long, conflicts_with = "search")]
        tag: Option<String>,
        /// Only notes whose title contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Permanently delete a note
    Delete { id: String },
    /// Hide a note from default listings
    Archive { id: String },
    /// Bring an archived note back
    Unarchive { id: String },
    /// Print the graph as JSON
    Graph {
        /// Link notes by [[wiki-links]] instead of tags
        #[arg(long)]
        notes: bool,
    },
    /// Export all notes into one markdown document
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show vault statistics
    Stats,
    /// Check the remote note database
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = VaultConfig::load()?;

    // Log to stderr so stdout carries only command output.
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.identity.is_some() {
        config.identity.user = cli.identity.clone();
        config.remote.enabled = true;
    }

    let session = Arc::new(match &config.identity.user {
        Some(user) if config.remote.enabled => Session::signed_in(user.clone()),
        _ => Session::new(),
    });
    let vault = Vault::from_config(&config, session)?;
    tracing::debug!(backend = %vault.active_backend(), "vault ready");

    match cli.command {
        Command::Init => cli::notes::init(&vault).await?,
        Command::Reset => cli::reset::reset(&vault, &config).await?,
        Command::Save {
            title,
            body,
            file,
            replace,
            archived,
        } => {
            let body = cli::notes::read_body(body, file.as_deref())?;
            cli::notes::save(&vault, title, body, replace, archived).await?;
        }
        Command::Show { id } => cli::notes::show(&vault, &id).await?,
        Command::List { all, tag, search } => {
            cli::notes::list(&vault, all, tag.as_deref(), search.as_deref()).await?
        }
        Command::Delete { id } => cli::notes::delete(&vault, &id).await?,
        Command::Archive { id } => cli::notes::archive(&vault, &id).await?,
        Command::Unarchive { id } => cli::notes::unarchive(&vault, &id).await?,
        Command::Graph { notes } => cli::graph::graph(&vault, notes).await?,
        Command::Export { output } => cli::export::export(&vault, output.as_deref()).await?,
        Command::Stats => cli::stats::stats(&vault).await?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}

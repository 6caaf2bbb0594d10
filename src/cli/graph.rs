use anyhow::Result;

use aether_vault::vault::Vault;

/// Print the tag graph (or the note link graph) as pretty JSON.
pub async fn graph(vault: &Vault, notes: bool) -> Result<()> {
    let graph = if notes {
        vault.build_note_graph().await?
    } else {
        vault.build_graph().await?
    };

    println!("{}", serde_json::to_string_pretty(&graph)?);
    eprintln!("{} nodes, {} links.", graph.nodes.len(), graph.links.len());
    Ok(())
}

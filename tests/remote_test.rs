mod helpers;

use aether_vault::error::VaultError;
use aether_vault::store::{NoteStore, RemoteStore};
use aether_vault::vault::types::SaveRequest;
use aether_vault::vault::Backend;
use helpers::{dual_vault, ids};

#[tokio::test]
async fn sign_in_switches_to_remote_collection() {
    let (vault, session) = dual_vault();
    let local_id = vault.save_thought(SaveRequest::new("Local Note", "l")).await.unwrap();
    assert_eq!(vault.active_backend(), Backend::Local);

    session.sign_in("uid-1");
    assert_eq!(vault.active_backend(), Backend::Remote);
    assert!(vault.read_all_thoughts(true).await.unwrap().is_empty());
    assert!(vault.read_thought(&local_id).await.unwrap().is_none());

    let remote_id = vault.save_thought(SaveRequest::new("Remote Note", "r")).await.unwrap();

    session.sign_out();
    assert_eq!(vault.active_backend(), Backend::Local);
    assert_eq!(ids(&vault.read_all_thoughts(true).await.unwrap()), vec![local_id]);
    assert!(vault.read_thought(&remote_id).await.unwrap().is_none());
}

#[tokio::test]
async fn identities_see_only_their_own_notes() {
    let (vault, session) = dual_vault();

    session.sign_in("alice");
    vault.save_thought(SaveRequest::new("Alice Plan", "a")).await.unwrap();

    session.sign_in("bob");
    assert!(vault.read_all_thoughts(true).await.unwrap().is_empty());
    vault.save_thought(SaveRequest::new("Bob Plan", "b")).await.unwrap();
    assert!(vault.read_thought("alice-plan.md").await.unwrap().is_none());

    session.sign_in("alice");
    assert_eq!(
        ids(&vault.read_all_thoughts(true).await.unwrap()),
        vec!["alice-plan.md".to_string()]
    );
}

#[tokio::test]
async fn remote_round_trip_matches_local_shape() {
    let (vault, session) = dual_vault();
    session.sign_in("uid-1");

    let body = "see [[Other]] #one #two";
    let id = vault.save_thought(SaveRequest::new("Shape", body)).await.unwrap();
    let note = vault.read_thought(&id).await.unwrap().unwrap();

    assert_eq!(note.title, "Shape");
    assert_eq!(note.body, body);
    assert_eq!(note.links, vec!["Other"]);
    assert_eq!(note.tags, vec!["one", "two"]);
    assert!(note.created_at.is_some());
}

#[tokio::test]
async fn signed_out_remote_store_requires_authentication() {
    let (_vault, session) = dual_vault();
    let remote = RemoteStore::in_memory(session.clone()).unwrap();

    assert!(matches!(
        remote.read_all(false).await,
        Err(VaultError::AuthenticationRequired)
    ));
    assert!(matches!(
        remote.read("any.md").await,
        Err(VaultError::AuthenticationRequired)
    ));
}

#[tokio::test]
async fn stats_and_export_follow_active_backend() {
    let (vault, session) = dual_vault();
    vault.save_thought(SaveRequest::new("Local Only", "#here")).await.unwrap();

    session.sign_in("uid-1");
    vault.save_thought(SaveRequest::new("Cloud One", "[[Cloud Two]] #sky")).await.unwrap();
    vault.save_thought(SaveRequest::new("Cloud Two", "#sky")).await.unwrap();

    let stats = vault.stats().await.unwrap();
    assert_eq!(stats.total_notes, 2);
    assert_eq!(stats.distinct_tags, 1);
    assert_eq!(stats.resolved_links, 1);

    let doc = vault.export_markdown().await.unwrap();
    assert!(doc.contains("## Document: Cloud One"));
    assert!(!doc.contains("Local Only"));
}

mod helpers;

use aether_vault::vault::types::SaveRequest;
use helpers::{dual_vault, file_vault, memory_vault};

#[tokio::test]
async fn rename_preserves_created_at_and_removes_old_id() {
    let vault = memory_vault();
    let old_id = vault
        .save_thought(SaveRequest::new("Draft Idea", "v1 #idea"))
        .await
        .unwrap();
    let before = vault.read_thought(&old_id).await.unwrap().unwrap();

    let new_id = vault
        .save_thought(SaveRequest::new("Polished Idea", "v2 #idea").replacing(&old_id))
        .await
        .unwrap();
    let after = vault.read_thought(&new_id).await.unwrap().unwrap();

    assert_eq!(old_id, "draft-idea.md");
    assert_eq!(new_id, "polished-idea.md");
    assert_eq!(after.title, "Polished Idea");
    assert_eq!(after.body, "v2 #idea");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert!(vault.read_thought(&old_id).await.unwrap().is_none());

    let all = vault.read_all_thoughts(true).await.unwrap();
    assert_eq!(helpers::ids(&all), vec![new_id]);
}

#[tokio::test]
async fn rename_on_disk_leaves_no_orphan_file() {
    let (vault, tmp) = file_vault();
    vault.init_vault().await.unwrap();

    let old_id = vault.save_thought(SaveRequest::new("Old Name", "x")).await.unwrap();
    vault
        .save_thought(SaveRequest::new("New Name", "x").replacing(&old_id))
        .await
        .unwrap();

    let dir = tmp.path().join("thoughts");
    assert!(!dir.join("old-name.md").exists());
    assert!(dir.join("new-name.md").exists());
}

#[tokio::test]
async fn rename_with_unknown_previous_id_falls_back_to_now() {
    let vault = memory_vault();
    let id = vault
        .save_thought(SaveRequest::new("Fresh", "body").replacing("ghost.md"))
        .await
        .unwrap();

    let note = vault.read_thought(&id).await.unwrap().unwrap();
    assert!(note.created_at.is_some());
    assert_eq!(note.created_at, note.updated_at);
}

#[tokio::test]
async fn rename_keeps_archive_flag() {
    let vault = memory_vault();
    let id = vault.save_thought(SaveRequest::new("Shelved", "x")).await.unwrap();
    vault.archive_thought(&id).await.unwrap();

    let renamed = vault
        .save_thought(SaveRequest::new("Shelved Again", "x").replacing(&id))
        .await
        .unwrap();
    assert!(vault.read_thought(&renamed).await.unwrap().unwrap().is_archived);
}

#[tokio::test]
async fn remote_rename_behaves_like_local() {
    let (vault, session) = dual_vault();
    session.sign_in("uid-1");

    let old_id = vault.save_thought(SaveRequest::new("Cloud A", "a")).await.unwrap();
    let before = vault.read_thought(&old_id).await.unwrap().unwrap();

    let new_id = vault
        .save_thought(SaveRequest::new("Cloud B", "b").replacing(&old_id))
        .await
        .unwrap();
    let after = vault.read_thought(&new_id).await.unwrap().unwrap();

    assert_eq!(new_id, "cloud-b.md");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert!(vault.read_thought(&old_id).await.unwrap().is_none());
}

// fanbase/fanbase-store-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use fanbase_store::prelude::*;

use super::{reference_date, store};

async fn message(store: &Store<PlatformDriver>) -> Result<DocumentPath> {
    let path = DocumentPath::parse("messages/thread-1")?;
    store
        .set(
            &path,
            DocumentUpdate::new()
                .set("message", "Hello")
                .set("likes", json!([]))
                .set("reactions", json!({})),
            false,
        )
        .await?;
    Ok(path)
}

#[tokio::test]
async fn test_likes_from_two_writers_merge() -> Result<()> {
    let store = store().await?;
    let path = message(&store).await?;
    let other_writer = store.clone();

    let (lhs, rhs) = futures::join!(
        store.update(&path, DocumentUpdate::new().array_union("likes", "x")),
        other_writer.update(&path, DocumentUpdate::new().array_union("likes", "y")),
    );
    lhs?;
    rhs?;

    store
        .update(&path, DocumentUpdate::new().array_remove("likes", "x"))
        .await?;

    let snapshot = store.get(&path).await?.unwrap();
    assert_eq!(snapshot.data["likes"], json!(["y"]));
    Ok(())
}

#[tokio::test]
async fn test_array_union_is_idempotent() -> Result<()> {
    let store = store().await?;
    let path = message(&store).await?;

    for _ in 0..2 {
        store
            .update(&path, DocumentUpdate::new().array_union("likes", "x"))
            .await?;
    }

    let snapshot = store.get(&path).await?.unwrap();
    assert_eq!(snapshot.data["likes"], json!(["x"]));
    Ok(())
}

#[tokio::test]
async fn test_removing_last_reactor_prunes_emoji() -> Result<()> {
    let store = store().await?;
    let path = message(&store).await?;
    let fire = FieldPath::new(["reactions", "🔥"]);
    let party = FieldPath::new(["reactions", "🎉"]);

    store
        .update(
            &path,
            DocumentUpdate::new()
                .array_union(fire.clone(), "x")
                .array_union(party.clone(), "x")
                .array_union(party.clone(), "y"),
        )
        .await?;
    store
        .update(
            &path,
            DocumentUpdate::new()
                .array_remove_pruning(fire, "x")
                .array_remove_pruning(party, "x"),
        )
        .await?;

    let snapshot = store.get(&path).await?.unwrap();
    assert_eq!(snapshot.data["reactions"], json!({ "🎉": ["y"] }));
    Ok(())
}

#[tokio::test]
async fn test_maximum_never_moves_backwards() -> Result<()> {
    let store = store().await?;
    let path = message(&store).await?;

    for millis in [2_000, 1_000, 3_000, 2_500] {
        store
            .update(
                &path,
                DocumentUpdate::new().maximum("lastRepliedAt", millis),
            )
            .await?;
    }

    let snapshot = store.get(&path).await?.unwrap();
    assert_eq!(snapshot.data["lastRepliedAt"], json!(3_000));
    Ok(())
}

#[tokio::test]
async fn test_server_timestamp_uses_store_clock() -> Result<()> {
    let store = store().await?;
    let path = DocumentPath::parse("fans/fan-1")?;

    store
        .set(
            &path,
            DocumentUpdate::new()
                .set("displayName", "Jane")
                .server_timestamp("lastActive"),
            true,
        )
        .await?;
    store
        .set(
            &path,
            DocumentUpdate::new().server_timestamp("lastActive"),
            true,
        )
        .await?;

    let snapshot = store.get(&path).await?.unwrap();
    assert_eq!(
        snapshot.data,
        json!({
            "displayName": "Jane",
            "lastActive": reference_date().timestamp_millis(),
        })
        .as_object()
        .cloned()
        .unwrap()
    );
    Ok(())
}

#[tokio::test]
async fn test_update_of_missing_document_fails() -> Result<()> {
    let store = store().await?;
    let path = DocumentPath::parse("messages/missing")?;

    let result = store
        .update(&path, DocumentUpdate::new().array_union("likes", "x"))
        .await;

    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert_eq!(store.get(&path).await?, None);
    Ok(())
}

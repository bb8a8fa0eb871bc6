// fanbase/fanbase-store-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use fanbase_store::prelude::*;

use super::store;

#[document(collection = "music")]
struct TrackRecord {
    id: String,
    title: String,
}

fn notification_path(recipient: &str, id: &str) -> Result<DocumentPath> {
    Ok(DocumentPath::parse(&format!(
        "fans/{}/notifications/{}",
        recipient, id
    ))?)
}

async fn add_notification(
    store: &Store<PlatformDriver>,
    recipient: &str,
    id: &str,
    millis: i64,
) -> Result<()> {
    store
        .set(
            &notification_path(recipient, id)?,
            DocumentUpdate::new()
                .set("content", format!("Notification {}", id))
                .set("read", false)
                .set("timestamp", millis),
            false,
        )
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_typed_documents() -> Result<()> {
    let store = store().await?;
    let track = TrackRecord {
        id: "intro".to_string(),
        title: "Intro".to_string(),
    };

    store.put_document(&track).await?;
    assert_eq!(
        store
            .get_document::<TrackRecord>(&DocumentPath::parse("music/intro")?)
            .await?,
        Some(track)
    );

    let path = store
        .add_document(
            &CollectionPath::parse("music/intro/comments")?,
            &json!({ "content": "Love it" }),
        )
        .await?;
    assert_eq!(path.parent(), CollectionPath::parse("music/intro/comments")?);
    Ok(())
}

#[tokio::test]
async fn test_queries_filter_order_and_limit() -> Result<()> {
    let store = store().await?;
    add_notification(&store, "fan-1", "n1", 1_000).await?;
    add_notification(&store, "fan-1", "n2", 3_000).await?;
    add_notification(&store, "fan-1", "n3", 2_000).await?;
    add_notification(&store, "fan-2", "n4", 4_000).await?;

    store
        .update(
            &notification_path("fan-1", "n2")?,
            DocumentUpdate::new().set("read", true),
        )
        .await?;

    let collection = CollectionPath::parse("fans/fan-1/notifications")?;

    let latest = store
        .query(
            &Query::new(collection.clone())
                .order_by("timestamp", QueryDirection::Descending)
                .limit(2),
        )
        .await?;
    assert_eq!(
        latest.iter().map(|doc| doc.id()).collect::<Vec<_>>(),
        vec!["n2", "n3"]
    );

    let unread = store
        .query(&Query::new(collection).filter_eq("read", false))
        .await?;
    let mut unread = unread.iter().map(|doc| doc.id()).collect::<Vec<_>>();
    unread.sort();
    assert_eq!(unread, vec!["n1", "n3"]);
    Ok(())
}

#[tokio::test]
async fn test_denied_batch_write_changes_nothing() -> Result<()> {
    let store = store().await?;
    add_notification(&store, "fan-1", "n1", 1_000).await?;
    add_notification(&store, "fan-1", "n2", 2_000).await?;

    store.set_access_policy(|operation: Operation, path: &str| {
        if operation == Operation::Update && path.ends_with("/n2") {
            return Err(Error::permission_denied(operation, path));
        }
        Ok(())
    });

    let mut batch = WriteBatch::new();
    for id in ["n1", "n2"] {
        batch.update(
            notification_path("fan-1", id)?,
            DocumentUpdate::new().set("read", true),
        );
    }

    let result = store.commit(batch).await;
    assert!(matches!(
        result,
        Err(Error::PermissionDenied {
            operation: Operation::Update,
            ..
        })
    ));

    let first = store.get(&notification_path("fan-1", "n1")?).await?.unwrap();
    assert_eq!(first.data["read"], json!(false));
    assert_eq!(first.data["timestamp"], json!(1_000));
    Ok(())
}

// fanbase/fanbase-store-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use fanbase_store::prelude::*;

use super::store;

#[tokio::test]
async fn test_document_watch_delivers_changes() -> Result<()> {
    let store = store().await?;
    let path = DocumentPath::parse("messages/thread-1")?;

    let mut watch = store.watch_document(&path)?;
    assert_eq!(watch.next().await, Some(None));

    store
        .set(&path, DocumentUpdate::new().set("message", "Hello"), false)
        .await?;
    let snapshot = watch.next().await.flatten().unwrap();
    assert_eq!(snapshot.data["message"], json!("Hello"));

    store.delete(&path).await?;
    assert_eq!(watch.next().await, Some(None));
    Ok(())
}

#[tokio::test]
async fn test_query_watch_only_sees_its_collection() -> Result<()> {
    let store = store().await?;
    let query = Query::new(CollectionPath::parse("fans/fan-1/notifications")?)
        .order_by("timestamp", QueryDirection::Descending);

    let mut watch = store.watch_query(&query)?;
    assert_eq!(watch.next().await, Some(vec![]));

    // Lands in another recipient's notifications and must not wake up the watch.
    store
        .set(
            &DocumentPath::parse("fans/fan-2/notifications/n1")?,
            DocumentUpdate::new().set("timestamp", 1_000),
            false,
        )
        .await?;
    store
        .set(
            &DocumentPath::parse("fans/fan-1/notifications/n2")?,
            DocumentUpdate::new().set("timestamp", 2_000),
            false,
        )
        .await?;

    let snapshots = watch.next().await.unwrap_or_default();
    assert_eq!(
        snapshots.iter().map(|doc| doc.id()).collect::<Vec<_>>(),
        vec!["n2"]
    );
    Ok(())
}

#[tokio::test]
async fn test_dropping_subscription_releases_listener() -> Result<()> {
    let store = store().await?;
    let path = DocumentPath::parse("fans/fan-1")?;

    let document_watch = store.watch_document(&path)?;
    let query_watch = store
        .watch_query(&Query::new(CollectionPath::parse("messages")?))?
        .map(|snapshots| snapshots.len());
    assert_eq!(store.active_watch_count(), 2);

    drop(document_watch);
    assert_eq!(store.active_watch_count(), 1);

    query_watch.cancel();
    assert_eq!(store.active_watch_count(), 0);
    Ok(())
}

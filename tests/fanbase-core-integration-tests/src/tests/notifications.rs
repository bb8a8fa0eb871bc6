// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;

use fanbase_core::dtos::{EntityRef, FailureKind};
use fanbase_store::prelude::*;

use super::helpers::{wait_for, TestClient, TestEnvironment};

/// Has two fans like a thread of `fan-z` so that `fan-z` has two unread notifications.
async fn owner_with_notifications(env: &TestEnvironment) -> Result<TestClient> {
    let owner = env.fan("fan-z").await?;
    let thread = env.thread(&owner, "fan-z", "Loved the show").await?;

    for fan in ["fan-x", "fan-y"] {
        let client = env.fan(fan).await?;
        let like = client
            .engagement
            .toggle_like(&EntityRef::Message(thread.clone()))
            .await?;
        assert_eq!(like.outcome.wait().await, Ok(()));
    }
    Ok(owner)
}

#[tokio::test]
async fn test_notifications_are_private() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = owner_with_notifications(&env).await?;
    let other = env.fan("fan-x").await?;

    assert!(other
        .notifications
        .subscribe_notifications(&"fan-z".into(), None)
        .is_err());
    assert!(other.notifications.mark_all_read(&"fan-z".into()).await.is_err());

    let mut own = other.notifications.unread_count(&"fan-x".into())?;
    assert_eq!(wait_for(&mut own, |_| true).await?, 0);

    let mut count = owner.notifications.unread_count(&"fan-z".into())?;
    assert_eq!(wait_for(&mut count, |_| true).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_mark_all_read() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = owner_with_notifications(&env).await?;

    let mut count = owner.notifications.unread_count(&"fan-z".into())?;
    assert_eq!(wait_for(&mut count, |count| *count == 2).await?, 2);

    assert_eq!(owner.notifications.mark_all_read(&"fan-z".into()).await?, 2);
    assert_eq!(wait_for(&mut count, |count| *count == 0).await?, 0);

    // Nothing left to mark.
    assert_eq!(owner.notifications.mark_all_read(&"fan-z".into()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_mark_all_read_changes_nothing() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = owner_with_notifications(&env).await?;

    let mut feed = owner
        .notifications
        .subscribe_notifications(&"fan-z".into(), None)?;
    let notifications = wait_for(&mut feed, |notifications: &Vec<_>| notifications.len() == 2).await?;
    let blocked = notifications[1].id.clone();

    {
        let blocked = format!("fans/fan-z/notifications/{}", blocked);
        env.store
            .set_access_policy(move |operation: Operation, path: &str| {
                if operation == Operation::Update && path == blocked {
                    return Err(Error::permission_denied(operation, path));
                }
                Ok(())
            });
    }

    let err = owner
        .notifications
        .mark_all_read(&"fan-z".into())
        .await
        .unwrap_err();
    assert_eq!(err.operation, Operation::Update);
    assert_eq!(err.kind, FailureKind::PermissionDenied);
    assert_eq!(err.notification_ids.len(), 2);
    assert!(err.notification_ids.contains(&blocked));

    let mut count = owner.notifications.unread_count(&"fan-z".into())?;
    assert_eq!(wait_for(&mut count, |_| true).await?, 2);

    env.store.set_access_policy(AllowAll);
    assert_eq!(owner.notifications.mark_all_read(&"fan-z".into()).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_mark_single_notification_read() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = owner_with_notifications(&env).await?;

    let mut feed = owner.notifications.subscribe_notification_feed(&"fan-z".into())?;
    let notifications = wait_for(&mut feed, |notifications: &Vec<_>| notifications.len() == 2).await?;

    let outcome = owner.notifications.mark_read(&notifications[0].id)?;
    assert_eq!(outcome.wait().await, Ok(()));

    let mut count = owner.notifications.unread_count(&"fan-z".into())?;
    assert_eq!(wait_for(&mut count, |count| *count == 1).await?, 1);
    Ok(())
}

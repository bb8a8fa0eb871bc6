// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use fanbase_core::dtos::{
    Emoji, EntityRef, FailureKind, LikeSet, MutationKind, ThreadId, TrackLikes,
};
use fanbase_core::ClientEvent;
use fanbase_store::prelude::*;

use super::helpers::{wait_for, TestEnvironment};

async fn stored_field(env: &TestEnvironment, thread: &ThreadId, field: &str) -> Result<Value> {
    let path = DocumentPath::parse(&format!("messages/{}", thread))?;
    let snapshot = env.store.get(&path).await?;
    Ok(snapshot
        .and_then(|snapshot| snapshot.data.get(field).cloned())
        .unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_concurrent_likes_merge() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = env.fan("fan-z").await?;
    let x = env.fan("fan-x").await?;
    let y = env.fan("fan-y").await?;

    let thread = env.thread(&owner, "fan-z", "Loved the show").await?;
    let entity = EntityRef::Message(thread.clone());

    let (lhs, rhs) = futures::join!(
        x.engagement.toggle_like(&entity),
        y.engagement.toggle_like(&entity)
    );
    assert_eq!(lhs?.outcome.wait().await, Ok(()));
    assert_eq!(rhs?.outcome.wait().await, Ok(()));

    let unlike = x.engagement.toggle_like(&entity).await?;
    assert_eq!(unlike.value, LikeSet::from(["fan-y"]));
    assert_eq!(unlike.outcome.wait().await, Ok(()));

    assert_eq!(stored_field(&env, &thread, "likes").await?, json!(["fan-y"]));
    Ok(())
}

#[tokio::test]
async fn test_toggling_twice_restores_original_state() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = env.fan("fan-z").await?;
    let x = env.fan("fan-x").await?;

    let thread = env.thread(&owner, "fan-z", "Loved the show").await?;
    let entity = EntityRef::Message(thread.clone());

    let first = x.engagement.toggle_like(&entity).await?;
    let second = x.engagement.toggle_like(&entity).await?;

    assert_eq!(first.value, LikeSet::from(["fan-x"]));
    assert!(second.value.is_empty());
    assert_eq!(first.outcome.wait().await, Ok(()));
    assert_eq!(second.outcome.wait().await, Ok(()));

    assert_eq!(stored_field(&env, &thread, "likes").await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn test_withdrawn_reactions_leave_no_empty_emoji() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = env.fan("fan-z").await?;
    let x = env.fan("fan-x").await?;
    let y = env.fan("fan-y").await?;

    let thread = env.thread(&owner, "fan-z", "Loved the show").await?;
    let entity = EntityRef::Message(thread.clone());
    let fire = Emoji::from("🔥");

    x.engagement.toggle_reaction(&entity, &fire).await?;
    x.flush().await;
    y.engagement.toggle_reaction(&entity, &fire).await?;
    y.flush().await;
    assert_eq!(
        stored_field(&env, &thread, "reactions").await?,
        json!({ "🔥": ["fan-x", "fan-y"] })
    );

    let reactions = x.engagement.toggle_reaction(&entity, &fire).await?;
    assert_eq!(
        reactions.value.reactors(&fire),
        Some(&LikeSet::from(["fan-y"]))
    );
    x.flush().await;

    let reactions = y.engagement.toggle_reaction(&entity, &fire).await?;
    assert!(reactions.value.is_empty());
    y.flush().await;

    assert_eq!(stored_field(&env, &thread, "reactions").await?, json!({}));
    Ok(())
}

#[tokio::test]
async fn test_only_others_trigger_notifications() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = env.fan("fan-z").await?;
    let x = env.fan("fan-x").await?;

    let thread = env.thread(&owner, "fan-z", "Loved the show").await?;
    let entity = EntityRef::Message(thread.clone());

    let like = owner.engagement.toggle_like(&entity).await?;
    assert_eq!(like.outcome.wait().await, Ok(()));

    let mut feed = owner
        .notifications
        .subscribe_notification_feed(&"fan-z".into())?;
    assert_eq!(wait_for(&mut feed, |_| true).await?, vec![]);

    let like = x.engagement.toggle_like(&entity).await?;
    assert_eq!(like.outcome.wait().await, Ok(()));

    let notifications = wait_for(&mut feed, |notifications| !notifications.is_empty()).await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].content,
        r#"Someone liked your message: "Loved the show...""#
    );
    assert_eq!(notifications[0].link, format!("/messages/{}", thread));
    assert!(!notifications[0].read);
    Ok(())
}

#[tokio::test]
async fn test_failed_like_is_reported_and_rolled_back() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let owner = env.fan("fan-z").await?;
    let x = env.fan("fan-x").await?;

    let thread = env.thread(&owner, "fan-z", "Loved the show").await?;
    let entity = EntityRef::Message(thread.clone());

    env.store
        .set_access_policy(|operation: Operation, path: &str| {
            if operation == Operation::Update && path.starts_with("messages/") {
                return Err(Error::permission_denied(operation, path));
            }
            Ok(())
        });

    let like = x.engagement.toggle_like(&entity).await?;
    assert_eq!(like.value, LikeSet::from(["fan-x"]));
    assert_eq!(like.outcome.wait().await, Err(FailureKind::PermissionDenied));
    assert_eq!(
        x.mutation_failures(),
        vec![ClientEvent::MutationFailed {
            entity: entity.clone(),
            mutation: MutationKind::Like,
            kind: FailureKind::PermissionDenied,
        }]
    );

    env.store.set_access_policy(AllowAll);

    // The failed toggle no longer counts, so this one likes again.
    let like = x.engagement.toggle_like(&entity).await?;
    assert_eq!(like.value, LikeSet::from(["fan-x"]));
    assert_eq!(like.outcome.wait().await, Ok(()));
    assert_eq!(stored_field(&env, &thread, "likes").await?, json!(["fan-x"]));
    Ok(())
}

#[tokio::test]
async fn test_track_likes_are_counted_live() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let x = env.fan("fan-x").await?;
    let y = env.fan("fan-y").await?;
    let track = "intro".into();

    let mut likes = x.engagement.subscribe_track_likes(&track)?;
    wait_for(&mut likes, |likes| likes == &TrackLikes::default()).await?;

    let like = y.engagement.toggle_track_like(&track).await?;
    assert_eq!(like.outcome.wait().await, Ok(()));
    wait_for(&mut likes, |likes| likes.count == 1 && !likes.is_liked).await?;

    let like = x.engagement.toggle_track_like(&track).await?;
    assert_eq!(
        like.value,
        TrackLikes {
            count: 2,
            is_liked: true
        }
    );
    assert_eq!(like.outcome.wait().await, Ok(()));
    wait_for(&mut likes, |likes| likes.count == 2 && likes.is_liked).await?;

    let unlike = x.engagement.toggle_track_like(&track).await?;
    assert_eq!(unlike.value.count, 1);
    assert_eq!(unlike.outcome.wait().await, Ok(()));
    wait_for(&mut likes, |likes| likes.count == 1 && !likes.is_liked).await?;

    let stored = env
        .store
        .query(&Query::new(CollectionPath::parse("music/intro/likes")?))
        .await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), "fan-y");
    assert_eq!(stored[0].data.get("fanId"), Some(&json!("fan-y")));
    assert_eq!(stored[0].data.get("musicId"), Some(&json!("intro")));
    assert!(stored[0].data.get("likeDate").is_some());
    Ok(())
}

#[tokio::test]
async fn test_failed_track_like_is_reported() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let x = env.fan("fan-x").await?;

    env.store
        .set_access_policy(|operation: Operation, path: &str| {
            if operation == Operation::Create && path.starts_with("music/") {
                return Err(Error::permission_denied(operation, path));
            }
            Ok(())
        });

    let like = x.engagement.toggle_track_like(&"intro".into()).await?;
    assert!(like.value.is_liked);
    assert_eq!(like.outcome.wait().await, Err(FailureKind::PermissionDenied));
    assert!(x.events().contains(&ClientEvent::TrackMutationFailed {
        track: "intro".into(),
        mutation: MutationKind::Like,
        kind: FailureKind::PermissionDenied,
    }));
    Ok(())
}

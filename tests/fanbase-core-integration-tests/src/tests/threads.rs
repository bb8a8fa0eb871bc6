// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use fanbase_core::dtos::{EntityRef, InboxScope, Presence, SenderRole, ThreadId};
use fanbase_store::prelude::*;
use fanbase_utils::TimeProvider;

use super::helpers::{wait_for, TestEnvironment};

fn ids(summaries: &[fanbase_core::dtos::ThreadSummary]) -> Vec<ThreadId> {
    summaries.iter().map(|summary| summary.id.clone()).collect()
}

#[tokio::test]
async fn test_replies_move_threads_to_top_of_inbox() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let admin = env.admin().await?;
    let fan_a = env.fan("fan-a").await?;
    let fan_b = env.fan("fan-b").await?;

    let older = env.thread(&fan_a, "fan-a", "First!").await?;
    env.advance(1);
    let newer = env.thread(&fan_b, "fan-b", "Second!").await?;
    env.advance(1);

    let mut inbox = admin.threads.subscribe_inbox(&InboxScope::All)?;
    let summaries = wait_for(&mut inbox, |summaries: &Vec<_>| summaries.len() == 2).await?;
    assert_eq!(ids(&summaries), vec![newer.clone(), older.clone()]);

    let reply = admin
        .engagement
        .append_reply(&EntityRef::Message(older.clone()), "Thanks for writing!")
        .await?;
    assert_eq!(reply.value.sender_role, SenderRole::Operator);
    assert_eq!(reply.value.sender_name, "The Artist");
    assert_eq!(reply.outcome.wait().await, Ok(()));

    let summaries = wait_for(&mut inbox, |summaries: &Vec<_>| {
        summaries.first().map(|summary| &summary.id) == Some(&older)
    })
    .await?;
    assert_eq!(ids(&summaries), vec![older.clone(), newer]);
    assert_eq!(summaries[0].preview, "Thanks for writing!");
    assert_eq!(summaries[0].reply_count, 1);
    assert_eq!(summaries[0].owner_presence, Some(Presence::Online));

    let mut own_inbox = fan_a
        .threads
        .subscribe_inbox(&InboxScope::Owner("fan-a".into()))?;
    let summaries = wait_for(&mut own_inbox, |summaries: &Vec<_>| !summaries.is_empty()).await?;
    assert_eq!(ids(&summaries), vec![older]);
    Ok(())
}

#[tokio::test]
async fn test_last_reply_time_never_moves_backwards() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let admin = env.admin().await?;
    let fan = env.fan("fan-a").await?;

    let thread = env.thread(&fan, "fan-a", "Hello").await?;
    let entity = EntityRef::Message(thread.clone());

    env.advance(10);
    let latest = env.clock.now().timestamp_millis();
    admin.engagement.append_reply(&entity, "Later").await?;

    // A client with a lagging clock replies afterwards.
    env.advance(-5);
    fan.engagement.append_reply(&entity, "Earlier").await?;
    admin.flush().await;
    fan.flush().await;

    let snapshot = env
        .store
        .get(&DocumentPath::parse(&format!("messages/{}", thread))?)
        .await?
        .unwrap();
    assert_eq!(snapshot.data["lastRepliedAt"], json!(latest));
    assert_eq!(snapshot.data["replies"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_thread_moderation() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let admin = env.admin().await?;
    let fan = env.fan("fan-a").await?;

    let thread = env.thread(&fan, "fan-a", "Hello").await?;
    let entity = EntityRef::Message(thread.clone());
    fan.engagement.append_reply(&entity, "Anyone there?").await?;
    fan.flush().await;

    let mut view = admin.threads.subscribe_thread(&thread)?;
    let current = wait_for(&mut view, |thread| thread.is_some()).await?;
    assert!(current.map(|thread| !thread.is_deleted).unwrap_or(false));

    assert_eq!(
        admin.threads.mark_thread_read(&thread)?.wait().await,
        Ok(())
    );
    assert_eq!(
        admin.threads.soft_delete_message(&thread)?.wait().await,
        Ok(())
    );

    let current = wait_for(&mut view, |thread| {
        thread.as_ref().map(|thread| thread.is_deleted).unwrap_or(false)
    })
    .await?
    .unwrap();
    assert!(current.message.read);
    assert_eq!(current.message.body, "[This message has been deleted]");
    assert_eq!(current.message.replies.len(), 1);

    admin.threads.delete_thread(&thread).await?;
    assert_eq!(wait_for(&mut view, |thread| thread.is_none()).await?, None);
    Ok(())
}

#[tokio::test]
async fn test_direct_message_reaches_recipient() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let admin = env.admin().await?;
    let fan = env.fan("fan-a").await?;

    let thread = admin
        .threads
        .send_direct_message(
            &"fan-a".into(),
            "fan-a",
            "fan-a@example.com",
            "Thanks for coming to the show!",
        )
        .await?;

    let mut inbox = fan
        .threads
        .subscribe_inbox(&InboxScope::Owner("fan-a".into()))?;
    let summaries = wait_for(&mut inbox, |summaries: &Vec<_>| !summaries.is_empty()).await?;
    assert_eq!(ids(&summaries), vec![thread.clone()]);

    let mut feed = fan
        .notifications
        .subscribe_notification_feed(&"fan-a".into())?;
    let notifications = wait_for(&mut feed, |notifications: &Vec<_>| !notifications.is_empty()).await?;
    assert_eq!(
        notifications[0].content,
        r#"The artist sent you a message: "Thanks for coming to the show!...""#
    );
    assert_eq!(notifications[0].link, format!("/messages/{}", thread));

    assert!(fan
        .threads
        .send_direct_message(&"fan-b".into(), "fan-b", "fan-b@example.com", "Hi")
        .await
        .is_err());
    Ok(())
}

// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;

use fanbase_core::dtos::{ClientCommentId, Comment, CommentId, LikeSet};
use fanbase_store::prelude::*;

use super::helpers::{wait_for, TestEnvironment};

fn is_confirmed(comments: &Vec<Comment>) -> bool {
    comments.len() == 1 && !comments[0].id.is_provisional()
}

#[tokio::test]
async fn test_posted_comment_appears_once() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let fan = env.fan("fan-x").await?;

    let mut feed = fan.comments.open_feed(&"intro".into())?;
    let posted = feed.post("Love it")?;
    assert_eq!(
        posted.value.id,
        CommentId::Provisional(ClientCommentId::from("fan-x-tmp-1"))
    );
    assert_eq!(feed.comments().len(), 1);
    assert_eq!(posted.outcome.wait().await, Ok(()));

    let comments = wait_for(&mut feed, is_confirmed).await?;
    assert_eq!(comments[0].content, "Love it");
    assert_eq!(
        comments[0].client_ref,
        Some(ClientCommentId::from("fan-x-tmp-1"))
    );
    assert_eq!(feed.comments().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_likes_on_comments_notify_author() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let author = env.fan("fan-x").await?;
    let listener = env.fan("fan-y").await?;

    let author_feed = author.comments.open_feed(&"intro".into())?;
    assert_eq!(author_feed.post("Love it")?.outcome.wait().await, Ok(()));

    let mut feed = listener.comments.open_feed(&"intro".into())?;
    let comments = wait_for(&mut feed, is_confirmed).await?;

    let likes = feed.toggle_like(&comments[0].id).await?;
    assert_eq!(likes.value, LikeSet::from(["fan-y"]));
    assert_eq!(feed.comments()[0].likes, LikeSet::from(["fan-y"]));
    assert_eq!(likes.outcome.wait().await, Ok(()));

    let mut notifications = author
        .notifications
        .subscribe_notification_feed(&"fan-x".into())?;
    let notifications =
        wait_for(&mut notifications, |notifications: &Vec<_>| !notifications.is_empty()).await?;
    assert_eq!(
        notifications[0].content,
        r#"Someone liked your comment on the track "intro"."#
    );
    assert_eq!(notifications[0].link, "/music#intro");
    Ok(())
}

#[tokio::test]
async fn test_deleting_unconfirmed_comment() -> Result<()> {
    let env = TestEnvironment::new().await?;
    let fan = env.fan("fan-x").await?;

    let feed = fan.comments.open_feed(&"intro".into())?;
    let posted = feed.post("Oops")?;
    let deleted = feed.delete(&posted.value.id)?;
    assert!(feed.comments().is_empty());

    assert_eq!(posted.outcome.wait().await, Ok(()));
    assert_eq!(deleted.wait().await, Ok(()));

    let stored = env
        .store
        .query(&Query::new(CollectionPath::parse("music/intro/comments")?))
        .await?;
    assert!(stored.is_empty());
    Ok(())
}

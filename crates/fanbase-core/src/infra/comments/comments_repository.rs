// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use fanbase_store::prelude::*;

use crate::domain::comments::models::{Comment, NewComment};
use crate::domain::comments::repos::CommentsRepository as CommentsRepositoryTrait;
use crate::domain::engagement::models::{LikeSet, ReactionMap};
use crate::domain::shared::models::{ClientCommentId, CommentId, ServerCommentId, TrackId, UserId};
use crate::infra::engagement::ReplyRecord;

/// Stored below `music/{track}/comments`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: ServerCommentId,
    pub fan_id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub comment_date: Option<DateTime<Utc>>,
    pub music_id: TrackId,
    #[serde(default)]
    pub likes: LikeSet,
    #[serde(default)]
    pub reactions: ReactionMap,
    #[serde(default)]
    pub replies: Vec<ReplyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ref: Option<ClientCommentId>,
}

const TRACKS: &str = "music";
const COMMENTS: &str = "comments";

mod fields {
    pub const FAN_ID: &str = "fanId";
    pub const USERNAME: &str = "username";
    pub const PHOTO_URL: &str = "photoURL";
    pub const CONTENT: &str = "content";
    pub const COMMENT_DATE: &str = "commentDate";
    pub const MUSIC_ID: &str = "musicId";
    pub const LIKES: &str = "likes";
    pub const REACTIONS: &str = "reactions";
    pub const REPLIES: &str = "replies";
    pub const CLIENT_REF: &str = "clientRef";
}

fn comments_path(track: &TrackId) -> Result<CollectionPath, Error> {
    CollectionPath::root(TRACKS)?.doc(track)?.collection(COMMENTS)
}

pub fn comment_path(track: &TrackId, id: &ServerCommentId) -> Result<DocumentPath, Error> {
    comments_path(track)?.doc(id)
}

pub struct CommentsRepository {
    store: Store<PlatformDriver>,
}

impl CommentsRepository {
    pub fn new(store: Store<PlatformDriver>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentsRepositoryTrait for CommentsRepository {
    async fn create(&self, track: &TrackId, comment: &NewComment) -> Result<ServerCommentId> {
        let mut update = DocumentUpdate::new()
            .set(fields::FAN_ID, comment.author.as_str())
            .set(fields::USERNAME, comment.author_name.as_str())
            .set(fields::CONTENT, comment.content.as_str())
            .set(fields::MUSIC_ID, track.as_str())
            .set(fields::LIKES, Value::Array(vec![]))
            .set(fields::REACTIONS, Value::Object(Map::new()))
            .set(fields::REPLIES, Value::Array(vec![]))
            .set(fields::CLIENT_REF, comment.client_ref.as_str())
            .server_timestamp(fields::COMMENT_DATE);

        if let Some(photo_url) = &comment.author_photo_url {
            update = update.set(fields::PHOTO_URL, photo_url.as_str());
        }

        let path = self.store.add(&comments_path(track)?, update).await?;
        Ok(ServerCommentId::from(path.id()))
    }

    async fn delete(&self, track: &TrackId, id: &ServerCommentId) -> Result<()> {
        self.store.delete(&comment_path(track, id)?).await?;
        Ok(())
    }

    fn watch(&self, track: &TrackId) -> Result<Subscription<Vec<Comment>>> {
        let query = Query::new(comments_path(track)?)
            .order_by(fields::COMMENT_DATE, QueryDirection::Descending);

        let subscription = self.store.watch_query(&query)?;
        Ok(subscription.map(|snapshots| {
            snapshots
                .iter()
                .filter_map(|snapshot| match snapshot.decode::<CommentRecord>() {
                    Ok(record) => Some(record.into()),
                    Err(err) => {
                        warn!("Ignoring malformed comment {}. {}", snapshot.path, err);
                        None
                    }
                })
                .collect::<Vec<_>>()
        }))
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: CommentId::Confirmed(record.id),
            track: record.music_id,
            author: record.fan_id,
            author_name: record.username,
            author_photo_url: record.photo_url,
            content: record.content,
            created_at: record.comment_date,
            likes: record.likes,
            reactions: record.reactions,
            replies: record.replies.into_iter().map(Into::into).collect(),
            client_ref: record.client_ref,
        }
    }
}

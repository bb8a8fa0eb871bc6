// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::engagement::models::{LikeSet, ReactionMap, Reply};
use crate::domain::shared::models::{ClientCommentId, CommentId, EntityRef, TrackId, UserId};

/// A comment on a track.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub track: TrackId,
    pub author: UserId,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub likes: LikeSet,
    pub reactions: ReactionMap,
    pub replies: Vec<Reply>,
    /// Identifier the posting client chose for the comment before it was confirmed.
    pub client_ref: Option<ClientCommentId>,
}

/// A comment that is about to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub client_ref: ClientCommentId,
    pub author: UserId,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub content: String,
}

impl Comment {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::Comment {
            track: self.track.clone(),
            comment: self.id.clone(),
        }
    }

    /// The locally staged representation of `comment`.
    pub fn provisional(track: TrackId, comment: &NewComment, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::Provisional(comment.client_ref.clone()),
            track,
            author: comment.author.clone(),
            author_name: comment.author_name.clone(),
            author_photo_url: comment.author_photo_url.clone(),
            content: comment.content.clone(),
            created_at: Some(created_at),
            likes: Default::default(),
            reactions: Default::default(),
            replies: vec![],
            client_ref: Some(comment.client_ref.clone()),
        }
    }
}

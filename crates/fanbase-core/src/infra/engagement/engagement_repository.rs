// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use fanbase_store::prelude::*;

use crate::domain::engagement::models::{EngagementState, Emoji, Reply, ReplyId};
use crate::domain::engagement::repos::EngagementRepository as EngagementRepositoryTrait;
use crate::domain::shared::models::{EngagementError, EntityRef, UserId};
use crate::infra::comments::{comment_path, CommentRecord};
use crate::infra::engagement::ReplyRecord;
use crate::infra::threads::{message_path, MessageRecord};

mod fields {
    pub const LIKES: &str = "likes";
    pub const REACTIONS: &str = "reactions";
    pub const REPLIES: &str = "replies";
    pub const LAST_REPLIED_AT: &str = "lastRepliedAt";
    pub const REPLY_ID: &str = "id";
}

/// The document backing `entity`. Provisional comments have no document yet.
pub fn entity_path(entity: &EntityRef) -> Result<DocumentPath> {
    match entity {
        EntityRef::Message(id) => Ok(message_path(id)?),
        EntityRef::Comment { track, comment } => {
            let Some(id) = comment.confirmed() else {
                return Err(EngagementError::ProvisionalEntity(entity.clone()).into());
            };
            Ok(comment_path(track, id)?)
        }
    }
}

/// Likes, reactions and replies of messages and comments, written with field-level merges so
/// that concurrent writers never overwrite each other.
pub struct EngagementRepository {
    store: Store<PlatformDriver>,
}

impl EngagementRepository {
    pub fn new(store: Store<PlatformDriver>) -> Self {
        Self { store }
    }

    async fn update(&self, entity: &EntityRef, update: DocumentUpdate) -> Result<()> {
        self.store.update(&entity_path(entity)?, update).await?;
        Ok(())
    }
}

#[async_trait]
impl EngagementRepositoryTrait for EngagementRepository {
    async fn get(&self, entity: &EntityRef) -> Result<Option<EngagementState>> {
        let Some(snapshot) = self.store.get(&entity_path(entity)?).await? else {
            return Ok(None);
        };

        let state = match entity {
            EntityRef::Message(_) => {
                let record = snapshot.decode::<MessageRecord>()?;
                EngagementState {
                    owner: record.fan_id.filter(|id| !id.as_str().is_empty()),
                    excerpt: record.message,
                    likes: record.likes,
                    reactions: record.reactions,
                    replies: record.replies.into_iter().map(Into::into).collect(),
                    last_replied_at: record.last_replied_at,
                }
            }
            EntityRef::Comment { .. } => {
                let record = snapshot.decode::<CommentRecord>()?;
                EngagementState {
                    owner: Some(record.fan_id).filter(|id| !id.as_str().is_empty()),
                    excerpt: record.content,
                    likes: record.likes,
                    reactions: record.reactions,
                    replies: record.replies.into_iter().map(Into::into).collect(),
                    last_replied_at: None,
                }
            }
        };

        Ok(Some(state))
    }

    async fn add_like(&self, entity: &EntityRef, user_id: &UserId) -> Result<()> {
        self.update(
            entity,
            DocumentUpdate::new().array_union(fields::LIKES, user_id.as_str()),
        )
        .await
    }

    async fn remove_like(&self, entity: &EntityRef, user_id: &UserId) -> Result<()> {
        self.update(
            entity,
            DocumentUpdate::new().array_remove(fields::LIKES, user_id.as_str()),
        )
        .await
    }

    async fn add_reaction(
        &self,
        entity: &EntityRef,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<()> {
        self.update(
            entity,
            DocumentUpdate::new().array_union(reaction_field(emoji), user_id.as_str()),
        )
        .await
    }

    async fn remove_reaction(
        &self,
        entity: &EntityRef,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<()> {
        self.update(
            entity,
            DocumentUpdate::new().array_remove_pruning(reaction_field(emoji), user_id.as_str()),
        )
        .await
    }

    async fn append_reply(&self, entity: &EntityRef, reply: &Reply) -> Result<()> {
        let mut update = DocumentUpdate::new().array_union(
            fields::REPLIES,
            serde_json::to_value(ReplyRecord::from(reply))?,
        );

        if let EntityRef::Message(_) = entity {
            update = update.maximum(
                fields::LAST_REPLIED_AT,
                reply.timestamp.timestamp_millis(),
            );
        }

        self.update(entity, update).await
    }

    async fn remove_reply(&self, entity: &EntityRef, reply_id: &ReplyId) -> Result<bool> {
        let Some(snapshot) = self.store.get(&entity_path(entity)?).await? else {
            return Err(EngagementError::EntityNotFound(entity.clone()).into());
        };

        // ArrayRemove matches by value, so the stored representation is needed.
        let stored_reply = snapshot
            .data
            .get(fields::REPLIES)
            .and_then(Value::as_array)
            .and_then(|replies| {
                replies.iter().find(|reply| {
                    reply.get(fields::REPLY_ID).and_then(Value::as_str) == Some(reply_id.as_str())
                })
            })
            .cloned();

        let Some(stored_reply) = stored_reply else {
            debug!("No reply {} found in {}.", reply_id, entity);
            return Ok(false);
        };

        self.update(
            entity,
            DocumentUpdate::new().array_remove(fields::REPLIES, stored_reply),
        )
        .await?;
        Ok(true)
    }
}

fn reaction_field(emoji: &Emoji) -> FieldPath {
    FieldPath::new([fields::REACTIONS, emoji.as_str()])
}

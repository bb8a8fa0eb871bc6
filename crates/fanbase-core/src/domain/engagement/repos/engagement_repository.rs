// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::engagement::models::{EngagementState, Emoji, Reply, ReplyId};
use crate::domain::shared::models::{EntityRef, UserId};

/// Field-level access to the engagement data of messages and comments. Every mutation is an
/// additive or subtractive merge so that concurrent writers never overwrite each other.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait EngagementRepository: Send + Sync {
    async fn get(&self, entity: &EntityRef) -> Result<Option<EngagementState>>;

    async fn add_like(&self, entity: &EntityRef, user_id: &UserId) -> Result<()>;
    async fn remove_like(&self, entity: &EntityRef, user_id: &UserId) -> Result<()>;

    async fn add_reaction(&self, entity: &EntityRef, emoji: &Emoji, user_id: &UserId)
        -> Result<()>;
    /// Removes the reaction and drops the emoji entirely if nobody else reacted with it.
    async fn remove_reaction(
        &self,
        entity: &EntityRef,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> Result<()>;

    /// Appends `reply` and advances the entity's last reply time if it has one.
    async fn append_reply(&self, entity: &EntityRef, reply: &Reply) -> Result<()>;
    /// Removes the reply with `reply_id`. Returns whether a reply was removed.
    async fn remove_reply(&self, entity: &EntityRef, reply_id: &ReplyId) -> Result<bool>;
}

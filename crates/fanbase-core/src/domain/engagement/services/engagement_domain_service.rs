// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::engagement::models::{Emoji, LikeSet, ReactionMap, Reply, ReplyId};
use crate::domain::general::models::{Optimistic, WriteOutcome};
use crate::domain::shared::models::{EntityRef, SessionContext};

/// Likes, reactions and replies on messages and comments. Every method computes the new local
/// state right away and queues the durable write; the returned outcome resolves once the write
/// has been applied.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait EngagementDomainService: Send + Sync {
    async fn toggle_like(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
    ) -> Result<Optimistic<LikeSet>>;

    async fn toggle_reaction(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
        emoji: &Emoji,
    ) -> Result<Optimistic<ReactionMap>>;

    async fn append_reply(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
        text: &str,
    ) -> Result<Optimistic<Reply>>;

    async fn delete_reply(&self, entity: &EntityRef, reply_id: &ReplyId) -> Result<WriteOutcome>;
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::engagement::models::{LikeSet, ReactionMap, Reply};
use crate::domain::shared::models::UserId;

/// The engagement related fields of a message or comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementState {
    /// Recipient of notifications about activity on the entity. Anonymous messages have none.
    pub owner: Option<UserId>,
    /// The text the entity is about, used to build notification snippets.
    pub excerpt: String,
    pub likes: LikeSet,
    pub reactions: ReactionMap,
    pub replies: Vec<Reply>,
    pub last_replied_at: Option<DateTime<Utc>>,
}

impl EngagementState {
    /// Whether activity by `actor` should be reported to the owner.
    pub fn should_notify(&self, actor: &UserId) -> bool {
        self.owner.as_ref().map(|owner| owner != actor).unwrap_or(false)
    }
}

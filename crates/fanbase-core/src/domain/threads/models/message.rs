// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::engagement::models::{LikeSet, ReactionMap, Reply};
use crate::domain::shared::models::{ThreadId, UserId};

/// The anchor document of a conversation between the operator and a fan.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: ThreadId,
    /// The fan the conversation belongs to. Anonymous contact form submissions have none.
    pub owner: Option<UserId>,
    pub name: String,
    pub email: String,
    pub body: String,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Whether the operator has read the message.
    pub read: bool,
    pub likes: LikeSet,
    pub reactions: ReactionMap,
    pub replies: Vec<Reply>,
    pub last_replied_at: Option<DateTime<Utc>>,
}

/// A message that is about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewThread {
    pub owner: Option<UserId>,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Message {
    /// The later of the creation time and the time of the latest reply.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.submitted_at.max(self.last_replied_at)
    }

    pub fn is_deleted(&self, placeholder: &str) -> bool {
        self.body == placeholder
    }

    pub fn last_reply(&self) -> Option<&Reply> {
        self.replies.last()
    }
}

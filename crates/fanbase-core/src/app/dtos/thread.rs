// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::presence::models::Presence;
use crate::domain::shared::models::ThreadId;
use crate::domain::threads::models::Message;

/// A single conversation together with the presence of the fan it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub message: Message,
    pub is_deleted: bool,
    /// `None` for anonymous threads or when the owner has no profile.
    pub owner_presence: Option<Presence>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSummary {
    pub id: ThreadId,
    pub originator_name: String,
    /// Text of the last reply, or the body if nobody replied yet.
    pub preview: String,
    pub preview_time: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
    pub is_unread: bool,
    pub is_deleted: bool,
    pub reply_count: usize,
    pub owner_presence: Option<Presence>,
}

impl ThreadSummary {
    pub(crate) fn new(
        message: &Message,
        owner_presence: Option<Presence>,
        deleted_placeholder: &str,
    ) -> Self {
        let (preview, preview_time) = match message.last_reply() {
            Some(reply) => (reply.text.clone(), Some(reply.timestamp)),
            None => (message.body.clone(), message.submitted_at),
        };

        Self {
            id: message.id.clone(),
            originator_name: message.name.clone(),
            preview,
            preview_time,
            last_activity: message.last_activity(),
            is_unread: !message.read,
            is_deleted: message.is_deleted(deleted_placeholder),
            reply_count: message.replies.len(),
            owner_presence,
        }
    }
}

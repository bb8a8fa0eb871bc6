// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::engagement::models::{Reply, ReplyId, SenderRole};
use crate::domain::shared::models::UserId;

/// A reply as it is embedded in the `replies` array of messages and comments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRecord {
    pub id: ReplyId,
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_photo_url: Option<String>,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub sender_type: SenderRole,
}

impl From<&Reply> for ReplyRecord {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id.clone(),
            sender_id: reply.sender_id.clone(),
            sender_name: reply.sender_name.clone(),
            sender_photo_url: reply.sender_photo_url.clone(),
            text: reply.text.clone(),
            timestamp: reply.timestamp,
            sender_type: reply.sender_role,
        }
    }
}

impl From<ReplyRecord> for Reply {
    fn from(record: ReplyRecord) -> Self {
        Self {
            id: record.id,
            sender_id: record.sender_id,
            sender_name: record.sender_name,
            sender_photo_url: record.sender_photo_url,
            text: record.text,
            timestamp: record.timestamp,
            sender_role: record.sender_type,
        }
    }
}

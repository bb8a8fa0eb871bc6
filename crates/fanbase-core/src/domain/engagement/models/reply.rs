// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fanbase_utils::id_string;

use crate::domain::shared::models::UserId;

id_string!(ReplyId);

/// Which side of a conversation sent a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenderRole {
    /// The operator of the platform, i.e. the artist or one of their admins.
    #[serde(rename = "admin")]
    Operator,
    /// The fan the conversation belongs to.
    #[serde(rename = "fan")]
    Subject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub id: ReplyId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub sender_photo_url: Option<String>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub sender_role: SenderRole,
}

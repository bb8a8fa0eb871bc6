// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use fanbase_utils::id_string;

id_string!(NotificationId);

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub content: String,
    /// App-relative link to the entity the notification is about.
    pub link: String,
    pub read: bool,
    /// Assigned by the store. `None` until the creating write has been applied.
    pub timestamp: Option<DateTime<Utc>>,
}

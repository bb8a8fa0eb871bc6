// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::shared::models::UserId;

#[derive(Debug, Clone, PartialEq)]
pub struct FanProfile {
    pub id: UserId,
    pub display_name: Option<String>,
    /// Overwritten every time the fan starts a session.
    pub last_active: Option<DateTime<Utc>>,
}

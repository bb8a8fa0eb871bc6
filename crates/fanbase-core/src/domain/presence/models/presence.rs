// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Duration, Utc};

use crate::domain::presence::models::format_distance_to_now;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Online,
    Offline { last_seen: Option<DateTime<Utc>> },
}

impl Presence {
    /// Online if the last activity happened less than `window` before `now`.
    pub fn from_last_active(
        last_active: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Self {
        match last_active {
            Some(last_active) if now.signed_duration_since(last_active) < window => {
                Presence::Online
            }
            last_seen => Presence::Offline { last_seen },
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Presence::Online)
    }

    /// E.g. "Online", "Last seen 3 minutes ago" or "never".
    pub fn describe(&self, now: DateTime<Utc>) -> String {
        match self {
            Presence::Online => "Online".to_string(),
            Presence::Offline { last_seen: None } => "never".to_string(),
            Presence::Offline {
                last_seen: Some(last_seen),
            } => format!("Last seen {}", format_distance_to_now(*last_seen, now)),
        }
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::cmp::Ordering;

use crate::domain::shared::models::UserId;
use crate::domain::threads::models::Message;

/// Which threads an inbox lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxScope {
    /// All threads, as seen by the operator.
    All,
    /// The threads owned by a single fan.
    Owner(UserId),
}

/// Sorts threads by their most recent activity, newest first. Threads with equal activity are
/// ordered by their identifier.
pub fn inbox_order(messages: &mut [Message]) {
    messages.sort_by(|lhs, rhs| {
        match rhs.last_activity().cmp(&lhs.last_activity()) {
            Ordering::Equal => lhs.id.cmp(&rhs.id),
            ordering => ordering,
        }
    })
}

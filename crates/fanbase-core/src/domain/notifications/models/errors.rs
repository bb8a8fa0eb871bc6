// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use fanbase_store::Operation;

use crate::domain::general::models::FailureKind;
use crate::domain::notifications::models::NotificationId;
use crate::domain::shared::models::UserId;

/// Marking all notifications of a recipient as read failed. Nothing has been changed; the same
/// call can be retried.
#[derive(Debug, thiserror::Error)]
#[error(
    "Failed to {operation} {count} notifications of {recipient}: {source}",
    count = .notification_ids.len()
)]
pub struct MarkAllReadError {
    pub recipient: UserId,
    /// The notifications that were meant to be marked as read.
    pub notification_ids: Vec<NotificationId>,
    pub operation: Operation,
    pub kind: FailureKind,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl MarkAllReadError {
    pub(crate) fn new(
        recipient: UserId,
        notification_ids: Vec<NotificationId>,
        operation: Operation,
        source: anyhow::Error,
    ) -> Self {
        Self {
            recipient,
            notification_ids,
            operation,
            kind: FailureKind::classify(&source),
            source: source.into(),
        }
    }
}

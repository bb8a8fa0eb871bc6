// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use fanbase_store::Subscription;

use crate::domain::notifications::models::{Notification, NotificationDraft, NotificationId};
use crate::domain::shared::models::UserId;

/// Notifications are stored per recipient. No method ever touches the notifications of anyone
/// but the given recipient.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait NotificationsRepository: Send + Sync {
    async fn create(&self, recipient: &UserId, draft: &NotificationDraft)
        -> Result<NotificationId>;

    async fn mark_read(&self, recipient: &UserId, id: &NotificationId) -> Result<()>;

    async fn get_unread_ids(&self, recipient: &UserId) -> Result<Vec<NotificationId>>;

    /// Marks all `ids` as read in a single atomic batch.
    async fn mark_all_read(&self, recipient: &UserId, ids: &[NotificationId]) -> Result<()>;

    /// Newest notifications first, at most `limit` if given.
    fn watch(
        &self,
        recipient: &UserId,
        limit: Option<usize>,
    ) -> Result<Subscription<Vec<Notification>>>;

    fn watch_unread_count(&self, recipient: &UserId) -> Result<Subscription<usize>>;
}

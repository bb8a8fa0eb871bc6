// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use crate::domain::notifications::models::NotificationDraft;
use crate::domain::shared::models::UserId;

/// Creates notifications as a side effect of other mutations.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait NotificationService: Send + Sync {
    /// Creates a notification for `recipient`. Does nothing without a recipient. Failures are
    /// logged and never reported to the caller.
    async fn notify(&self, recipient: Option<UserId>, draft: NotificationDraft);
}

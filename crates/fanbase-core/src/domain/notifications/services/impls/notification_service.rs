// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use tracing::{debug, warn};

use fanbase_proc_macros::DependenciesStruct;

use crate::app::deps::DynNotificationsRepository;
use crate::domain::notifications::models::NotificationDraft;
use crate::domain::notifications::services::NotificationService as NotificationServiceTrait;
use crate::domain::shared::models::UserId;

#[derive(DependenciesStruct)]
pub struct NotificationService {
    notifications_repo: DynNotificationsRepository,
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, recipient: Option<UserId>, draft: NotificationDraft) {
        let Some(recipient) = recipient.filter(|id| !id.as_str().trim().is_empty()) else {
            debug!("Skipping notification '{}' without recipient.", draft.content);
            return;
        };

        match self.notifications_repo.create(&recipient, &draft).await {
            Ok(id) => debug!("Created notification {} for {}.", id, recipient),
            Err(err) => warn!(
                "Failed to create notification for {} linking to {}. {}",
                recipient, draft.link, err
            ),
        }
    }
}

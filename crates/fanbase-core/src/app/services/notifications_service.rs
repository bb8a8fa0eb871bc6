// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use futures::FutureExt;
use itertools::Itertools;
use tracing::{info, warn};

use fanbase_proc_macros::InjectDependencies;
use fanbase_store::{Operation, Subscription};

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynNotificationsRepository, DynWriteQueue,
};
use crate::domain::general::models::{FailureKind, MutationKind, WriteOutcome};
use crate::domain::notifications::models::{MarkAllReadError, Notification, NotificationId};
use crate::domain::shared::models::{EngagementError, UserId};
use crate::ClientEvent;

#[derive(InjectDependencies)]
pub struct NotificationsService {
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    notifications_repo: DynNotificationsRepository,
    #[inject]
    write_queue: DynWriteQueue,
}

impl NotificationsService {
    /// Newest notifications of `recipient` first, at most `limit` if given.
    pub fn subscribe_notifications(
        &self,
        recipient: &UserId,
        limit: Option<usize>,
    ) -> Result<Subscription<Vec<Notification>>> {
        self.ensure_recipient(recipient)?;
        self.notifications_repo.watch(recipient, limit)
    }

    /// The latest notifications of `recipient` as configured for the notification bell.
    pub fn subscribe_notification_feed(
        &self,
        recipient: &UserId,
    ) -> Result<Subscription<Vec<Notification>>> {
        self.subscribe_notifications(recipient, self.ctx.config.notification_feed_limit)
    }

    pub fn unread_count(&self, recipient: &UserId) -> Result<Subscription<usize>> {
        self.ensure_recipient(recipient)?;
        self.notifications_repo.watch_unread_count(recipient)
    }

    /// Marks a single notification of the signed-in user as read. A failure is reported to the
    /// `ClientDelegate`.
    pub fn mark_read(&self, id: &NotificationId) -> Result<WriteOutcome> {
        let recipient = self.ctx.session()?.user_id;
        let client_event_dispatcher = self.client_event_dispatcher.clone();
        let repo = self.notifications_repo.clone();
        let id = id.clone();

        Ok(self.write_queue.enqueue(
            async move {
                let Err(err) = repo.mark_read(&recipient, &id).await else {
                    return Ok(());
                };
                let kind = FailureKind::classify(&err);
                warn!("Failed to mark notification {} of {} as read. {}", id, recipient, err);
                client_event_dispatcher.dispatch_event(ClientEvent::NotificationMutationFailed {
                    notification: id,
                    mutation: MutationKind::MarkNotificationRead,
                    kind,
                });
                Err(kind)
            }
            .boxed(),
        ))
    }

    /// Marks every currently unread notification of `recipient` as read in a single batch and
    /// returns the number of notifications affected. On failure the error names the
    /// notifications and the operation so that the caller can offer a retry.
    pub async fn mark_all_read(&self, recipient: &UserId) -> Result<usize, MarkAllReadError> {
        let failure = |operation: Operation, ids: Vec<NotificationId>, source: anyhow::Error| {
            MarkAllReadError::new(recipient.clone(), ids, operation, source)
        };

        self.ensure_recipient(recipient)
            .map_err(|err| failure(Operation::Update, vec![], err))?;

        let ids = self
            .notifications_repo
            .get_unread_ids(recipient)
            .await
            .map_err(|err| failure(Operation::List, vec![], err))?;

        if ids.is_empty() {
            return Ok(0);
        }

        if let Err(err) = self.notifications_repo.mark_all_read(recipient, &ids).await {
            warn!(
                "Failed to mark notifications {} of {} as read. {}",
                ids.iter().join(", "),
                recipient,
                err
            );
            return Err(failure(Operation::Update, ids, err));
        }

        info!("Marked {} notifications of {} as read.", ids.len(), recipient);
        Ok(ids.len())
    }
}

impl NotificationsService {
    /// Notifications are only ever visible to their recipient.
    fn ensure_recipient(&self, recipient: &UserId) -> Result<()> {
        let session = self.ctx.session()?;
        if &session.user_id != recipient {
            return Err(EngagementError::NotOwner {
                actor: session.user_id,
                owner: recipient.clone(),
            }
            .into());
        }
        Ok(())
    }
}

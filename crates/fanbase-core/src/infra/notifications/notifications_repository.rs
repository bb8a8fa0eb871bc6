// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use fanbase_store::prelude::*;

use crate::domain::notifications::models::{Notification, NotificationDraft, NotificationId};
use crate::domain::notifications::repos::NotificationsRepository as NotificationsRepositoryTrait;
use crate::domain::shared::models::UserId;
use crate::infra::presence::fan_path;

/// Stored below `fans/{recipient}/notifications`. The path is the only link to the recipient.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: NotificationId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

const COLLECTION: &str = "notifications";

mod fields {
    pub const CONTENT: &str = "content";
    pub const LINK: &str = "link";
    pub const READ: &str = "read";
    pub const TIMESTAMP: &str = "timestamp";
}

fn notifications_path(recipient: &UserId) -> Result<CollectionPath, Error> {
    fan_path(recipient)?.collection(COLLECTION)
}

pub struct NotificationsRepository {
    store: Store<PlatformDriver>,
}

impl NotificationsRepository {
    pub fn new(store: Store<PlatformDriver>) -> Self {
        Self { store }
    }

    fn unread_query(recipient: &UserId) -> Result<Query, Error> {
        Ok(Query::new(notifications_path(recipient)?).filter_eq(fields::READ, false))
    }
}

#[async_trait]
impl NotificationsRepositoryTrait for NotificationsRepository {
    async fn create(
        &self,
        recipient: &UserId,
        draft: &NotificationDraft,
    ) -> Result<NotificationId> {
        let update = DocumentUpdate::new()
            .set(fields::CONTENT, draft.content.as_str())
            .set(fields::LINK, draft.link.as_str())
            .set(fields::READ, false)
            .server_timestamp(fields::TIMESTAMP);

        let path = self
            .store
            .add(&notifications_path(recipient)?, update)
            .await?;
        Ok(NotificationId::from(path.id()))
    }

    async fn mark_read(&self, recipient: &UserId, id: &NotificationId) -> Result<()> {
        let path = notifications_path(recipient)?.doc(id)?;
        self.store
            .update(&path, DocumentUpdate::new().set(fields::READ, true))
            .await?;
        Ok(())
    }

    async fn get_unread_ids(&self, recipient: &UserId) -> Result<Vec<NotificationId>> {
        let snapshots = self.store.query(&Self::unread_query(recipient)?).await?;
        Ok(snapshots
            .iter()
            .map(|snapshot| NotificationId::from(snapshot.id()))
            .collect())
    }

    async fn mark_all_read(&self, recipient: &UserId, ids: &[NotificationId]) -> Result<()> {
        let collection = notifications_path(recipient)?;
        let mut batch = WriteBatch::new();
        for id in ids {
            batch.update(
                collection.doc(id)?,
                DocumentUpdate::new().set(fields::READ, true),
            );
        }
        self.store.commit(batch).await?;
        Ok(())
    }

    fn watch(
        &self,
        recipient: &UserId,
        limit: Option<usize>,
    ) -> Result<Subscription<Vec<Notification>>> {
        let mut query = Query::new(notifications_path(recipient)?)
            .order_by(fields::TIMESTAMP, QueryDirection::Descending);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let subscription = self.store.watch_query(&query)?;
        Ok(subscription.map(|snapshots| {
            snapshots
                .iter()
                .filter_map(|snapshot| match snapshot.decode::<NotificationRecord>() {
                    Ok(record) => Some(record.into()),
                    Err(err) => {
                        warn!("Ignoring malformed notification {}. {}", snapshot.path, err);
                        None
                    }
                })
                .collect::<Vec<_>>()
        }))
    }

    fn watch_unread_count(&self, recipient: &UserId) -> Result<Subscription<usize>> {
        let subscription = self.store.watch_query(&Self::unread_query(recipient)?)?;
        Ok(subscription.map(|snapshots| snapshots.len()))
    }
}

impl From<NotificationRecord> for Notification {
    fn from(record: NotificationRecord) -> Self {
        Self {
            id: record.id,
            content: record.content,
            link: record.link,
            read: record.read,
            timestamp: record.timestamp,
        }
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use fanbase_store::prelude::*;

use crate::domain::engagement::models::{LikeSet, ReactionMap};
use crate::domain::shared::models::{ThreadId, UserId};
use crate::domain::threads::models::{InboxScope, Message, NewThread};
use crate::domain::threads::repos::MessagesRepository as MessagesRepositoryTrait;
use crate::infra::engagement::ReplyRecord;

#[document(collection = "messages")]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: ThreadId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub likes: LikeSet,
    #[serde(default)]
    pub reactions: ReactionMap,
    #[serde(default)]
    pub replies: Vec<ReplyRecord>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_replied_at: Option<DateTime<Utc>>,
}

mod fields {
    pub const FAN_ID: &str = "fanId";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const MESSAGE: &str = "message";
    pub const SUBMITTED_AT: &str = "submittedAt";
    pub const READ: &str = "read";
    pub const LIKES: &str = "likes";
    pub const REACTIONS: &str = "reactions";
    pub const REPLIES: &str = "replies";
}

pub fn message_path(id: &ThreadId) -> Result<DocumentPath, Error> {
    CollectionPath::root(MessageRecord::collection())?.doc(id)
}

pub struct MessagesRepository {
    store: Store<PlatformDriver>,
}

impl MessagesRepository {
    pub fn new(store: Store<PlatformDriver>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessagesRepositoryTrait for MessagesRepository {
    async fn create(&self, thread: &NewThread) -> Result<ThreadId> {
        let mut update = DocumentUpdate::new()
            .set(fields::NAME, thread.name.as_str())
            .set(fields::EMAIL, thread.email.as_str())
            .set(fields::MESSAGE, thread.body.as_str())
            .set(fields::READ, false)
            .set(fields::LIKES, Value::Array(vec![]))
            .set(fields::REACTIONS, Value::Object(Map::new()))
            .set(fields::REPLIES, Value::Array(vec![]))
            .server_timestamp(fields::SUBMITTED_AT);

        if let Some(owner) = &thread.owner {
            update = update.set(fields::FAN_ID, owner.as_str());
        }

        let collection = CollectionPath::root(MessageRecord::collection())?;
        let path = self.store.add(&collection, update).await?;
        Ok(ThreadId::from(path.id()))
    }

    async fn get(&self, id: &ThreadId) -> Result<Option<Message>> {
        let record = self
            .store
            .get_document::<MessageRecord>(&message_path(id)?)
            .await?;
        Ok(record.map(Into::into))
    }

    async fn set_body(&self, id: &ThreadId, body: &str) -> Result<()> {
        self.store
            .update(
                &message_path(id)?,
                DocumentUpdate::new().set(fields::MESSAGE, body),
            )
            .await?;
        Ok(())
    }

    async fn set_read(&self, id: &ThreadId, read: bool) -> Result<()> {
        self.store
            .update(&message_path(id)?, DocumentUpdate::new().set(fields::READ, read))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &ThreadId) -> Result<()> {
        self.store.delete(&message_path(id)?).await?;
        Ok(())
    }

    fn watch(&self, id: &ThreadId) -> Result<Subscription<Option<Message>>> {
        let subscription = self.store.watch_document(&message_path(id)?)?;
        Ok(subscription.map(|snapshot| {
            let snapshot = snapshot?;
            match snapshot.decode::<MessageRecord>() {
                Ok(record) => Some(record.into()),
                Err(err) => {
                    warn!("Ignoring malformed message {}. {}", snapshot.path, err);
                    None
                }
            }
        }))
    }

    fn watch_inbox(&self, scope: &InboxScope) -> Result<Subscription<Vec<Message>>> {
        let mut query = Query::new(CollectionPath::root(MessageRecord::collection())?);
        if let InboxScope::Owner(owner) = scope {
            query = query.filter_eq(fields::FAN_ID, owner.as_str());
        }

        let subscription = self.store.watch_query(&query)?;
        Ok(subscription.map(|snapshots| decode_all(&snapshots)))
    }
}

fn decode_all(snapshots: &[DocumentSnapshot]) -> Vec<Message> {
    snapshots
        .iter()
        .filter_map(|snapshot| match snapshot.decode::<MessageRecord>() {
            Ok(record) => Some(record.into()),
            Err(err) => {
                warn!("Ignoring malformed message {}. {}", snapshot.path, err);
                None
            }
        })
        .collect()
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            owner: record.fan_id.filter(|id| !id.as_str().is_empty()),
            name: record.name,
            email: record.email,
            body: record.message,
            submitted_at: record.submitted_at,
            read: record.read,
            likes: record.likes,
            reactions: record.reactions,
            replies: record.replies.into_iter().map(Into::into).collect(),
            last_replied_at: record.last_replied_at,
        }
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use fanbase_store::prelude::*;

use crate::domain::presence::models::FanProfile;
use crate::domain::presence::repos::ProfilesRepository as ProfilesRepositoryTrait;
use crate::domain::shared::models::UserId;

/// The presence related part of a fan's profile. Profiles carry more fields which are managed
/// elsewhere and left untouched.
#[document(collection = "fans")]
#[serde(rename_all = "camelCase")]
pub struct FanRecord {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_active: Option<DateTime<Utc>>,
}

const LAST_ACTIVE: &str = "lastActive";

pub fn fan_path(id: &UserId) -> Result<DocumentPath, Error> {
    CollectionPath::root(FanRecord::collection())?.doc(id)
}

pub struct ProfilesRepository {
    store: Store<PlatformDriver>,
}

impl ProfilesRepository {
    pub fn new(store: Store<PlatformDriver>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfilesRepositoryTrait for ProfilesRepository {
    async fn touch_last_active(&self, user_id: &UserId) -> Result<()> {
        self.store
            .set(
                &fan_path(user_id)?,
                DocumentUpdate::new().server_timestamp(LAST_ACTIVE),
                true,
            )
            .await?;
        debug!("Updated last activity of {}.", user_id);
        Ok(())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<FanProfile>> {
        let record = self
            .store
            .get_document::<FanRecord>(&fan_path(user_id)?)
            .await?;
        Ok(record.map(Into::into))
    }

    fn watch(&self, user_id: &UserId) -> Result<Subscription<Option<FanProfile>>> {
        let subscription = self.store.watch_document(&fan_path(user_id)?)?;
        Ok(subscription.map(|snapshot| decode(&snapshot?)))
    }

    fn watch_all(&self) -> Result<Subscription<Vec<FanProfile>>> {
        let query = Query::new(CollectionPath::root(FanRecord::collection())?);
        let subscription = self.store.watch_query(&query)?;
        Ok(subscription.map(|snapshots| {
            snapshots.iter().filter_map(decode).collect::<Vec<_>>()
        }))
    }
}

fn decode(snapshot: &DocumentSnapshot) -> Option<FanProfile> {
    match snapshot.decode::<FanRecord>() {
        Ok(record) => Some(record.into()),
        Err(err) => {
            warn!("Ignoring malformed profile {}. {}", snapshot.path, err);
            None
        }
    }
}

impl From<FanRecord> for FanProfile {
    fn from(record: FanRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name,
            last_active: record.last_active,
        }
    }
}

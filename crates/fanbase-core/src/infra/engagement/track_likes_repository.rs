// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fanbase_store::prelude::*;

use crate::domain::engagement::models::LikeSet;
use crate::domain::engagement::repos::TrackLikesRepository as TrackLikesRepositoryTrait;
use crate::domain::shared::models::{TrackId, UserId};

/// Stored below `music/{track}/likes`, keyed by the liking fan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackLikeRecord {
    pub fan_id: UserId,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub like_date: Option<DateTime<Utc>>,
    pub music_id: TrackId,
}

const TRACKS: &str = "music";
const LIKES: &str = "likes";

mod fields {
    pub const FAN_ID: &str = "fanId";
    pub const LIKE_DATE: &str = "likeDate";
    pub const MUSIC_ID: &str = "musicId";
}

fn likes_path(track: &TrackId) -> Result<CollectionPath, Error> {
    CollectionPath::root(TRACKS)?.doc(track)?.collection(LIKES)
}

pub fn track_like_path(track: &TrackId, user_id: &UserId) -> Result<DocumentPath, Error> {
    likes_path(track)?.doc(user_id)
}

pub struct TrackLikesRepository {
    store: Store<PlatformDriver>,
}

impl TrackLikesRepository {
    pub fn new(store: Store<PlatformDriver>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TrackLikesRepositoryTrait for TrackLikesRepository {
    async fn get(&self, track: &TrackId) -> Result<LikeSet> {
        let snapshots = self.store.query(&Query::new(likes_path(track)?)).await?;
        Ok(collect_likers(&snapshots))
    }

    async fn add(&self, track: &TrackId, user_id: &UserId) -> Result<()> {
        let update = DocumentUpdate::new()
            .set(fields::FAN_ID, user_id.as_str())
            .set(fields::MUSIC_ID, track.as_str())
            .server_timestamp(fields::LIKE_DATE);
        self.store
            .set(&track_like_path(track, user_id)?, update, false)
            .await?;
        debug!("{} liked track {}.", user_id, track);
        Ok(())
    }

    async fn remove(&self, track: &TrackId, user_id: &UserId) -> Result<()> {
        self.store.delete(&track_like_path(track, user_id)?).await?;
        debug!("{} unliked track {}.", user_id, track);
        Ok(())
    }

    fn watch(&self, track: &TrackId) -> Result<Subscription<LikeSet>> {
        let subscription = self.store.watch_query(&Query::new(likes_path(track)?))?;
        Ok(subscription.map(|snapshots| collect_likers(&snapshots)))
    }
}

fn collect_likers(snapshots: &[DocumentSnapshot]) -> LikeSet {
    let mut likers = LikeSet::new();
    for snapshot in snapshots {
        match snapshot.decode::<TrackLikeRecord>() {
            Ok(record) => {
                likers.insert(record.fan_id);
            }
            Err(err) => warn!("Ignoring malformed track like {}. {}", snapshot.path, err),
        }
    }
    likers
}

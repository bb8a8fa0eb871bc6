// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use fanbase_store::Subscription;

use crate::domain::engagement::models::LikeSet;
use crate::domain::shared::models::{TrackId, UserId};

/// Likes of tracks. Each like is a document of its own so that a track can be liked by any
/// number of fans.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait TrackLikesRepository: Send + Sync {
    /// The fans who like `track`.
    async fn get(&self, track: &TrackId) -> Result<LikeSet>;

    /// Does nothing if `user_id` already likes `track`.
    async fn add(&self, track: &TrackId, user_id: &UserId) -> Result<()>;

    async fn remove(&self, track: &TrackId, user_id: &UserId) -> Result<()>;

    fn watch(&self, track: &TrackId) -> Result<Subscription<LikeSet>>;
}

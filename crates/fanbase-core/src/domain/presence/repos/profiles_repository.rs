// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use fanbase_store::Subscription;

use crate::domain::presence::models::FanProfile;
use crate::domain::shared::models::UserId;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ProfilesRepository: Send + Sync {
    /// Records that `user_id` is active right now, using the store's clock.
    async fn touch_last_active(&self, user_id: &UserId) -> Result<()>;

    async fn get(&self, user_id: &UserId) -> Result<Option<FanProfile>>;

    fn watch(&self, user_id: &UserId) -> Result<Subscription<Option<FanProfile>>>;

    fn watch_all(&self) -> Result<Subscription<Vec<FanProfile>>>;
}

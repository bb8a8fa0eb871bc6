// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;

use fanbase_proc_macros::InjectDependencies;
use fanbase_store::Subscription;

use crate::app::deps::{DynAppContext, DynProfilesRepository, DynTimeProvider};
use crate::domain::presence::models::{FanProfile, Presence};
use crate::domain::shared::models::UserId;

#[derive(InjectDependencies)]
pub struct PresenceService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    profiles_repo: DynProfilesRepository,
    #[inject]
    time_provider: DynTimeProvider,
}

impl PresenceService {
    /// Delivers the presence of `user_id` whenever their profile changes. Users without a
    /// profile are reported as offline and never seen.
    pub fn subscribe_presence(&self, user_id: &UserId) -> Result<Subscription<Presence>> {
        let time_provider = self.time_provider.clone();
        let window = self.ctx.config.presence_window;

        Ok(self.profiles_repo.watch(user_id)?.map(move |profile| {
            Presence::from_last_active(
                profile.and_then(|profile| profile.last_active),
                time_provider.now(),
                window,
            )
        }))
    }

    pub fn presence_of(&self, profile: &FanProfile) -> Presence {
        Presence::from_last_active(
            profile.last_active,
            self.time_provider.now(),
            self.ctx.config.presence_window,
        )
    }

    /// "Online", "Last seen 3 minutes ago" or "never".
    pub fn describe(&self, presence: &Presence) -> String {
        presence.describe(self.time_provider.now())
    }
}

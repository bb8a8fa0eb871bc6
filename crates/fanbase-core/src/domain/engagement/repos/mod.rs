// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use engagement_repository::EngagementRepository;
pub use track_likes_repository::TrackLikesRepository;

mod engagement_repository;
mod track_likes_repository;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::engagement_repository::MockEngagementRepository;
    pub use super::track_likes_repository::MockTrackLikesRepository;
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use engagement_repository::{entity_path, EngagementRepository};
pub use reply_record::ReplyRecord;
pub use track_likes_repository::{track_like_path, TrackLikeRecord, TrackLikesRepository};

mod engagement_repository;
mod reply_record;
mod track_likes_repository;

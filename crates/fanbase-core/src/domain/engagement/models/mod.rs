// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use engagement_state::EngagementState;
pub use like_set::LikeSet;
pub use pending_engagement::{PendingEngagement, ReadTicket};
pub use reaction_map::{Emoji, ReactionMap};
pub use reply::{Reply, ReplyId, SenderRole};
pub use track_likes::TrackLikes;

mod engagement_state;
mod like_set;
mod pending_engagement;
mod reaction_map;
mod reply;
mod track_likes;

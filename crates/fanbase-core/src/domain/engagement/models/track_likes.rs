// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::engagement::models::LikeSet;
use crate::domain::shared::models::UserId;

/// The likes of a track as seen by one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackLikes {
    pub count: usize,
    pub is_liked: bool,
}

impl TrackLikes {
    pub fn new(likers: &LikeSet, user_id: &UserId) -> Self {
        Self {
            count: likers.len(),
            is_liked: likers.contains(user_id),
        }
    }
}

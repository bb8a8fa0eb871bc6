// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::general::models::{FailureKind, MutationKind};
use crate::domain::notifications::models::NotificationId;
use crate::domain::shared::models::{EntityRef, TrackId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A session was started or ended.
    SessionChanged { user_id: Option<UserId> },

    /// A background write failed. Optimistic state belonging to the write has been discarded.
    MutationFailed {
        entity: EntityRef,
        mutation: MutationKind,
        kind: FailureKind,
    },

    /// Liking or unliking a track failed. The liked flag of the track has been restored.
    TrackMutationFailed {
        track: TrackId,
        mutation: MutationKind,
        kind: FailureKind,
    },

    /// A notification could not be marked as read and is still unread.
    NotificationMutationFailed {
        notification: NotificationId,
        mutation: MutationKind,
        kind: FailureKind,
    },

    /// The last activity of the signed-in user could not be recorded.
    PresenceUpdateFailed { user_id: UserId, kind: FailureKind },
}

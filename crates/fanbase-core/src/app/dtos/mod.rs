// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use thread::{Thread, ThreadSummary};

pub use crate::domain::{
    comments::models::{Comment, NewComment},
    engagement::models::{Emoji, LikeSet, ReactionMap, Reply, ReplyId, SenderRole, TrackLikes},
    general::models::{FailureKind, MutationKind, Optimistic, WriteOutcome},
    notifications::models::{MarkAllReadError, Notification, NotificationId},
    presence::models::{format_distance_to_now, FanProfile, Presence},
    shared::models::{
        ClientCommentId, CommentId, EngagementError, EntityRef, ServerCommentId, SessionContext,
        ThreadId, TrackId, UserId,
    },
    threads::models::{InboxScope, Message, NewThread},
};

mod thread;

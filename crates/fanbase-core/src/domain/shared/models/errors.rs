// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{EntityRef, UserId};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EngagementError {
    #[error("Replies must not be empty.")]
    EmptyReply,

    #[error("Messages must not be empty.")]
    EmptyMessage,

    #[error("Comments must not be empty.")]
    EmptyComment,

    #[error("The {0} has not been confirmed by the store yet.")]
    ProvisionalEntity(EntityRef),

    #[error("The {0} does not exist.")]
    EntityNotFound(EntityRef),

    #[error("There is no active session.")]
    NoActiveSession,

    #[error("{actor} is not allowed to act on behalf of {owner}.")]
    NotOwner { actor: UserId, owner: UserId },

    #[error("Only operators can perform this action.")]
    OperatorRequired,
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::Display;

use crate::domain::shared::models::EngagementError;

/// The mutation a background write was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MutationKind {
    Like,
    Unlike,
    React,
    Unreact,
    Reply,
    DeleteReply,
    PostComment,
    DeleteComment,
    DeleteMessageBody,
    MarkThreadRead,
    MarkNotificationRead,
}

/// Coarse classification of why a write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    PermissionDenied,
    NotFound,
    InvalidReference,
    Unavailable,
    Other,
}

impl FailureKind {
    pub fn classify(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(error) = cause.downcast_ref::<fanbase_store::Error>() {
                return match error {
                    fanbase_store::Error::PermissionDenied { .. } => FailureKind::PermissionDenied,
                    fanbase_store::Error::NotFound { .. } => FailureKind::NotFound,
                    fanbase_store::Error::InvalidReference { .. } => FailureKind::InvalidReference,
                    fanbase_store::Error::Unavailable { .. } => FailureKind::Unavailable,
                    fanbase_store::Error::AlreadyExists { .. }
                    | fanbase_store::Error::Serialization(_) => FailureKind::Other,
                };
            }
            if let Some(error) = cause.downcast_ref::<EngagementError>() {
                return match error {
                    EngagementError::ProvisionalEntity(_) => FailureKind::InvalidReference,
                    EngagementError::EntityNotFound(_) => FailureKind::NotFound,
                    EngagementError::NoActiveSession
                    | EngagementError::NotOwner { .. }
                    | EngagementError::OperatorRequired => FailureKind::PermissionDenied,
                    EngagementError::EmptyReply
                    | EngagementError::EmptyMessage
                    | EngagementError::EmptyComment => FailureKind::Other,
                };
            }
        }
        FailureKind::Other
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use fanbase_utils::id_string;

id_string!(ThreadId);
id_string!(TrackId);
id_string!(ServerCommentId);
id_string!(ClientCommentId);

/// Identifies a comment either by the identifier chosen locally while it is being posted or by
/// the identifier assigned by the store once it has been written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentId {
    Provisional(ClientCommentId),
    Confirmed(ServerCommentId),
}

/// A likable, reactable and reply-able entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Message(ThreadId),
    Comment { track: TrackId, comment: CommentId },
}

impl CommentId {
    pub fn is_provisional(&self) -> bool {
        matches!(self, CommentId::Provisional(_))
    }

    pub fn confirmed(&self) -> Option<&ServerCommentId> {
        match self {
            CommentId::Provisional(_) => None,
            CommentId::Confirmed(id) => Some(id),
        }
    }
}

impl EntityRef {
    pub fn comment(track: impl Into<TrackId>, comment: impl Into<ServerCommentId>) -> Self {
        EntityRef::Comment {
            track: track.into(),
            comment: CommentId::Confirmed(comment.into()),
        }
    }

    pub fn is_provisional(&self) -> bool {
        match self {
            EntityRef::Message(_) => false,
            EntityRef::Comment { comment, .. } => comment.is_provisional(),
        }
    }
}

impl From<ThreadId> for EntityRef {
    fn from(value: ThreadId) -> Self {
        EntityRef::Message(value)
    }
}

impl From<ServerCommentId> for CommentId {
    fn from(value: ServerCommentId) -> Self {
        CommentId::Confirmed(value)
    }
}

impl From<ClientCommentId> for CommentId {
    fn from(value: ClientCommentId) -> Self {
        CommentId::Provisional(value)
    }
}

impl Display for CommentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentId::Provisional(id) => write!(f, "provisional:{}", id),
            CommentId::Confirmed(id) => write!(f, "{}", id),
        }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Message(id) => write!(f, "message {}", id),
            EntityRef::Comment { track, comment } => {
                write!(f, "comment {} on track {}", comment, track)
            }
        }
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use entity_ref::{ClientCommentId, CommentId, EntityRef, ServerCommentId, ThreadId, TrackId};
pub use errors::EngagementError;
pub use session::SessionContext;
pub use user_id::UserId;

mod entity_ref;
mod errors;
mod session;
mod user_id;

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use comment::{Comment, NewComment};
pub use comment_overlay::CommentOverlay;

mod comment;
mod comment_overlay;

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use fanbase_store::Subscription;

use crate::domain::comments::models::{Comment, NewComment};
use crate::domain::shared::models::{ServerCommentId, TrackId};

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait CommentsRepository: Send + Sync {
    /// Writes `comment` and remembers its client reference so that watchers can correlate it
    /// with the provisional copy.
    async fn create(&self, track: &TrackId, comment: &NewComment) -> Result<ServerCommentId>;

    async fn delete(&self, track: &TrackId, id: &ServerCommentId) -> Result<()>;

    /// Delivers the comments of `track`, newest first.
    fn watch(&self, track: &TrackId) -> Result<Subscription<Vec<Comment>>>;
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use fanbase_store::Subscription;

use crate::domain::shared::models::ThreadId;
use crate::domain::threads::models::{InboxScope, Message, NewThread};

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait MessagesRepository: Send + Sync {
    /// Creates a message with empty likes, reactions and replies. The submission time is
    /// assigned by the store.
    async fn create(&self, thread: &NewThread) -> Result<ThreadId>;

    async fn get(&self, id: &ThreadId) -> Result<Option<Message>>;

    /// Overwrites the body only. Likes, reactions and replies stay untouched.
    async fn set_body(&self, id: &ThreadId, body: &str) -> Result<()>;

    async fn set_read(&self, id: &ThreadId, read: bool) -> Result<()>;

    async fn delete(&self, id: &ThreadId) -> Result<()>;

    fn watch(&self, id: &ThreadId) -> Result<Subscription<Option<Message>>>;

    /// Delivers the messages in `scope` in no particular order.
    fn watch_inbox(&self, scope: &InboxScope) -> Result<Subscription<Vec<Message>>>;
}

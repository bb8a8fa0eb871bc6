// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::domain::general::models::{FailureKind, WriteOutcome};

pub type PendingWrite = BoxFuture<'static, Result<(), FailureKind>>;

/// Runs durable writes of a client one after the other, in the order they were enqueued.
#[async_trait]
pub trait WriteQueue: Send + Sync {
    fn enqueue(&self, write: PendingWrite) -> WriteOutcome;

    /// Resolves once every write enqueued before the call has completed.
    async fn flush(&self);
}

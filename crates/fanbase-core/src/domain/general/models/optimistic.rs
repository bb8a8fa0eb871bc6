// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use tokio::sync::oneshot;

use crate::domain::general::models::FailureKind;

/// Resolves once a queued write has been applied by the store.
#[derive(Debug)]
pub struct WriteOutcome {
    receiver: oneshot::Receiver<Result<(), FailureKind>>,
}

impl WriteOutcome {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<(), FailureKind>>) -> Self {
        Self { receiver }
    }

    /// An outcome for writes that are known to have failed.
    pub fn failed(kind: FailureKind) -> Self {
        let (sender, receiver) = oneshot::channel();
        _ = sender.send(Err(kind));
        Self::new(receiver)
    }

    pub async fn wait(self) -> Result<(), FailureKind> {
        // A dropped sender means the queue went away before running the write.
        self.receiver.await.unwrap_or(Err(FailureKind::Unavailable))
    }
}

/// A locally computed value together with the outcome of the write that makes it durable.
#[derive(Debug)]
pub struct Optimistic<T> {
    pub value: T,
    pub outcome: WriteOutcome,
}

impl<T> Optimistic<T> {
    pub fn new(value: T, outcome: WriteOutcome) -> Self {
        Self { value, outcome }
    }
}

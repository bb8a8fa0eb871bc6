// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::OnceLock;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::domain::general::models::{FailureKind, WriteOutcome};
use crate::domain::general::services::{PendingWrite, WriteQueue};

enum Job {
    Write(PendingWrite, oneshot::Sender<Result<(), FailureKind>>),
    Flush(oneshot::Sender<()>),
}

/// Runs the writes of a client one after another in the order they were enqueued.
///
/// The worker is spawned on the current tokio runtime on first use and ends once the queue is
/// dropped.
#[derive(Default)]
pub struct SerialWriteQueue {
    jobs: OnceLock<mpsc::UnboundedSender<Job>>,
}

impl SerialWriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn jobs(&self) -> &mpsc::UnboundedSender<Job> {
        self.jobs.get_or_init(|| {
            let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
            tokio::spawn(async move {
                while let Some(job) = receiver.recv().await {
                    match job {
                        Job::Write(write, completion) => {
                            _ = completion.send(write.await);
                        }
                        Job::Flush(completion) => {
                            _ = completion.send(());
                        }
                    }
                }
                debug!("Write queue closed.");
            });
            sender
        })
    }
}

#[async_trait]
impl WriteQueue for SerialWriteQueue {
    fn enqueue(&self, write: PendingWrite) -> WriteOutcome {
        let (completion, outcome) = oneshot::channel();
        if self.jobs().send(Job::Write(write, completion)).is_err() {
            return WriteOutcome::failed(FailureKind::Unavailable);
        }
        WriteOutcome::new(outcome)
    }

    async fn flush(&self) {
        let (completion, flushed) = oneshot::channel();
        if self.jobs().send(Job::Flush(completion)).is_ok() {
            _ = flushed.await;
        }
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::future::Future;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use fanbase_store::Subscription;

/// Runs `producer` on a background task and delivers everything it sends. Cancelling the
/// returned subscription aborts the task and with it every subscription the task owns.
pub(crate) fn spawn_subscription<T, F, Fut>(producer: F) -> Subscription<T>
where
    T: Send + 'static,
    F: FnOnce(mpsc::UnboundedSender<T>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let task = tokio::spawn(producer(sender));
    Subscription::new(UnboundedReceiverStream::new(receiver), move || task.abort())
}

/// Emits `combine` of the latest values of both subscriptions once each delivered at least one
/// value, and again whenever either of them changes. Ends when either subscription ends.
pub(crate) fn combine_latest<A, B, T, F>(
    mut lhs: Subscription<A>,
    mut rhs: Subscription<B>,
    mut combine: F,
) -> Subscription<T>
where
    A: Send + 'static,
    B: Send + 'static,
    T: Send + 'static,
    F: FnMut(&A, &B) -> T + Send + 'static,
{
    spawn_subscription(move |sender| async move {
        let mut latest_lhs = None;
        let mut latest_rhs = None;

        loop {
            tokio::select! {
                value = lhs.next() => match value {
                    Some(value) => latest_lhs = Some(value),
                    None => break,
                },
                value = rhs.next() => match value {
                    Some(value) => latest_rhs = Some(value),
                    None => break,
                },
            }

            let (Some(lhs_value), Some(rhs_value)) = (&latest_lhs, &latest_rhs) else {
                continue;
            };
            if sender.send(combine(lhs_value, rhs_value)).is_err() {
                break;
            }
        }
    })
}

// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};

type CancelHandler = Box<dyn FnOnce() + Send>;

/// A live stream of values. Dropping or cancelling the subscription releases the underlying
/// listener; no further values are delivered afterwards.
pub struct Subscription<T> {
    stream: Pin<Box<dyn Stream<Item = T> + Send>>,
    guard: CancelGuard,
}

struct CancelGuard(Option<CancelHandler>);

impl<T> Subscription<T> {
    pub fn new(
        stream: impl Stream<Item = T> + Send + 'static,
        on_cancel: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            stream: Box::pin(stream),
            guard: CancelGuard(Some(Box::new(on_cancel))),
        }
    }

    /// A subscription without any listener to release.
    pub fn from_stream(stream: impl Stream<Item = T> + Send + 'static) -> Self {
        Self {
            stream: Box::pin(stream),
            guard: CancelGuard(None),
        }
    }

    /// Transforms every delivered value. The returned subscription owns the listener.
    pub fn map<U, F>(self, f: F) -> Subscription<U>
    where
        T: 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        Subscription {
            stream: Box::pin(self.stream.map(f)),
            guard: self.guard,
        }
    }

    pub fn cancel(self) {
        drop(self)
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().stream.as_mut().poll_next(cx)
    }
}

impl<T> Debug for Subscription<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.guard.0.is_some())
            .finish()
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if let Some(handler) = self.0.take() {
            handler()
        }
    }
}

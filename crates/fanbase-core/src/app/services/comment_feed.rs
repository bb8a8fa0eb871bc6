// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use anyhow::Result;
use futures::{FutureExt, Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

use fanbase_store::Subscription;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynCommentsRepository, DynEngagementDomainService,
    DynIDProvider, DynTimeProvider, DynWriteQueue,
};
use crate::domain::comments::models::{Comment, CommentOverlay, NewComment};
use crate::domain::engagement::models::{Emoji, LikeSet, ReactionMap, Reply, SenderRole};
use crate::domain::general::models::{FailureKind, MutationKind, Optimistic, WriteOutcome};
use crate::domain::shared::models::{
    ClientCommentId, CommentId, EngagementError, EntityRef, ServerCommentId, TrackId,
};
use crate::ClientEvent;

/// The comments of a track, merged from the store and the comments this client posted but the
/// store has not confirmed yet.
///
/// Every change is delivered as the complete list through the `Stream` implementation,
/// provisional comments first (newest first), then the confirmed ones newest first.
pub struct CommentFeed {
    inner: Arc<CommentFeedInner>,
    updates: UnboundedReceiverStream<Vec<Comment>>,
    reconciliation: JoinHandle<()>,
}

pub(crate) struct CommentFeedInner {
    pub track: TrackId,
    pub overlay: Mutex<CommentOverlay>,
    /// Server ids of the comments posted through this feed which the store has not delivered
    /// yet.
    pub posted: Mutex<HashMap<ClientCommentId, ServerCommentId>>,
    pub updates: mpsc::UnboundedSender<Vec<Comment>>,

    pub client_event_dispatcher: DynClientEventDispatcher,
    pub comments_repo: DynCommentsRepository,
    pub ctx: DynAppContext,
    pub engagement_domain_service: DynEngagementDomainService,
    pub short_id_provider: DynIDProvider,
    pub time_provider: DynTimeProvider,
    pub write_queue: DynWriteQueue,
}

impl CommentFeed {
    pub(crate) fn new(
        inner: CommentFeedInner,
        updates: mpsc::UnboundedReceiver<Vec<Comment>>,
        mut remote: Subscription<Vec<Comment>>,
    ) -> Self {
        let inner = Arc::new(inner);

        let reconciliation = tokio::spawn({
            let inner = inner.clone();
            async move {
                while let Some(comments) = remote.next().await {
                    inner.reconcile(comments);
                }
                debug!("Comment feed of track {} ended.", inner.track);
            }
        });

        Self {
            inner,
            updates: UnboundedReceiverStream::new(updates),
            reconciliation,
        }
    }

    pub fn track(&self) -> &TrackId {
        &self.inner.track
    }

    /// The current merged list.
    pub fn comments(&self) -> Vec<Comment> {
        self.inner.overlay.lock().merged()
    }

    /// Shows the comment immediately and writes it in the background. The returned comment
    /// carries a provisional id until the store confirms it.
    pub fn post(&self, content: &str) -> Result<Optimistic<Comment>> {
        let content = content.trim();
        if content.is_empty() {
            return Err(EngagementError::EmptyComment.into());
        }

        let inner = &self.inner;
        let session = inner.ctx.session()?;
        let author_name = session
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| match session.role() {
                SenderRole::Operator => inner.ctx.config.default_operator_name.clone(),
                SenderRole::Subject => inner.ctx.config.default_subject_name.clone(),
            });

        let new_comment = NewComment {
            client_ref: ClientCommentId::from(inner.short_id_provider.new_id()),
            author: session.user_id.clone(),
            author_name,
            author_photo_url: session.photo_url.clone(),
            content: content.to_string(),
        };
        let comment = Comment::provisional(
            inner.track.clone(),
            &new_comment,
            inner.time_provider.now(),
        );
        inner.update(|overlay| overlay.stage(comment.clone()));

        let job_inner = inner.clone();
        let outcome = inner.write_queue.enqueue(
            async move {
                let inner = job_inner;
                let client_ref = new_comment.client_ref.clone();

                match inner.comments_repo.create(&inner.track, &new_comment).await {
                    Ok(id) => {
                        info!("Posted comment {} on track {}.", id, inner.track);
                        let overlay = inner.overlay.lock();
                        if overlay.confirmed_id(&client_ref).is_none() {
                            inner.posted.lock().insert(client_ref, id);
                        }
                        Ok(())
                    }
                    Err(err) => {
                        inner.update(|overlay| {
                            overlay.discard(&client_ref);
                        });
                        Err(inner.report_failure(
                            CommentId::Provisional(client_ref),
                            MutationKind::PostComment,
                            err,
                        ))
                    }
                }
            }
            .boxed(),
        );

        Ok(Optimistic::new(comment, outcome))
    }

    /// Removes the comment from the feed immediately and deletes it in the background. Only the
    /// author or an operator may delete a comment.
    pub fn delete(&self, id: &CommentId) -> Result<WriteOutcome> {
        let inner = &self.inner;
        let session = inner.ctx.session()?;

        if let Some(comment) = inner.overlay.lock().get(id) {
            if comment.author != session.user_id && !session.is_admin {
                return Err(EngagementError::NotOwner {
                    actor: session.user_id,
                    owner: comment.author.clone(),
                }
                .into());
            }
        }

        match id {
            CommentId::Provisional(client_ref) => {
                inner.update(|overlay| {
                    overlay.discard(client_ref);
                });

                // The post may still be queued. Once it ran the comment has a server id.
                let job_inner = inner.clone();
                let client_ref = client_ref.clone();
                Ok(inner.write_queue.enqueue(
                    async move {
                        let inner = job_inner;
                        let Some(server_id) = inner.posted_id(&client_ref) else {
                            return Ok(());
                        };
                        inner.update(|overlay| overlay.hide(&server_id));

                        match inner.comments_repo.delete(&inner.track, &server_id).await {
                            Ok(()) => Ok(()),
                            Err(err) => {
                                inner.update(|overlay| overlay.revert(&server_id));
                                Err(inner.report_failure(
                                    CommentId::Confirmed(server_id),
                                    MutationKind::DeleteComment,
                                    err,
                                ))
                            }
                        }
                    }
                    .boxed(),
                ))
            }
            CommentId::Confirmed(server_id) => {
                inner.update(|overlay| overlay.hide(server_id));

                let job_inner = inner.clone();
                let server_id = server_id.clone();
                Ok(inner.write_queue.enqueue(
                    async move {
                        let inner = job_inner;
                        match inner.comments_repo.delete(&inner.track, &server_id).await {
                            Ok(()) => {
                                info!("Deleted comment {} on track {}.", server_id, inner.track);
                                Ok(())
                            }
                            Err(err) => {
                                inner.update(|overlay| overlay.revert(&server_id));
                                Err(inner.report_failure(
                                    CommentId::Confirmed(server_id),
                                    MutationKind::DeleteComment,
                                    err,
                                ))
                            }
                        }
                    }
                    .boxed(),
                ))
            }
        }
    }

    pub async fn toggle_like(&self, id: &CommentId) -> Result<Optimistic<LikeSet>> {
        let session = self.inner.ctx.session()?;
        let result = self
            .inner
            .engagement_domain_service
            .toggle_like(&session, &self.entity_ref(id))
            .await?;

        let likes = result.value.clone();
        self.inner.update(|overlay| {
            overlay.patch(id, |comment| comment.likes = likes);
        });
        Ok(self.observe(id, result))
    }

    pub async fn toggle_reaction(
        &self,
        id: &CommentId,
        emoji: &Emoji,
    ) -> Result<Optimistic<ReactionMap>> {
        let session = self.inner.ctx.session()?;
        let result = self
            .inner
            .engagement_domain_service
            .toggle_reaction(&session, &self.entity_ref(id), emoji)
            .await?;

        let reactions = result.value.clone();
        self.inner.update(|overlay| {
            overlay.patch(id, |comment| comment.reactions = reactions);
        });
        Ok(self.observe(id, result))
    }

    pub async fn reply(&self, id: &CommentId, text: &str) -> Result<Optimistic<Reply>> {
        let session = self.inner.ctx.session()?;
        let result = self
            .inner
            .engagement_domain_service
            .append_reply(&session, &self.entity_ref(id), text)
            .await?;

        let reply = result.value.clone();
        self.inner.update(|overlay| {
            overlay.patch(id, |comment| comment.replies.push(reply));
        });
        Ok(self.observe(id, result))
    }
}

impl CommentFeed {
    fn entity_ref(&self, id: &CommentId) -> EntityRef {
        EntityRef::Comment {
            track: self.inner.track.clone(),
            comment: id.clone(),
        }
    }

    /// Drops the local edit of the comment if the write behind `optimistic` fails.
    fn observe<T>(&self, id: &CommentId, optimistic: Optimistic<T>) -> Optimistic<T> {
        let Some(server_id) = id.confirmed().cloned() else {
            return optimistic;
        };

        let (sender, receiver) = oneshot::channel();
        let inner = self.inner.clone();
        let outcome = optimistic.outcome;

        tokio::spawn(async move {
            let result = outcome.wait().await;
            if result.is_err() {
                inner.update(|overlay| overlay.revert(&server_id));
            }
            _ = sender.send(result);
        });

        Optimistic::new(optimistic.value, WriteOutcome::new(receiver))
    }
}

impl CommentFeedInner {
    /// Merges a delivery of the store and forgets posted comments it contains.
    fn reconcile(&self, comments: Vec<Comment>) {
        let mut overlay = self.overlay.lock();
        overlay.reconcile(comments);
        self.posted
            .lock()
            .retain(|client_ref, _| overlay.confirmed_id(client_ref).is_none());
        _ = self.updates.send(overlay.merged());
    }

    /// The server id of a comment posted through this feed.
    fn posted_id(&self, client_ref: &ClientCommentId) -> Option<ServerCommentId> {
        if let Some(id) = self.posted.lock().remove(client_ref) {
            return Some(id);
        }
        self.overlay.lock().confirmed_id(client_ref).cloned()
    }

    /// Applies `change` to the overlay and publishes the merged list.
    fn update(&self, change: impl FnOnce(&mut CommentOverlay)) {
        let mut overlay = self.overlay.lock();
        change(&mut overlay);
        _ = self.updates.send(overlay.merged());
    }

    fn report_failure(
        &self,
        comment: CommentId,
        mutation: MutationKind,
        err: anyhow::Error,
    ) -> FailureKind {
        let kind = FailureKind::classify(&err);
        let entity = EntityRef::Comment {
            track: self.track.clone(),
            comment,
        };
        warn!("Failed to {} {}. {}", mutation, entity, err);
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MutationFailed {
                entity,
                mutation,
                kind,
            });
        kind
    }
}

impl Stream for CommentFeed {
    type Item = Vec<Comment>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().updates.poll_next_unpin(cx)
    }
}

impl Drop for CommentFeed {
    fn drop(&mut self) {
        debug!("Closing comment feed of track {}.", self.inner.track);
        self.reconciliation.abort();
    }
}

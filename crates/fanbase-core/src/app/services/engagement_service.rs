// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use futures::FutureExt;
use tracing::warn;

use fanbase_proc_macros::InjectDependencies;
use fanbase_store::Subscription;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynEngagementDomainService, DynPendingTrackLikes,
    DynTrackLikesRepository, DynWriteQueue,
};
use crate::domain::engagement::models::{
    Emoji, LikeSet, ReactionMap, Reply, ReplyId, TrackLikes,
};
use crate::domain::general::models::{FailureKind, MutationKind, Optimistic, WriteOutcome};
use crate::domain::shared::models::{EntityRef, TrackId};
use crate::ClientEvent;

/// Likes, reactions and replies on messages and comments, and likes of tracks, on behalf of the
/// signed-in user.
///
/// Every mutation returns the new local state right away. The durable write happens in the
/// background; its result can be awaited through the returned `WriteOutcome` but doesn't have
/// to be. Failed writes are reported to the `ClientDelegate`.
#[derive(InjectDependencies)]
pub struct EngagementService {
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    engagement_domain_service: DynEngagementDomainService,
    #[inject]
    pending_track_likes: DynPendingTrackLikes,
    #[inject]
    track_likes_repo: DynTrackLikesRepository,
    #[inject]
    write_queue: DynWriteQueue,
}

impl EngagementService {
    pub async fn toggle_like(&self, entity: &EntityRef) -> Result<Optimistic<LikeSet>> {
        let session = self.ctx.session()?;
        self.engagement_domain_service
            .toggle_like(&session, entity)
            .await
    }

    pub async fn toggle_reaction(
        &self,
        entity: &EntityRef,
        emoji: &Emoji,
    ) -> Result<Optimistic<ReactionMap>> {
        let session = self.ctx.session()?;
        self.engagement_domain_service
            .toggle_reaction(&session, entity, emoji)
            .await
    }

    pub async fn append_reply(&self, entity: &EntityRef, text: &str) -> Result<Optimistic<Reply>> {
        let session = self.ctx.session()?;
        self.engagement_domain_service
            .append_reply(&session, entity, text)
            .await
    }

    /// Removes a reply for moderation purposes. Only available to operators.
    pub async fn delete_reply(&self, entity: &EntityRef, reply_id: &ReplyId) -> Result<WriteOutcome> {
        self.ctx.operator_session()?;
        self.engagement_domain_service
            .delete_reply(entity, reply_id)
            .await
    }

    /// Likes `track` or withdraws the like of the signed-in user. Toggling twice in a row
    /// restores the previous state even if the first write has not landed yet.
    pub async fn toggle_track_like(&self, track: &TrackId) -> Result<Optimistic<TrackLikes>> {
        let session = self.ctx.session()?;

        let ticket = self.pending_track_likes.lock().begin_read(track);
        let stored = match self.track_likes_repo.get(track).await {
            Ok(likers) => likers,
            Err(err) => {
                self.pending_track_likes.lock().cancel_read(track);
                return Err(err);
            }
        };
        let (likers, is_liked) = self.pending_track_likes.lock().toggle_like(
            track,
            ticket,
            &stored,
            &session.user_id,
        );

        let mutation = if is_liked {
            MutationKind::Like
        } else {
            MutationKind::Unlike
        };

        let client_event_dispatcher = self.client_event_dispatcher.clone();
        let pending_track_likes = self.pending_track_likes.clone();
        let repo = self.track_likes_repo.clone();
        let user_id = session.user_id.clone();
        let track_id = track.clone();

        let outcome = self.write_queue.enqueue(
            async move {
                let result = if is_liked {
                    repo.add(&track_id, &user_id).await
                } else {
                    repo.remove(&track_id, &user_id).await
                };
                pending_track_likes
                    .lock()
                    .complete(&track_id, result.is_ok());

                let Err(err) = result else {
                    return Ok(());
                };
                let kind = FailureKind::classify(&err);
                warn!("Failed to {} track {}. {}", mutation, track_id, err);
                client_event_dispatcher.dispatch_event(ClientEvent::TrackMutationFailed {
                    track: track_id,
                    mutation,
                    kind,
                });
                Err(kind)
            }
            .boxed(),
        );

        Ok(Optimistic::new(
            TrackLikes::new(&likers, &session.user_id),
            outcome,
        ))
    }

    /// The live like count of `track` and whether the signed-in user likes it.
    pub fn subscribe_track_likes(&self, track: &TrackId) -> Result<Subscription<TrackLikes>> {
        let user_id = self.ctx.session()?.user_id;
        let subscription = self.track_likes_repo.watch(track)?;
        Ok(subscription.map(move |likers| TrackLikes::new(&likers, &user_id)))
    }
}

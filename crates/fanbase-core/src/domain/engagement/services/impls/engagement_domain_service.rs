// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{info, warn};

use fanbase_proc_macros::DependenciesStruct;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynEngagementRepository, DynIDProvider,
    DynNotificationService, DynPendingEngagement, DynTimeProvider, DynWriteQueue,
};
use crate::domain::engagement::models::{
    EngagementState, Emoji, LikeSet, ReactionMap, ReadTicket, Reply, ReplyId, SenderRole,
};
use crate::domain::engagement::services::EngagementDomainService as EngagementDomainServiceTrait;
use crate::domain::general::models::{FailureKind, MutationKind, Optimistic, WriteOutcome};
use crate::domain::notifications::models::{Activity, NotificationDraft};
use crate::domain::shared::models::{EngagementError, EntityRef, SessionContext, UserId};
use crate::ClientEvent;

#[derive(DependenciesStruct)]
pub struct EngagementDomainService {
    client_event_dispatcher: DynClientEventDispatcher,
    ctx: DynAppContext,
    engagement_repo: DynEngagementRepository,
    id_provider: DynIDProvider,
    notification_service: DynNotificationService,
    pending_engagement: DynPendingEngagement,
    time_provider: DynTimeProvider,
    write_queue: DynWriteQueue,
}

#[async_trait]
impl EngagementDomainServiceTrait for EngagementDomainService {
    async fn toggle_like(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
    ) -> Result<Optimistic<LikeSet>> {
        let (state, ticket) = self.read_for_toggle(entity).await?;
        let (likes, is_liked) = self.pending_engagement.lock().toggle_like(
            entity,
            ticket,
            &state.likes,
            &actor.user_id,
        );

        let repo = self.engagement_repo.clone();
        let user_id = actor.user_id.clone();
        let target = entity.clone();

        let (mutation, write) = if is_liked {
            let write = async move { repo.add_like(&target, &user_id).await }.boxed();
            (MutationKind::Like, write)
        } else {
            let write = async move { repo.remove_like(&target, &user_id).await }.boxed();
            (MutationKind::Unlike, write)
        };

        let notification = is_liked
            .then(|| self.notification_for(actor, entity, &state, &Activity::Like))
            .flatten();

        let outcome = self.schedule(entity.clone(), mutation, write, notification);
        Ok(Optimistic::new(likes, outcome))
    }

    async fn toggle_reaction(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
        emoji: &Emoji,
    ) -> Result<Optimistic<ReactionMap>> {
        let (state, ticket) = self.read_for_toggle(entity).await?;
        let (reactions, has_reacted) = self.pending_engagement.lock().toggle_reaction(
            entity,
            ticket,
            &state.reactions,
            emoji,
            &actor.user_id,
        );

        let repo = self.engagement_repo.clone();
        let user_id = actor.user_id.clone();
        let target = entity.clone();
        let reaction = emoji.clone();

        let (mutation, write) = if has_reacted {
            let write =
                async move { repo.add_reaction(&target, &reaction, &user_id).await }.boxed();
            (MutationKind::React, write)
        } else {
            let write =
                async move { repo.remove_reaction(&target, &reaction, &user_id).await }.boxed();
            (MutationKind::Unreact, write)
        };

        let notification = has_reacted
            .then(|| {
                self.notification_for(actor, entity, &state, &Activity::Reaction(emoji.clone()))
            })
            .flatten();

        let outcome = self.schedule(entity.clone(), mutation, write, notification);
        Ok(Optimistic::new(reactions, outcome))
    }

    async fn append_reply(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
        text: &str,
    ) -> Result<Optimistic<Reply>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EngagementError::EmptyReply.into());
        }

        let state = self.load_state(entity).await?;
        let role = actor.role();
        let sender_name = actor
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| match role {
                SenderRole::Operator => self.ctx.config.default_operator_name.clone(),
                SenderRole::Subject => self.ctx.config.default_subject_name.clone(),
            });

        let reply = Reply {
            id: ReplyId::from(self.id_provider.new_id()),
            sender_id: actor.user_id.clone(),
            sender_name,
            sender_photo_url: actor.photo_url.clone(),
            text: text.to_string(),
            timestamp: self.time_provider.now(),
            sender_role: role,
        };

        let repo = self.engagement_repo.clone();
        let target = entity.clone();
        let appended_reply = reply.clone();
        let write = async move { repo.append_reply(&target, &appended_reply).await }.boxed();

        let notification = self.notification_for(actor, entity, &state, &Activity::Reply);
        let outcome = self.schedule(entity.clone(), MutationKind::Reply, write, notification);
        Ok(Optimistic::new(reply, outcome))
    }

    async fn delete_reply(&self, entity: &EntityRef, reply_id: &ReplyId) -> Result<WriteOutcome> {
        if entity.is_provisional() {
            return Err(EngagementError::ProvisionalEntity(entity.clone()).into());
        }

        let repo = self.engagement_repo.clone();
        let target = entity.clone();
        let reply_id = reply_id.clone();
        let write = async move {
            if !repo.remove_reply(&target, &reply_id).await? {
                info!("Reply {} of {} was already gone.", reply_id, target);
            }
            Ok::<_, anyhow::Error>(())
        }
        .boxed();

        Ok(self.schedule(entity.clone(), MutationKind::DeleteReply, write, None))
    }
}

impl EngagementDomainService {
    async fn load_state(&self, entity: &EntityRef) -> Result<EngagementState> {
        if entity.is_provisional() {
            return Err(EngagementError::ProvisionalEntity(entity.clone()).into());
        }
        self.engagement_repo
            .get(entity)
            .await?
            .ok_or_else(|| EngagementError::EntityNotFound(entity.clone()).into())
    }

    /// Like `load_state`, but registers the read with the pending engagement so that the toggle
    /// can tell whether the result may predate one of our own writes.
    async fn read_for_toggle(&self, entity: &EntityRef) -> Result<(EngagementState, ReadTicket)> {
        if entity.is_provisional() {
            return Err(EngagementError::ProvisionalEntity(entity.clone()).into());
        }

        let ticket = self.pending_engagement.lock().begin_read(entity);
        match self.load_state(entity).await {
            Ok(state) => Ok((state, ticket)),
            Err(err) => {
                self.pending_engagement.lock().cancel_read(entity);
                Err(err)
            }
        }
    }

    /// The notification for the owner of `entity` unless `actor` owns it themselves.
    fn notification_for(
        &self,
        actor: &SessionContext,
        entity: &EntityRef,
        state: &EngagementState,
        activity: &Activity,
    ) -> Option<(UserId, NotificationDraft)> {
        if !state.should_notify(&actor.user_id) {
            return None;
        }
        let owner = state.owner.clone()?;
        let draft = NotificationDraft::for_activity(
            activity,
            entity,
            &state.excerpt,
            actor.role(),
            self.ctx.config.notification_snippet_length,
        );
        Some((owner, draft))
    }

    /// Queues `write`. On success the owner is notified, on failure the failure is reported to
    /// the delegate and local state of toggles is discarded.
    fn schedule(
        &self,
        entity: EntityRef,
        mutation: MutationKind,
        write: BoxFuture<'static, Result<()>>,
        notification: Option<(UserId, NotificationDraft)>,
    ) -> WriteOutcome {
        let client_event_dispatcher = self.client_event_dispatcher.clone();
        let notification_service = self.notification_service.clone();
        let pending_engagement = self.pending_engagement.clone();

        let is_toggle = matches!(
            mutation,
            MutationKind::Like | MutationKind::Unlike | MutationKind::React | MutationKind::Unreact
        );

        self.write_queue.enqueue(
            async move {
                let result = write.await;

                if is_toggle {
                    pending_engagement
                        .lock()
                        .complete(&entity, result.is_ok());
                }

                match result {
                    Ok(()) => {
                        if let Some((recipient, draft)) = notification {
                            notification_service.notify(Some(recipient), draft).await;
                        }
                        Ok(())
                    }
                    Err(err) => {
                        let kind = FailureKind::classify(&err);
                        warn!("Failed to {} {}. {}", mutation, entity, err);
                        client_event_dispatcher.dispatch_event(ClientEvent::MutationFailed {
                            entity,
                            mutation,
                            kind,
                        });
                        Err(kind)
                    }
                }
            }
            .boxed(),
        )
    }
}

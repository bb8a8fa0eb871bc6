// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use anyhow::Result;
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use tracing::{debug, info, warn};

use fanbase_proc_macros::InjectDependencies;
use fanbase_store::Subscription;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynMessagesRepository, DynNotificationService,
    DynProfilesRepository, DynTimeProvider, DynWriteQueue,
};
use crate::app::dtos::{Thread, ThreadSummary};
use crate::domain::general::models::{FailureKind, MutationKind, WriteOutcome};
use crate::domain::notifications::models::NotificationDraft;
use crate::domain::presence::models::{FanProfile, Presence};
use crate::domain::shared::models::{EngagementError, EntityRef, ThreadId, UserId};
use crate::domain::threads::models::{inbox_order, InboxScope, Message, NewThread};
use crate::util::{combine_latest, spawn_subscription};
use crate::ClientEvent;

#[derive(InjectDependencies)]
pub struct ThreadsService {
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    messages_repo: DynMessagesRepository,
    #[inject]
    notification_service: DynNotificationService,
    #[inject]
    profiles_repo: DynProfilesRepository,
    #[inject]
    time_provider: DynTimeProvider,
    #[inject]
    write_queue: DynWriteQueue,
}

impl ThreadsService {
    /// Live view of a single conversation. Delivers `None` once the thread was deleted.
    pub fn subscribe_thread(&self, id: &ThreadId) -> Result<Subscription<Option<Thread>>> {
        let mut messages = self.messages_repo.watch(id)?;
        let profiles_repo = self.profiles_repo.clone();
        let time_provider = self.time_provider.clone();
        let window = self.ctx.config.presence_window;
        let placeholder = self.ctx.config.deleted_message_placeholder.clone();
        let thread_id = id.clone();

        debug!("Subscribing to thread {}.", thread_id);

        Ok(spawn_subscription(move |sender| async move {
            let mut message: Option<Message> = None;
            let mut owner: Option<FanProfile> = None;
            let mut profile_subscription: Option<(UserId, Subscription<Option<FanProfile>>)> =
                None;

            loop {
                let next_profile = async {
                    match profile_subscription.as_mut() {
                        Some((_, subscription)) => subscription.next().await,
                        None => futures::future::pending().await,
                    }
                };

                tokio::select! {
                    update = messages.next() => {
                        let Some(update) = update else {
                            break;
                        };
                        message = update;
                    }
                    update = next_profile => {
                        match update {
                            Some(profile) => owner = profile,
                            None => profile_subscription = None,
                        }
                    }
                }

                let owner_id = message.as_ref().and_then(|message| message.owner.clone());
                let is_watching_owner = profile_subscription
                    .as_ref()
                    .map(|(user_id, _)| Some(user_id) == owner_id.as_ref())
                    .unwrap_or(false);

                if !is_watching_owner {
                    profile_subscription = None;
                    owner = None;

                    if let Some(owner_id) = owner_id {
                        match profiles_repo.watch(&owner_id) {
                            Ok(subscription) => {
                                // Waits for the initial profile before emitting.
                                profile_subscription = Some((owner_id, subscription));
                                continue;
                            }
                            Err(err) => warn!(
                                "Failed to observe presence of {} in thread {}. {}",
                                owner_id, thread_id, err
                            ),
                        }
                    }
                }

                let thread = message.as_ref().map(|message| Thread {
                    is_deleted: message.is_deleted(&placeholder),
                    owner_presence: owner.as_ref().map(|profile| {
                        Presence::from_last_active(profile.last_active, time_provider.now(), window)
                    }),
                    message: message.clone(),
                });

                if sender.send(thread).is_err() {
                    break;
                }
            }

            debug!("Stopped observing thread {}.", thread_id);
        }))
    }

    /// Live inbox ordered by most recent activity. The operator's inbox (`InboxScope::All`)
    /// also carries the presence of each thread's owner.
    pub fn subscribe_inbox(&self, scope: &InboxScope) -> Result<Subscription<Vec<ThreadSummary>>> {
        let messages = self.messages_repo.watch_inbox(scope)?;
        let placeholder = self.ctx.config.deleted_message_placeholder.clone();

        debug!("Subscribing to inbox {:?}.", scope);

        if let InboxScope::Owner(_) = scope {
            return Ok(messages.map(move |mut messages| {
                inbox_order(&mut messages);
                messages
                    .iter()
                    .map(|message| ThreadSummary::new(message, None, &placeholder))
                    .collect::<Vec<_>>()
            }));
        }

        let profiles = self.profiles_repo.watch_all()?;
        let time_provider = self.time_provider.clone();
        let window = self.ctx.config.presence_window;

        Ok(combine_latest(
            messages,
            profiles,
            move |messages: &Vec<Message>, profiles: &Vec<FanProfile>| {
                let now = time_provider.now();
                let last_active = profiles
                    .iter()
                    .map(|profile| (&profile.id, profile.last_active))
                    .collect::<HashMap<_, _>>();

                let mut messages = messages.clone();
                inbox_order(&mut messages);
                messages
                    .iter()
                    .map(|message| {
                        let presence = message
                            .owner
                            .as_ref()
                            .and_then(|owner| last_active.get(owner))
                            .map(|last_active| {
                                Presence::from_last_active(*last_active, now, window)
                            });
                        ThreadSummary::new(message, presence, &placeholder)
                    })
                    .collect::<Vec<_>>()
            },
        ))
    }

    /// Submits a new conversation, e.g. from the contact form. Anonymous visitors leave
    /// `owner` empty.
    pub async fn create_thread(&self, thread: NewThread) -> Result<ThreadId> {
        if thread.body.trim().is_empty() {
            return Err(EngagementError::EmptyMessage.into());
        }
        let id = self.messages_repo.create(&thread).await?;
        info!("Created thread {}.", id);
        Ok(id)
    }

    /// Starts a conversation from the operator with `recipient` and notifies them about it.
    pub async fn send_direct_message(
        &self,
        recipient: &UserId,
        name: &str,
        email: &str,
        body: &str,
    ) -> Result<ThreadId> {
        self.ctx.operator_session()?;

        let body = body.trim();
        if body.is_empty() {
            return Err(EngagementError::EmptyMessage.into());
        }

        let thread = NewThread {
            owner: Some(recipient.clone()),
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
        };
        let id = self.messages_repo.create(&thread).await?;
        info!("Sent direct message {} to {}.", id, recipient);

        let draft = NotificationDraft::direct_message(
            &id,
            body,
            self.ctx.config.direct_message_snippet_length,
        );
        self.notification_service
            .notify(Some(recipient.clone()), draft)
            .await;

        Ok(id)
    }

    /// Replaces the body of a message with the deleted placeholder. Replies, likes and
    /// reactions are kept.
    pub fn soft_delete_message(&self, id: &ThreadId) -> Result<WriteOutcome> {
        self.ctx.operator_session()?;

        let repo = self.messages_repo.clone();
        let thread_id = id.clone();
        let placeholder = self.ctx.config.deleted_message_placeholder.clone();

        Ok(self.enqueue(
            id,
            MutationKind::DeleteMessageBody,
            async move { repo.set_body(&thread_id, &placeholder).await }.boxed(),
        ))
    }

    /// Removes the thread permanently.
    pub async fn delete_thread(&self, id: &ThreadId) -> Result<()> {
        self.ctx.operator_session()?;
        self.messages_repo.delete(id).await?;
        info!("Deleted thread {}.", id);
        Ok(())
    }

    pub fn mark_thread_read(&self, id: &ThreadId) -> Result<WriteOutcome> {
        self.ctx.operator_session()?;

        let repo = self.messages_repo.clone();
        let thread_id = id.clone();

        Ok(self.enqueue(
            id,
            MutationKind::MarkThreadRead,
            async move { repo.set_read(&thread_id, true).await }.boxed(),
        ))
    }
}

impl ThreadsService {
    fn enqueue(
        &self,
        id: &ThreadId,
        mutation: MutationKind,
        write: BoxFuture<'static, Result<()>>,
    ) -> WriteOutcome {
        let client_event_dispatcher = self.client_event_dispatcher.clone();
        let entity = EntityRef::Message(id.clone());

        self.write_queue.enqueue(
            async move {
                let Err(err) = write.await else {
                    return Ok(());
                };
                let kind = FailureKind::classify(&err);
                warn!("Failed to {} {}. {}", mutation, entity, err);
                client_event_dispatcher.dispatch_event(ClientEvent::MutationFailed {
                    entity,
                    mutation,
                    kind,
                });
                Err(kind)
            }
            .boxed(),
        )
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use crate::app::deps::{DynAppContext, DynWriteQueue};
use crate::client_builder::{ClientBuilder, UndefinedStore};
use crate::domain::shared::models::UserId;
use crate::services::{
    CommentsService, EngagementService, NotificationsService, PresenceService, SessionService,
    ThreadsService,
};
use crate::ClientEvent;

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, client: Client, event: ClientEvent);
}

impl Client {
    pub fn builder() -> ClientBuilder<UndefinedStore> {
        ClientBuilder::new()
    }
}

pub struct ClientInner {
    pub comments: CommentsService,
    pub engagement: EngagementService,
    pub notifications: NotificationsService,
    pub presence: PresenceService,
    pub session: SessionService,
    pub threads: ThreadsService,
    pub(crate) ctx: DynAppContext,
    pub(crate) write_queue: DynWriteQueue,
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    /// Resolves once every write this client started has completed.
    pub async fn flush(&self) {
        self.write_queue.flush().await
    }

    pub fn signed_in_user_id(&self) -> Option<UserId> {
        self.ctx.session().ok().map(|session| session.user_id)
    }
}

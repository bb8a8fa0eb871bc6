// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use fanbase_store::prelude::{PlatformDriver, Store};
use fanbase_utils::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};

use crate::app::deps::{AppConfig, AppContext, AppDependencies, DynIDProvider, DynTimeProvider};
use crate::client::ClientInner;
use crate::infra::events::ImmediateClientEventDispatcher;
use crate::infra::general::NanoIDProvider;
use crate::infra::platform_dependencies::PlatformDependencies;
use crate::services::{
    CommentsService, EngagementService, NotificationsService, PresenceService, SessionService,
    ThreadsService,
};
use crate::{Client, ClientDelegate};

pub struct UndefinedStore;

pub struct ClientBuilder<S> {
    app_config: AppConfig,
    delegate: Option<Box<dyn ClientDelegate>>,
    id_provider: DynIDProvider,
    short_id_provider: DynIDProvider,
    store: S,
    time_provider: DynTimeProvider,
}

impl ClientBuilder<UndefinedStore> {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            app_config: Default::default(),
            delegate: None,
            id_provider: Arc::new(UUIDProvider::new()),
            short_id_provider: Arc::new(NanoIDProvider::default()),
            store: UndefinedStore,
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }

    pub fn set_store(self, store: Store<PlatformDriver>) -> ClientBuilder<Store<PlatformDriver>> {
        ClientBuilder {
            app_config: self.app_config,
            delegate: self.delegate,
            id_provider: self.id_provider,
            short_id_provider: self.short_id_provider,
            store,
            time_provider: self.time_provider,
        }
    }
}

impl<S> ClientBuilder<S> {
    /// Generates the ids of replies.
    pub fn set_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.id_provider = Arc::new(id_provider);
        self
    }

    /// Generates the ids of provisional comments.
    pub fn set_short_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.short_id_provider = Arc::new(id_provider);
        self
    }

    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }
}

impl ClientBuilder<Store<PlatformDriver>> {
    pub fn build(self) -> Client {
        let event_dispatcher = Arc::new(ImmediateClientEventDispatcher::new(self.delegate));

        let dependencies: AppDependencies = PlatformDependencies {
            client_event_dispatcher: event_dispatcher.clone(),
            ctx: AppContext::new(self.app_config),
            id_provider: self.id_provider,
            short_id_provider: self.short_id_provider,
            store: self.store,
            time_provider: self.time_provider,
        }
        .into();

        let client_inner = Arc::new(ClientInner {
            comments: CommentsService::from(&dependencies),
            engagement: EngagementService::from(&dependencies),
            notifications: NotificationsService::from(&dependencies),
            presence: PresenceService::from(&dependencies),
            session: SessionService::from(&dependencies),
            threads: ThreadsService::from(&dependencies),
            ctx: dependencies.ctx.clone(),
            write_queue: dependencies.write_queue.clone(),
        });

        event_dispatcher.set_client_inner(Arc::downgrade(&client_inner));

        Client::from(client_inner)
    }
}

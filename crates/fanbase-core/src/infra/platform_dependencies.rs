// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;

use fanbase_store::prelude::{PlatformDriver, Store};

use crate::app::deps::{
    AppContext, AppDependencies, DynClientEventDispatcher, DynIDProvider, DynTimeProvider,
};
use crate::domain::engagement::models::PendingEngagement;
use crate::domain::engagement::services::impls::{
    EngagementDomainService, EngagementDomainServiceDependencies,
};
use crate::domain::notifications::services::impls::{
    NotificationService, NotificationServiceDependencies,
};
use crate::infra::comments::CommentsRepository;
use crate::infra::engagement::{EngagementRepository, TrackLikesRepository};
use crate::infra::general::SerialWriteQueue;
use crate::infra::notifications::NotificationsRepository;
use crate::infra::presence::ProfilesRepository;
use crate::infra::threads::MessagesRepository;

pub struct PlatformDependencies {
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub ctx: AppContext,
    pub id_provider: DynIDProvider,
    pub short_id_provider: DynIDProvider,
    pub store: Store<PlatformDriver>,
    pub time_provider: DynTimeProvider,
}

impl From<PlatformDependencies> for AppDependencies {
    fn from(d: PlatformDependencies) -> Self {
        let ctx = Arc::new(d.ctx);
        let notifications_repo = Arc::new(NotificationsRepository::new(d.store.clone()));
        let write_queue = Arc::new(SerialWriteQueue::new());

        let notification_service = Arc::new(NotificationService::from(
            NotificationServiceDependencies {
                notifications_repo: notifications_repo.clone(),
            },
        ));

        let engagement_domain_service = Arc::new(EngagementDomainService::from(
            EngagementDomainServiceDependencies {
                client_event_dispatcher: d.client_event_dispatcher.clone(),
                ctx: ctx.clone(),
                engagement_repo: Arc::new(EngagementRepository::new(d.store.clone())),
                id_provider: d.id_provider.clone(),
                notification_service: notification_service.clone(),
                pending_engagement: Arc::new(Mutex::new(PendingEngagement::default())),
                time_provider: d.time_provider.clone(),
                write_queue: write_queue.clone(),
            },
        ));

        Self {
            client_event_dispatcher: d.client_event_dispatcher,
            comments_repo: Arc::new(CommentsRepository::new(d.store.clone())),
            ctx,
            engagement_domain_service,
            messages_repo: Arc::new(MessagesRepository::new(d.store.clone())),
            notification_service,
            notifications_repo,
            pending_track_likes: Arc::new(Mutex::new(PendingEngagement::default())),
            profiles_repo: Arc::new(ProfilesRepository::new(d.store.clone())),
            short_id_provider: d.short_id_provider,
            time_provider: d.time_provider,
            track_likes_repo: Arc::new(TrackLikesRepository::new(d.store)),
            write_queue,
        }
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use derivative::Derivative;

use crate::app::deps::{
    AppContext, AppDependencies, DynIDProvider, DynPendingEngagement, DynPendingTrackLikes,
    DynTimeProvider, DynWriteQueue,
};
use crate::app::event_handlers::MockClientEventDispatcherTrait;
use crate::domain::comments::repos::mocks::MockCommentsRepository;
use crate::domain::engagement::repos::mocks::{MockEngagementRepository, MockTrackLikesRepository};
use crate::domain::engagement::services::impls::EngagementDomainServiceDependencies;
use crate::domain::engagement::services::mocks::MockEngagementDomainService;
use crate::domain::notifications::repos::mocks::MockNotificationsRepository;
use crate::domain::notifications::services::impls::NotificationServiceDependencies;
use crate::domain::notifications::services::mocks::MockNotificationService;
use crate::domain::presence::repos::mocks::MockProfilesRepository;
use crate::domain::shared::models::SessionContext;
use crate::domain::threads::repos::mocks::MockMessagesRepository;
use crate::infra::general::SerialWriteQueue;
use crate::test::{ConstantTimeProvider, IncrementingIDProvider};

pub fn mock_reference_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn mock_admin_session() -> SessionContext {
    SessionContext::admin("admin-uid").with_display_name("The Artist")
}

pub fn mock_fan_session() -> SessionContext {
    SessionContext::new("fan-uid").with_display_name("Jane")
}

fn mock_ctx() -> AppContext {
    let ctx = AppContext::default();
    ctx.set_session(mock_fan_session());
    ctx
}

/// Writes are run by a real queue so that tests can await their outcomes.
#[derive(Derivative)]
#[derivative(Default)]
pub struct MockAppDependencies {
    pub client_event_dispatcher: MockClientEventDispatcherTrait,
    pub comments_repo: MockCommentsRepository,
    #[derivative(Default(value = "mock_ctx()"))]
    pub ctx: AppContext,
    pub engagement_domain_service: MockEngagementDomainService,
    pub messages_repo: MockMessagesRepository,
    pub notification_service: MockNotificationService,
    pub notifications_repo: MockNotificationsRepository,
    pub pending_track_likes: DynPendingTrackLikes,
    pub profiles_repo: MockProfilesRepository,
    #[derivative(Default(value = "Arc::new(IncrementingIDProvider::new(\"short-id\"))"))]
    pub short_id_provider: DynIDProvider,
    #[derivative(Default(value = "Arc::new(ConstantTimeProvider::new(mock_reference_date()))"))]
    pub time_provider: DynTimeProvider,
    pub track_likes_repo: MockTrackLikesRepository,
    #[derivative(Default(value = "Arc::new(SerialWriteQueue::new())"))]
    pub write_queue: DynWriteQueue,
}

impl MockAppDependencies {
    pub fn into_deps(self) -> AppDependencies {
        AppDependencies::from(self)
    }
}

impl From<MockAppDependencies> for AppDependencies {
    fn from(mock: MockAppDependencies) -> Self {
        AppDependencies {
            client_event_dispatcher: Arc::new(mock.client_event_dispatcher),
            comments_repo: Arc::new(mock.comments_repo),
            ctx: Arc::new(mock.ctx),
            engagement_domain_service: Arc::new(mock.engagement_domain_service),
            messages_repo: Arc::new(mock.messages_repo),
            notification_service: Arc::new(mock.notification_service),
            notifications_repo: Arc::new(mock.notifications_repo),
            pending_track_likes: mock.pending_track_likes,
            profiles_repo: Arc::new(mock.profiles_repo),
            short_id_provider: mock.short_id_provider,
            time_provider: mock.time_provider,
            track_likes_repo: Arc::new(mock.track_likes_repo),
            write_queue: mock.write_queue,
        }
    }
}

#[derive(Derivative)]
#[derivative(Default)]
pub struct MockEngagementDomainServiceDependencies {
    pub client_event_dispatcher: MockClientEventDispatcherTrait,
    pub ctx: AppContext,
    pub engagement_repo: MockEngagementRepository,
    #[derivative(Default(value = "Arc::new(IncrementingIDProvider::new(\"id\"))"))]
    pub id_provider: DynIDProvider,
    pub notification_service: MockNotificationService,
    pub pending_engagement: DynPendingEngagement,
    #[derivative(Default(value = "Arc::new(ConstantTimeProvider::new(mock_reference_date()))"))]
    pub time_provider: DynTimeProvider,
    #[derivative(Default(value = "Arc::new(SerialWriteQueue::new())"))]
    pub write_queue: DynWriteQueue,
}

impl MockEngagementDomainServiceDependencies {
    pub fn into_deps(self) -> EngagementDomainServiceDependencies {
        EngagementDomainServiceDependencies::from(self)
    }
}

impl From<MockEngagementDomainServiceDependencies> for EngagementDomainServiceDependencies {
    fn from(value: MockEngagementDomainServiceDependencies) -> Self {
        Self {
            client_event_dispatcher: Arc::new(value.client_event_dispatcher),
            ctx: Arc::new(value.ctx),
            engagement_repo: Arc::new(value.engagement_repo),
            id_provider: value.id_provider,
            notification_service: Arc::new(value.notification_service),
            pending_engagement: value.pending_engagement,
            time_provider: value.time_provider,
            write_queue: value.write_queue,
        }
    }
}

#[derive(Default)]
pub struct MockNotificationServiceDependencies {
    pub notifications_repo: MockNotificationsRepository,
}

impl MockNotificationServiceDependencies {
    pub fn into_deps(self) -> NotificationServiceDependencies {
        NotificationServiceDependencies::from(self)
    }
}

impl From<MockNotificationServiceDependencies> for NotificationServiceDependencies {
    fn from(value: MockNotificationServiceDependencies) -> Self {
        Self {
            notifications_repo: Arc::new(value.notifications_repo),
        }
    }
}

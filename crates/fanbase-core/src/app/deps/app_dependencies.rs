// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;

use fanbase_utils::{IDProvider, TimeProvider};

use crate::app::deps::app_context::AppContext;
use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::comments::repos::CommentsRepository;
use crate::domain::engagement::models::PendingEngagement;
use crate::domain::engagement::repos::{EngagementRepository, TrackLikesRepository};
use crate::domain::engagement::services::EngagementDomainService;
use crate::domain::general::services::WriteQueue;
use crate::domain::notifications::repos::NotificationsRepository;
use crate::domain::notifications::services::NotificationService;
use crate::domain::presence::repos::ProfilesRepository;
use crate::domain::shared::models::TrackId;
use crate::domain::threads::repos::MessagesRepository;

pub type DynAppContext = Arc<AppContext>;
pub type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub type DynCommentsRepository = Arc<dyn CommentsRepository>;
pub type DynEngagementDomainService = Arc<dyn EngagementDomainService>;
pub type DynEngagementRepository = Arc<dyn EngagementRepository>;
pub type DynIDProvider = Arc<dyn IDProvider>;
pub type DynMessagesRepository = Arc<dyn MessagesRepository>;
pub type DynNotificationService = Arc<dyn NotificationService>;
pub type DynNotificationsRepository = Arc<dyn NotificationsRepository>;
pub type DynPendingEngagement = Arc<Mutex<PendingEngagement>>;
pub type DynPendingTrackLikes = Arc<Mutex<PendingEngagement<TrackId>>>;
pub type DynProfilesRepository = Arc<dyn ProfilesRepository>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;
pub type DynTrackLikesRepository = Arc<dyn TrackLikesRepository>;
pub type DynWriteQueue = Arc<dyn WriteQueue>;

pub struct AppDependencies {
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub comments_repo: DynCommentsRepository,
    pub ctx: DynAppContext,
    pub engagement_domain_service: DynEngagementDomainService,
    pub messages_repo: DynMessagesRepository,
    pub notification_service: DynNotificationService,
    pub notifications_repo: DynNotificationsRepository,
    pub pending_track_likes: DynPendingTrackLikes,
    pub profiles_repo: DynProfilesRepository,
    /// Generates identifiers of provisional comments.
    pub short_id_provider: DynIDProvider,
    pub time_provider: DynTimeProvider,
    pub track_likes_repo: DynTrackLikesRepository,
    pub write_queue: DynWriteQueue,
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use comment_feed::CommentFeed;
pub use comments_service::CommentsService;
pub use engagement_service::EngagementService;
pub use notifications_service::NotificationsService;
pub use presence_service::PresenceService;
pub use session_service::SessionService;
pub use threads_service::ThreadsService;

mod comment_feed;
mod comments_service;
mod engagement_service;
mod notifications_service;
mod presence_service;
mod session_service;
mod threads_service;

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use fanbase_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynCommentsRepository, DynEngagementDomainService,
    DynIDProvider, DynTimeProvider, DynWriteQueue,
};
use crate::app::services::comment_feed::CommentFeedInner;
use crate::app::services::CommentFeed;
use crate::domain::shared::models::TrackId;

#[derive(InjectDependencies)]
pub struct CommentsService {
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    comments_repo: DynCommentsRepository,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    engagement_domain_service: DynEngagementDomainService,
    #[inject]
    short_id_provider: DynIDProvider,
    #[inject]
    time_provider: DynTimeProvider,
    #[inject]
    write_queue: DynWriteQueue,
}

impl CommentsService {
    /// Opens the live comment feed of `track`. The feed stays subscribed until it is dropped.
    pub fn open_feed(&self, track: &TrackId) -> Result<CommentFeed> {
        let remote = self.comments_repo.watch(track)?;
        let (updates, receiver) = mpsc::unbounded_channel();
        debug!("Opened comment feed of track {}.", track);

        Ok(CommentFeed::new(
            CommentFeedInner {
                track: track.clone(),
                overlay: Default::default(),
                posted: Default::default(),
                updates,
                client_event_dispatcher: self.client_event_dispatcher.clone(),
                comments_repo: self.comments_repo.clone(),
                ctx: self.ctx.clone(),
                engagement_domain_service: self.engagement_domain_service.clone(),
                short_id_provider: self.short_id_provider.clone(),
                time_provider: self.time_provider.clone(),
                write_queue: self.write_queue.clone(),
            },
            receiver,
            remote,
        ))
    }
}

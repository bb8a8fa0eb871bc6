// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::FutureExt;
use tracing::{info, warn};

use fanbase_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynProfilesRepository, DynWriteQueue,
};
use crate::domain::general::models::{FailureKind, WriteOutcome};
use crate::domain::shared::models::SessionContext;
use crate::ClientEvent;

#[derive(InjectDependencies)]
pub struct SessionService {
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    profiles_repo: DynProfilesRepository,
    #[inject]
    write_queue: DynWriteQueue,
}

impl SessionService {
    /// Makes `session` the acting identity of this client and records the user's last activity.
    /// A previous session is replaced.
    pub fn start_session(&self, session: SessionContext) -> WriteOutcome {
        let user_id = session.user_id.clone();
        info!("Starting session of {}.", user_id);

        self.ctx.set_session(session);
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::SessionChanged {
                user_id: Some(user_id.clone()),
            });

        let profiles_repo = self.profiles_repo.clone();
        let client_event_dispatcher = self.client_event_dispatcher.clone();

        self.write_queue.enqueue(
            async move {
                let Err(err) = profiles_repo.touch_last_active(&user_id).await else {
                    return Ok(());
                };
                let kind = FailureKind::classify(&err);
                warn!("Failed to record last activity of {}. {}", user_id, err);
                client_event_dispatcher
                    .dispatch_event(ClientEvent::PresenceUpdateFailed { user_id, kind });
                Err(kind)
            }
            .boxed(),
        )
    }

    /// Waits for outstanding writes of the current session, then tears the session down.
    pub async fn end_session(&self) {
        self.write_queue.flush().await;

        let Some(session) = self.ctx.reset_session() else {
            return;
        };
        info!("Ended session of {}.", session.user_id);
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::SessionChanged { user_id: None });
    }

    pub fn current(&self) -> Option<SessionContext> {
        self.ctx.session().ok()
    }
}

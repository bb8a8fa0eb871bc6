// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use chrono::Duration;
use parking_lot::RwLock;

use crate::domain::shared::models::{EngagementError, SessionContext};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Users whose last activity lies within this window are considered online.
    pub presence_window: Duration,
    /// Number of characters of a message quoted in like, reaction and reply notifications.
    pub notification_snippet_length: usize,
    /// Number of characters of a message quoted when the operator starts a conversation.
    pub direct_message_snippet_length: usize,
    /// Number of notifications delivered by `subscribe_notifications` when no limit is given.
    pub notification_feed_limit: Option<usize>,
    /// Body of a message whose content was deleted.
    pub deleted_message_placeholder: String,
    pub default_operator_name: String,
    pub default_subject_name: String,
}

pub struct AppContext {
    pub session: RwLock<Option<SessionContext>>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Default::default(),
            config,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            presence_window: Duration::minutes(5),
            notification_snippet_length: 30,
            direct_message_snippet_length: 50,
            notification_feed_limit: Some(10),
            deleted_message_placeholder: "[This message has been deleted]".to_string(),
            default_operator_name: "Admin".to_string(),
            default_subject_name: "Fan".to_string(),
        }
    }
}

impl AppContext {
    pub fn session(&self) -> Result<SessionContext> {
        self.session
            .read()
            .clone()
            .ok_or_else(|| EngagementError::NoActiveSession.into())
    }

    /// The current session if it belongs to an operator.
    pub fn operator_session(&self) -> Result<SessionContext> {
        let session = self.session()?;
        if !session.is_admin {
            return Err(EngagementError::OperatorRequired.into());
        }
        Ok(session)
    }

    pub fn set_session(&self, session: SessionContext) {
        self.session.write().replace(session);
    }

    pub fn reset_session(&self) -> Option<SessionContext> {
        self.session.write().take()
    }
}

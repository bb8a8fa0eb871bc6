// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::engagement::models::SenderRole;
use crate::domain::shared::models::UserId;

/// Identity of the signed-in user, resolved by the identity provider at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub is_admin: bool,
}

impl SessionContext {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            photo_url: None,
            is_admin: false,
        }
    }

    pub fn admin(user_id: impl Into<UserId>) -> Self {
        Self {
            is_admin: true,
            ..Self::new(user_id)
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    pub fn role(&self) -> SenderRole {
        if self.is_admin {
            SenderRole::Operator
        } else {
            SenderRole::Subject
        }
    }
}

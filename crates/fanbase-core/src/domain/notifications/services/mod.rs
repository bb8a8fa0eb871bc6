// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use notification_service::NotificationService;

pub mod impls;
mod notification_service;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::notification_service::MockNotificationService;
}

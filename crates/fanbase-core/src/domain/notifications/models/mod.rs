// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use errors::MarkAllReadError;
pub use notification::{Notification, NotificationId};
pub use notification_draft::{Activity, NotificationDraft};

mod errors;
mod notification;
mod notification_draft;

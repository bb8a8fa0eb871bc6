// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod comments;
pub mod engagement;
pub mod events;
pub mod general;
pub mod notifications;
pub mod platform_dependencies;
pub mod presence;
pub mod threads;

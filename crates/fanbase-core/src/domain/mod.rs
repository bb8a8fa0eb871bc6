// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod comments;
pub mod engagement;
pub mod general;
pub mod notifications;
pub mod presence;
pub mod shared;
pub mod threads;

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub(crate) use subscriptions::{combine_latest, spawn_subscription};

mod subscriptions;

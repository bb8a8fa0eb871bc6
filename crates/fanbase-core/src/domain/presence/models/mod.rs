// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use fan_profile::FanProfile;
pub use presence::Presence;
pub use relative_time::format_distance_to_now;

mod fan_profile;
mod presence;
mod relative_time;

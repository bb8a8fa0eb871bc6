// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use profiles_repository::{fan_path, FanRecord, ProfilesRepository};

mod profiles_repository;

// fanbase/fanbase-utils
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use deps::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};

mod deps;
mod id_string_macro;

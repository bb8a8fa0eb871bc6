// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use inbox::{inbox_order, InboxScope};
pub use message::{Message, NewThread};

mod inbox;
mod message;

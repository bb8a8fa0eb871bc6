// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use messages_repository::{message_path, MessageRecord, MessagesRepository};

mod messages_repository;

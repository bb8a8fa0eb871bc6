// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use nano_id_provider::NanoIDProvider;
pub use serial_write_queue::SerialWriteQueue;

mod nano_id_provider;
mod serial_write_queue;

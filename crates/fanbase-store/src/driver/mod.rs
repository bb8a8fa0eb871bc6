// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use crate::{Database, Error};

pub mod memory;

#[async_trait]
pub trait Driver: Send + Sync {
    type Database: Database + 'static;

    async fn open(self) -> Result<Self::Database, Error>;
}

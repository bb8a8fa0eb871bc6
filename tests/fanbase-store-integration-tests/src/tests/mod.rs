// fanbase/fanbase-store-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use fanbase_store::prelude::*;
use fanbase_utils::TimeProvider;

mod documents;
mod field_updates;
mod watches;

pub struct FixedTimeProvider(DateTime<Utc>);

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn reference_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

async fn store() -> Result<Store<PlatformDriver>> {
    let driver = MemoryDriver::new().set_time_provider(FixedTimeProvider(reference_date()));
    Ok(Store::open(driver).await?)
}

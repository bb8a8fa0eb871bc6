// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;
use std::time::Duration;

use anyhow::{format_err, Result};
use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt};

use fanbase_core::dtos::{NewThread, SessionContext, ThreadId};
use fanbase_core::test::{mock_data, ConstantTimeProvider, IncrementingIDProvider};
use fanbase_core::Client;
use fanbase_store::prelude::*;
use fanbase_utils::TimeProvider;

use super::TestClient;

/// A store shared by several clients, all running on the same controllable clock.
pub struct TestEnvironment {
    pub store: Store<PlatformDriver>,
    pub clock: Arc<ConstantTimeProvider>,
}

#[derive(Clone)]
struct SharedClock(Arc<ConstantTimeProvider>);

impl TimeProvider for SharedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.now()
    }
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let clock = Arc::new(ConstantTimeProvider::new(mock_data::reference_date()));
        let driver = MemoryDriver::new()
            .set_time_provider(SharedClock(clock.clone()))
            .set_id_provider(IncrementingIDProvider::new("doc"));
        let store = Store::open(driver).await?;
        Ok(Self { store, clock })
    }

    /// Builds a client and starts a session for `session`.
    pub async fn client(&self, session: SessionContext) -> Result<TestClient> {
        let user_id = session.user_id.clone();
        let client = TestClient::new(|delegate| {
            Client::builder()
                .set_store(self.store.clone())
                .set_time_provider(SharedClock(self.clock.clone()))
                .set_id_provider(IncrementingIDProvider::new(&format!("{}-reply", user_id)))
                .set_short_id_provider(IncrementingIDProvider::new(&format!("{}-tmp", user_id)))
                .set_delegate(Some(delegate))
                .build()
        });

        client
            .session
            .start_session(session)
            .wait()
            .await
            .map_err(|kind| format_err!("Failed to start session: {}", kind))?;
        Ok(client)
    }

    pub async fn fan(&self, user_id: &str) -> Result<TestClient> {
        self.client(SessionContext::new(user_id).with_display_name(user_id))
            .await
    }

    pub async fn admin(&self) -> Result<TestClient> {
        self.client(mock_data::admin_session()).await
    }

    /// A thread opened by `owner` through the contact form.
    pub async fn thread(&self, client: &Client, owner: &str, body: &str) -> Result<ThreadId> {
        client
            .threads
            .create_thread(NewThread {
                owner: Some(owner.into()),
                name: owner.to_string(),
                email: format!("{}@example.com", owner),
                body: body.to_string(),
            })
            .await
    }

    pub fn advance(&self, minutes: i64) {
        self.clock.advance(chrono::Duration::minutes(minutes))
    }
}

/// Waits for the first value of `stream` matching `condition`.
pub async fn wait_for<S, T>(stream: &mut S, condition: impl Fn(&T) -> bool) -> Result<T>
where
    S: Stream<Item = T> + Unpin,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(value) = stream.next().await {
            if condition(&value) {
                return Ok(value);
            }
        }
        Err(format_err!("Stream ended before the expected value arrived."))
    })
    .await
    .map_err(|_| format_err!("Timed out waiting for the expected value."))?
}

// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::Mutex;

use fanbase_core::{Client, ClientDelegate, ClientEvent};

/// A client that records every event it reports to its delegate.
pub struct TestClient {
    client: Client,
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

struct RecordingDelegate {
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl ClientDelegate for RecordingDelegate {
    fn handle_event(&self, _client: Client, event: ClientEvent) {
        self.events.lock().push(event)
    }
}

impl TestClient {
    pub(super) fn new(build: impl FnOnce(Box<dyn ClientDelegate>) -> Client) -> Self {
        let events = Arc::new(Mutex::new(vec![]));
        let client = build(Box::new(RecordingDelegate {
            events: events.clone(),
        }));
        Self { client, events }
    }

    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.lock().clone()
    }

    pub fn mutation_failures(&self) -> Vec<ClientEvent> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, ClientEvent::MutationFailed { .. }))
            .collect()
    }
}

impl Deref for TestClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use test_client::TestClient;
pub use test_environment::{wait_for, TestEnvironment};

mod test_client;
mod test_environment;

// fanbase/fanbase-core-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

mod comments;
mod engagement;
mod helpers;
mod notifications;
mod threads;

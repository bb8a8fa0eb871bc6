// fanbase/fanbase-store-integration-tests
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

#[cfg(test)]
mod tests;

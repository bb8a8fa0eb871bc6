// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::{Error, Operation};

/// Decides whether an operation on a path may proceed. Mirrors the role of server-side
/// security rules.
pub trait AccessPolicy: Send + Sync {
    fn authorize(&self, operation: Operation, path: &str) -> Result<(), Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _operation: Operation, _path: &str) -> Result<(), Error> {
        Ok(())
    }
}

impl<F> AccessPolicy for F
where
    F: Fn(Operation, &str) -> Result<(), Error> + Send + Sync,
{
    fn authorize(&self, operation: Operation, path: &str) -> Result<(), Error> {
        self(operation, path)
    }
}

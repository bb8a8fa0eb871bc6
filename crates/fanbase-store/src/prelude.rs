// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use crate::{
    driver::Driver, store::Store, AccessPolicy, AllowAll, CollectionPath, Database, Document,
    DocumentPath, DocumentSnapshot, DocumentUpdate, Error, FieldPath, FieldUpdate, Filter,
    Operation, Query, QueryDirection, Subscription, WriteBatch, WriteOp,
};
pub use fanbase_proc_macros::document;

pub use crate::driver::memory::{MemoryDatabase, MemoryDriver};

pub use MemoryDriver as PlatformDriver;

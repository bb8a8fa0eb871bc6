// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use strum_macros::Display;

pub use batch::{WriteBatch, WriteOp};
pub use document::{encode, Document, DocumentSnapshot};
pub use path::{CollectionPath, DocumentPath, FieldPath};
pub use policy::{AccessPolicy, AllowAll};
pub use query::{compare_values, Filter, Query, QueryDirection};
pub use subscription::Subscription;
pub use update::{DocumentUpdate, FieldUpdate};

mod batch;
mod document;
mod driver;
mod path;
mod policy;
pub mod prelude;
mod query;
mod store;
mod subscription;
mod update;

/// The kind of access an operation requires. Used by `AccessPolicy` and in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing or insufficient permissions to {operation} '{path}'")]
    PermissionDenied { path: String, operation: Operation },

    #[error("Invalid reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("No document to update at '{path}'")]
    NotFound { path: String },

    #[error("Document '{path}' already exists")]
    AlreadyExists { path: String },

    #[error("The store is currently unavailable: {reason}")]
    Unavailable { reason: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn permission_denied(operation: Operation, path: impl ToString) -> Self {
        Self::PermissionDenied {
            path: path.to_string(),
            operation,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

#[async_trait]
pub trait Database: Send + Sync {
    /// Returns a fresh document identifier for `add` or client-side prefetching.
    fn new_document_id(&self) -> String;

    async fn get(&self, path: &DocumentPath) -> Result<Option<DocumentSnapshot>, Error>;

    /// Collects all documents matching `query`.
    async fn query(&self, query: &Query) -> Result<Vec<DocumentSnapshot>, Error>;

    /// Writes the document at `path`. Without `merge` the previous contents are replaced,
    /// with `merge` nested maps are merged into the existing document.
    async fn set(&self, path: &DocumentPath, data: DocumentUpdate, merge: bool)
        -> Result<(), Error>;

    /// Creates a new document with a generated identifier in `collection`.
    async fn add(
        &self,
        collection: &CollectionPath,
        data: DocumentUpdate,
    ) -> Result<DocumentPath, Error>;

    /// Applies field-level updates to an existing document. Fails with `Error::NotFound` if the
    /// document does not exist.
    async fn update(&self, path: &DocumentPath, update: DocumentUpdate) -> Result<(), Error>;

    async fn delete(&self, path: &DocumentPath) -> Result<(), Error>;

    /// Applies all operations of `batch` atomically. Either every write lands or none does.
    async fn commit(&self, batch: WriteBatch) -> Result<(), Error>;

    /// Delivers the current state of the document at `path` and every subsequent change.
    fn watch_document(
        &self,
        path: &DocumentPath,
    ) -> Result<Subscription<Option<DocumentSnapshot>>, Error>;

    /// Delivers the current result set of `query` and every subsequent change.
    fn watch_query(&self, query: &Query) -> Result<Subscription<Vec<DocumentSnapshot>>, Error>;
}

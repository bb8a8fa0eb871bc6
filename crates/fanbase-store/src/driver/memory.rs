// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, warn};

use fanbase_utils::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};

use crate::driver::Driver;
use crate::{
    AccessPolicy, AllowAll, CollectionPath, Database, DocumentPath, DocumentSnapshot,
    DocumentUpdate, Error, Operation, Query, Subscription, WriteBatch, WriteOp,
};

type Documents = BTreeMap<DocumentPath, Map<String, Value>>;

/// Opens an in-process document database. Suitable for tests and for running the client
/// without a remote backend.
pub struct MemoryDriver {
    time_provider: Arc<dyn TimeProvider>,
    id_provider: Arc<dyn IDProvider>,
    policy: Arc<dyn AccessPolicy>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self {
            time_provider: Arc::new(SystemTimeProvider::default()),
            id_provider: Arc::new(UUIDProvider::new()),
            policy: Arc::new(AllowAll),
        }
    }

    pub fn set_time_provider<P: TimeProvider + 'static>(mut self, provider: P) -> Self {
        self.time_provider = Arc::new(provider);
        self
    }

    pub fn set_id_provider<P: IDProvider + 'static>(mut self, provider: P) -> Self {
        self.id_provider = Arc::new(provider);
        self
    }

    pub fn set_access_policy<P: AccessPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Arc::new(policy);
        self
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    type Database = MemoryDatabase;

    async fn open(self) -> Result<Self::Database, Error> {
        Ok(MemoryDatabase {
            inner: Arc::new(DatabaseInner {
                documents: Default::default(),
                watchers: Default::default(),
                policy: RwLock::new(self.policy),
                time_provider: self.time_provider,
                id_provider: self.id_provider,
            }),
        })
    }
}

#[derive(Clone)]
pub struct MemoryDatabase {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    documents: RwLock<Documents>,
    watchers: Mutex<Watchers>,
    policy: RwLock<Arc<dyn AccessPolicy>>,
    time_provider: Arc<dyn TimeProvider>,
    id_provider: Arc<dyn IDProvider>,
}

#[derive(Default)]
struct Watchers {
    next_id: u64,
    documents: HashMap<u64, DocumentWatcher>,
    queries: HashMap<u64, QueryWatcher>,
}

struct DocumentWatcher {
    path: DocumentPath,
    last: Option<DocumentSnapshot>,
    sender: UnboundedSender<Option<DocumentSnapshot>>,
}

struct QueryWatcher {
    query: Query,
    last: Vec<DocumentSnapshot>,
    sender: UnboundedSender<Vec<DocumentSnapshot>>,
}

impl MemoryDatabase {
    /// Replaces the access policy. Affects all subsequent operations.
    pub fn set_access_policy<P: AccessPolicy + 'static>(&self, policy: P) {
        *self.inner.policy.write() = Arc::new(policy);
    }

    /// Number of active listeners, mostly useful to verify that subscriptions are released.
    pub fn active_watch_count(&self) -> usize {
        let watchers = self.inner.watchers.lock();
        watchers.documents.len() + watchers.queries.len()
    }

    fn authorize(&self, operation: Operation, path: impl ToString) -> Result<(), Error> {
        let policy = self.inner.policy.read().clone();
        let path = path.to_string();
        policy.authorize(operation, &path).map_err(|err| {
            debug!("Denied {} on '{}': {}", operation, path, err);
            err
        })
    }

    fn snapshot(documents: &Documents, path: &DocumentPath) -> Option<DocumentSnapshot> {
        documents.get(path).map(|data| DocumentSnapshot {
            path: path.clone(),
            data: data.clone(),
        })
    }

    fn run_query(documents: &Documents, query: &Query) -> Vec<DocumentSnapshot> {
        let candidates = documents
            .iter()
            .filter(|(path, _)| path.parent() == query.collection)
            .map(|(path, data)| DocumentSnapshot {
                path: path.clone(),
                data: data.clone(),
            })
            .collect();
        query.run(candidates)
    }

    /// Applies `ops` to `documents`, failing without side effects if any op fails.
    fn apply_ops(&self, documents: &mut Documents, ops: &[WriteOp]) -> Result<(), Error> {
        let now = self.inner.time_provider.now();
        let mut staged = HashMap::<DocumentPath, Option<Map<String, Value>>>::new();

        for op in ops {
            let path = op.path();
            let current = match staged.get(path) {
                Some(current) => current.clone(),
                None => documents.get(path).cloned(),
            };

            let next = match op {
                WriteOp::Set { data, merge, .. } => {
                    let mut next = if *merge {
                        current.unwrap_or_default()
                    } else {
                        Map::new()
                    };
                    data.apply(&mut next, now, *merge);
                    Some(next)
                }
                WriteOp::Update { update, .. } => {
                    let Some(mut next) = current else {
                        return Err(Error::NotFound {
                            path: path.to_string(),
                        });
                    };
                    update.apply(&mut next, now, false);
                    Some(next)
                }
                WriteOp::Delete { .. } => None,
            };

            staged.insert(path.clone(), next);
        }

        for (path, data) in staged {
            match data {
                Some(data) => {
                    documents.insert(path, data);
                }
                None => {
                    documents.remove(&path);
                }
            }
        }
        Ok(())
    }

    fn write(&self, ops: Vec<WriteOp>) -> Result<(), Error> {
        {
            let documents = self.inner.documents.read();
            for op in &ops {
                let operation = match op {
                    WriteOp::Set { path, .. } if !documents.contains_key(path) => Operation::Create,
                    WriteOp::Set { .. } | WriteOp::Update { .. } => Operation::Update,
                    WriteOp::Delete { .. } => Operation::Delete,
                };
                self.authorize(operation, op.path())?;
            }
        }

        {
            let mut documents = self.inner.documents.write();
            self.apply_ops(&mut documents, &ops)?;
        }

        self.notify_watchers();
        Ok(())
    }

    fn notify_watchers(&self) {
        let mut watchers = self.inner.watchers.lock();
        let documents = self.inner.documents.read();

        watchers.documents.retain(|_, watcher| {
            let current = Self::snapshot(&documents, &watcher.path);
            if current == watcher.last {
                return true;
            }
            watcher.last = current.clone();
            watcher.sender.send(current).is_ok()
        });

        watchers.queries.retain(|_, watcher| {
            let current = Self::run_query(&documents, &watcher.query);
            if current == watcher.last {
                return true;
            }
            watcher.last = current.clone();
            watcher.sender.send(current).is_ok()
        });
    }

    fn cancel_handler(&self, id: u64) -> impl FnOnce() + Send + 'static {
        let inner: Weak<DatabaseInner> = Arc::downgrade(&self.inner);
        move || {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let mut watchers = inner.watchers.lock();
            watchers.documents.remove(&id);
            watchers.queries.remove(&id);
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    fn new_document_id(&self) -> String {
        self.inner.id_provider.new_id()
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<DocumentSnapshot>, Error> {
        self.authorize(Operation::Get, path)?;
        Ok(Self::snapshot(&self.inner.documents.read(), path))
    }

    async fn query(&self, query: &Query) -> Result<Vec<DocumentSnapshot>, Error> {
        self.authorize(Operation::List, &query.collection)?;
        Ok(Self::run_query(&self.inner.documents.read(), query))
    }

    async fn set(
        &self,
        path: &DocumentPath,
        data: DocumentUpdate,
        merge: bool,
    ) -> Result<(), Error> {
        self.write(vec![WriteOp::Set {
            path: path.clone(),
            data,
            merge,
        }])
    }

    async fn add(
        &self,
        collection: &CollectionPath,
        data: DocumentUpdate,
    ) -> Result<DocumentPath, Error> {
        let path = collection.doc(self.new_document_id())?;
        if self.inner.documents.read().contains_key(&path) {
            return Err(Error::AlreadyExists {
                path: path.to_string(),
            });
        }
        self.write(vec![WriteOp::Set {
            path: path.clone(),
            data,
            merge: false,
        }])?;
        Ok(path)
    }

    async fn update(&self, path: &DocumentPath, update: DocumentUpdate) -> Result<(), Error> {
        self.write(vec![WriteOp::Update {
            path: path.clone(),
            update,
        }])
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), Error> {
        self.write(vec![WriteOp::Delete { path: path.clone() }])
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), Error> {
        if batch.is_empty() {
            return Ok(());
        }
        let ops = batch.into_ops();
        let count = ops.len();
        self.write(ops).map_err(|err| {
            warn!("Failed to commit batch of {} writes: {}", count, err);
            err
        })
    }

    fn watch_document(
        &self,
        path: &DocumentPath,
    ) -> Result<Subscription<Option<DocumentSnapshot>>, Error> {
        self.authorize(Operation::Get, path)?;

        let (sender, receiver) = unbounded_channel();
        let mut watchers = self.inner.watchers.lock();
        let current = Self::snapshot(&self.inner.documents.read(), path);
        // The receiver is alive at this point so the send cannot fail.
        _ = sender.send(current.clone());

        let id = watchers.next_id;
        watchers.next_id += 1;
        watchers.documents.insert(
            id,
            DocumentWatcher {
                path: path.clone(),
                last: current,
                sender,
            },
        );

        Ok(Subscription::new(
            UnboundedReceiverStream::new(receiver),
            self.cancel_handler(id),
        ))
    }

    fn watch_query(&self, query: &Query) -> Result<Subscription<Vec<DocumentSnapshot>>, Error> {
        self.authorize(Operation::List, &query.collection)?;

        let (sender, receiver) = unbounded_channel();
        let mut watchers = self.inner.watchers.lock();
        let current = Self::run_query(&self.inner.documents.read(), query);
        _ = sender.send(current.clone());

        let id = watchers.next_id;
        watchers.next_id += 1;
        watchers.queries.insert(
            id,
            QueryWatcher {
                query: query.clone(),
                last: current,
                sender,
            },
        );

        Ok(Subscription::new(
            UnboundedReceiverStream::new(receiver),
            self.cancel_handler(id),
        ))
    }
}

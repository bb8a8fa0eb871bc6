// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::driver::Driver;
use crate::{
    encode, CollectionPath, Database, Document, DocumentPath, DocumentUpdate, Error, Query,
};

pub struct Store<D: Driver> {
    db: Arc<D::Database>,
}

impl<D: Driver> Clone for Store<D> {
    fn clone(&self) -> Self {
        Store {
            db: self.db.clone(),
        }
    }
}

impl<D: Driver> Store<D> {
    pub async fn open(driver: D) -> Result<Self, Error> {
        Ok(Self {
            db: Arc::new(driver.open().await?),
        })
    }

    /// The underlying database, e.g. to hand it out as `Arc<dyn Database>`.
    pub fn database(&self) -> Arc<D::Database> {
        self.db.clone()
    }
}

impl<D: Driver> Deref for Store<D> {
    type Target = D::Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl<D: Driver> Store<D> {
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        path: &DocumentPath,
    ) -> Result<Option<T>, Error> {
        self.db
            .get(path)
            .await?
            .map(|snapshot| snapshot.decode())
            .transpose()
    }

    pub async fn query_documents<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Vec<T>, Error> {
        self.db
            .query(query)
            .await?
            .iter()
            .map(|snapshot| snapshot.decode())
            .collect()
    }

    /// Replaces the document of a top-level record.
    pub async fn put_document<T: Document>(&self, value: &T) -> Result<(), Error> {
        let path = CollectionPath::root(T::collection())?.doc(value.id())?;
        self.db
            .set(&path, DocumentUpdate::from_data(encode(value)?), false)
            .await
    }

    /// Creates a document with a generated identifier in `collection`.
    pub async fn add_document<T: Serialize + Sync>(
        &self,
        collection: &CollectionPath,
        value: &T,
    ) -> Result<DocumentPath, Error> {
        self.db
            .add(collection, DocumentUpdate::from_data(encode(value)?))
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use crate::driver::memory::MemoryDriver;

    use super::*;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct Track {
        id: String,
        title: String,
    }

    impl Document for Track {
        type ID = String;

        fn id(&self) -> &Self::ID {
            &self.id
        }

        fn collection() -> &'static str {
            "music"
        }
    }

    #[tokio::test]
    async fn test_put_and_get_document() -> Result<(), Error> {
        let store = Store::open(MemoryDriver::new()).await?;
        let track = Track {
            id: "intro".to_string(),
            title: "Intro".to_string(),
        };

        store.put_document(&track).await?;

        let path = DocumentPath::parse("music/intro")?;
        assert_eq!(store.get_document::<Track>(&path).await?, Some(track));
        assert!(store.get(&path).await?.unwrap().data.get("id").is_none());
        Ok(())
    }
}

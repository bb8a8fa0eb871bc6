// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{DocumentPath, Error};

/// Key under which the document identifier is exposed to typed records. It is never persisted.
const ID_KEY: &str = "id";

/// A typed record stored in a collection. Usually implemented via `#[document]`.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    type ID: AsRef<str> + Send + Sync;

    fn id(&self) -> &Self::ID;
    fn collection() -> &'static str;
}

/// The contents of a document at a given point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub path: DocumentPath,
    pub data: Map<String, Value>,
}

impl DocumentSnapshot {
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// Deserializes the document, exposing its identifier under `id`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let mut data = self.data.clone();
        data.insert(ID_KEY.to_string(), Value::String(self.id().to_string()));
        Ok(serde_json::from_value(Value::Object(data))?)
    }
}

/// Serializes a record into document data, dropping its `id`.
pub fn encode<T: Serialize>(value: &T) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(value)? {
        Value::Object(mut data) => {
            data.remove(ID_KEY);
            Ok(data)
        }
        other => Err(Error::InvalidReference {
            reference: other.to_string(),
            reason: "documents must serialize to a map".to_string(),
        }),
    }
}

// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::query::compare_values;
use crate::FieldPath;

/// A single field-level mutation. All variants except `Set` are resolved against the state of
/// the document at the time the write is applied, which makes them safe under concurrent
/// writers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Set(Value),
    Delete,
    /// Appends every element not already contained in the array.
    ArrayUnion(Vec<Value>),
    /// Removes every occurrence of the given elements.
    ArrayRemove(Vec<Value>),
    /// Same as `ArrayRemove` but deletes the field if the array ends up empty.
    ArrayRemovePruning(Vec<Value>),
    /// Replaced with the store's clock (milliseconds since the epoch) when applied.
    ServerTimestamp,
    /// Keeps the greater of the current and the given value.
    Maximum(Value),
}

/// An ordered list of field updates applied to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUpdate {
    fields: Vec<(FieldPath, FieldUpdate)>,
}

impl DocumentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets every top-level key of `data`.
    pub fn from_data(data: Map<String, Value>) -> Self {
        Self {
            fields: data
                .into_iter()
                .map(|(key, value)| (FieldPath::from(key), FieldUpdate::Set(value)))
                .collect(),
        }
    }

    pub fn field(mut self, path: impl Into<FieldPath>, update: FieldUpdate) -> Self {
        self.fields.push((path.into(), update));
        self
    }

    pub fn set(self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.field(path, FieldUpdate::Set(value.into()))
    }

    pub fn delete(self, path: impl Into<FieldPath>) -> Self {
        self.field(path, FieldUpdate::Delete)
    }

    pub fn array_union(self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.field(path, FieldUpdate::ArrayUnion(vec![value.into()]))
    }

    pub fn array_remove(self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.field(path, FieldUpdate::ArrayRemove(vec![value.into()]))
    }

    pub fn array_remove_pruning(self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.field(path, FieldUpdate::ArrayRemovePruning(vec![value.into()]))
    }

    pub fn server_timestamp(self, path: impl Into<FieldPath>) -> Self {
        self.field(path, FieldUpdate::ServerTimestamp)
    }

    pub fn maximum(self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.field(path, FieldUpdate::Maximum(value.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[(FieldPath, FieldUpdate)] {
        &self.fields
    }

    /// Applies all field updates in order. With `merge`, map values are merged into existing
    /// maps instead of replacing them.
    pub(crate) fn apply(&self, data: &mut Map<String, Value>, now: DateTime<Utc>, merge: bool) {
        for (path, update) in &self.fields {
            let Some((key, parents)) = path.segments().split_last() else {
                continue;
            };

            match update {
                FieldUpdate::Set(value) => {
                    let Some(parent) = parent_mut(data, parents, true) else {
                        continue;
                    };
                    match (parent.get_mut(key), value) {
                        (Some(Value::Object(existing)), Value::Object(incoming)) if merge => {
                            merge_into(existing, incoming.clone())
                        }
                        _ => {
                            parent.insert(key.clone(), value.clone());
                        }
                    }
                }
                FieldUpdate::Delete => {
                    if let Some(parent) = parent_mut(data, parents, false) {
                        parent.remove(key);
                    }
                }
                FieldUpdate::ArrayUnion(values) => {
                    let Some(parent) = parent_mut(data, parents, true) else {
                        continue;
                    };
                    let entry = parent
                        .entry(key.clone())
                        .or_insert_with(|| Value::Array(vec![]));
                    if !entry.is_array() {
                        *entry = Value::Array(vec![]);
                    }
                    if let Value::Array(elements) = entry {
                        for value in values {
                            if !elements.contains(value) {
                                elements.push(value.clone());
                            }
                        }
                    }
                }
                FieldUpdate::ArrayRemove(values) | FieldUpdate::ArrayRemovePruning(values) => {
                    let Some(parent) = parent_mut(data, parents, false) else {
                        continue;
                    };
                    let is_empty = match parent.get_mut(key) {
                        Some(Value::Array(elements)) => {
                            elements.retain(|element| !values.contains(element));
                            elements.is_empty()
                        }
                        _ => false,
                    };
                    if is_empty && matches!(update, FieldUpdate::ArrayRemovePruning(_)) {
                        parent.remove(key);
                    }
                }
                FieldUpdate::ServerTimestamp => {
                    if let Some(parent) = parent_mut(data, parents, true) {
                        parent.insert(key.clone(), Value::from(now.timestamp_millis()));
                    }
                }
                FieldUpdate::Maximum(value) => {
                    let Some(parent) = parent_mut(data, parents, true) else {
                        continue;
                    };
                    let keep_current = parent
                        .get(key)
                        .map(|current| compare_values(current, value) != Ordering::Less)
                        .unwrap_or(false);
                    if !keep_current {
                        parent.insert(key.clone(), value.clone());
                    }
                }
            }
        }
    }
}

/// Recursively merges `source` into `target`. Nested maps are merged, everything else replaced.
pub(crate) fn merge_into(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming)
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

fn parent_mut<'a>(
    data: &'a mut Map<String, Value>,
    segments: &[String],
    create: bool,
) -> Option<&'a mut Map<String, Value>> {
    let mut current = data;
    for segment in segments {
        if create {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry.as_object_mut()?;
        } else {
            current = current.get_mut(segment)?.as_object_mut()?;
        }
    }
    Some(current)
}

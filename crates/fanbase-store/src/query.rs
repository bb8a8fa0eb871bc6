// fanbase/fanbase-store
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::{CollectionPath, DocumentSnapshot, FieldPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equal(FieldPath, Value),
}

/// A query over the documents of a single collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: CollectionPath,
    pub filters: Vec<Filter>,
    pub order_by: Vec<(FieldPath, QueryDirection)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(collection: CollectionPath) -> Self {
        Self {
            collection,
            filters: vec![],
            order_by: vec![],
            limit: None,
        }
    }

    pub fn filter_eq(mut self, field: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Equal(field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<FieldPath>, direction: QueryDirection) -> Self {
        self.order_by.push((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn matches(&self, data: &Map<String, Value>) -> bool {
        self.filters.iter().all(|filter| match filter {
            Filter::Equal(field, expected) => lookup(data, field) == Some(expected),
        })
    }

    /// Sorts `snapshots` by the configured order. Ties (and unordered queries) fall back to the
    /// document identifier so that results are stable.
    pub(crate) fn sort(&self, snapshots: &mut [DocumentSnapshot]) {
        snapshots.sort_by(|lhs, rhs| {
            for (field, direction) in &self.order_by {
                let ordering = compare_values(
                    lookup(&lhs.data, field).unwrap_or(&Value::Null),
                    lookup(&rhs.data, field).unwrap_or(&Value::Null),
                );
                let ordering = match direction {
                    QueryDirection::Ascending => ordering,
                    QueryDirection::Descending => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            lhs.path.id().cmp(rhs.path.id())
        })
    }

    pub(crate) fn run(&self, mut candidates: Vec<DocumentSnapshot>) -> Vec<DocumentSnapshot> {
        candidates.retain(|snapshot| self.matches(&snapshot.data));
        self.sort(&mut candidates);
        if let Some(limit) = self.limit {
            candidates.truncate(limit);
        }
        candidates
    }
}

pub(crate) fn lookup<'a>(data: &'a Map<String, Value>, field: &FieldPath) -> Option<&'a Value> {
    let (last, parents) = field.segments().split_last()?;
    let mut current = data;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(last)
}

/// Total order over JSON values. Values of different types are ranked
/// `null < bool < number < string < array < object`.
pub fn compare_values(lhs: &Value, rhs: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (lhs, rhs) {
        (Value::Bool(lhs), Value::Bool(rhs)) => lhs.cmp(rhs),
        (Value::Number(lhs), Value::Number(rhs)) => match (lhs.as_i64(), rhs.as_i64()) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => lhs
                .as_f64()
                .unwrap_or_default()
                .total_cmp(&rhs.as_f64().unwrap_or_default()),
        },
        (Value::String(lhs), Value::String(rhs)) => lhs.cmp(rhs),
        (Value::Array(lhs), Value::Array(rhs)) => {
            for (lhs, rhs) in lhs.iter().zip(rhs.iter()) {
                let ordering = compare_values(lhs, rhs);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            lhs.len().cmp(&rhs.len())
        }
        (Value::Object(lhs), Value::Object(rhs)) => lhs.len().cmp(&rhs.len()),
        _ => rank(lhs).cmp(&rank(rhs)),
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::domain::shared::models::UserId;

/// The identities that liked an entity, in the order they were added. Each identity appears at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<UserId>", into = "Vec<UserId>")]
pub struct LikeSet(IndexSet<UserId>);

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.0.contains(user_id)
    }

    /// Adds `user_id` if absent, removes it otherwise. Returns whether `user_id` is contained
    /// afterwards.
    pub fn toggle(&mut self, user_id: &UserId) -> bool {
        if self.0.shift_remove(user_id) {
            return false;
        }
        self.0.insert(user_id.clone());
        true
    }

    pub fn insert(&mut self, user_id: UserId) -> bool {
        self.0.insert(user_id)
    }

    pub fn remove(&mut self, user_id: &UserId) -> bool {
        self.0.shift_remove(user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

impl From<Vec<UserId>> for LikeSet {
    fn from(value: Vec<UserId>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl From<LikeSet> for Vec<UserId> {
    fn from(value: LikeSet) -> Self {
        value.0.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for LikeSet {
    fn from(value: [&str; N]) -> Self {
        Self(value.into_iter().map(UserId::from).collect())
    }
}

impl FromIterator<UserId> for LikeSet {
    fn from_iter<T: IntoIterator<Item = UserId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fanbase_utils::id_string;

use crate::domain::engagement::models::LikeSet;
use crate::domain::shared::models::UserId;

id_string!(
    /// A single emoji symbol used as a reaction key.
    Emoji
);

/// Emoji reactions of an entity. No emoji ever maps to an empty set of reactors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Emoji, LikeSet>",
    into = "BTreeMap<Emoji, LikeSet>"
)]
pub struct ReactionMap(BTreeMap<Emoji, LikeSet>);

impl ReactionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reactors(&self, emoji: &Emoji) -> Option<&LikeSet> {
        self.0.get(emoji)
    }

    pub fn contains(&self, emoji: &Emoji, user_id: &UserId) -> bool {
        self.0
            .get(emoji)
            .map(|reactors| reactors.contains(user_id))
            .unwrap_or(false)
    }

    /// Toggles the membership of `user_id` in the bucket of `emoji`, dropping the bucket if it
    /// ends up empty. Returns whether `user_id` reacted with `emoji` afterwards.
    pub fn toggle(&mut self, emoji: &Emoji, user_id: &UserId) -> bool {
        let reactors = self.0.entry(emoji.clone()).or_default();
        let is_present = reactors.toggle(user_id);
        if reactors.is_empty() {
            self.0.remove(emoji);
        }
        is_present
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Emoji, &LikeSet)> {
        self.0.iter()
    }
}

impl From<BTreeMap<Emoji, LikeSet>> for ReactionMap {
    fn from(value: BTreeMap<Emoji, LikeSet>) -> Self {
        Self(
            value
                .into_iter()
                .filter(|(_, reactors)| !reactors.is_empty())
                .collect(),
        )
    }
}

impl From<ReactionMap> for BTreeMap<Emoji, LikeSet> {
    fn from(value: ReactionMap) -> Self {
        value.0
    }
}

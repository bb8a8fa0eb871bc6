// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::engagement::models::{Emoji, LikeSet, ReactionMap};
use crate::domain::shared::models::{EntityRef, UserId};

/// Likes and reactions toggled locally whose writes have not been observed by a read yet, keyed
/// by the liked entity.
/// Subsequent toggles build on these instead of on a possibly stale stored state, which keeps
/// toggling twice in a row idempotent.
///
/// A toggle reads the stored state first. Reads are tracked with a `ReadTicket` so that a read
/// which started before one of our writes completed is recognized as stale even if the write
/// finished while the read was under way.
#[derive(Debug)]
pub struct PendingEngagement<K = EntityRef> {
    entries: HashMap<K, PendingEntry>,
    generation: u64,
}

impl<K> Default for PendingEngagement<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generation: 0,
        }
    }
}

/// The point in time a read of the stored state started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

#[derive(Debug, Default)]
struct PendingEntry {
    likes: Option<LikeSet>,
    reactions: Option<ReactionMap>,
    in_flight: usize,
    readers: usize,
    /// Generation of the last completed write.
    completed_at: u64,
}

impl PendingEntry {
    /// Whether a read taken with `ticket` may miss one of our writes.
    fn is_stale(&self, ticket: ReadTicket) -> bool {
        self.in_flight > 0 || self.completed_at > ticket.0
    }
}

impl<K: Clone + Eq + Hash> PendingEngagement<K> {
    /// Registers a read of the stored state of `entity`. Every ticket must be handed back
    /// through a toggle or `cancel_read`.
    pub fn begin_read(&mut self, entity: &K) -> ReadTicket {
        self.entries.entry(entity.clone()).or_default().readers += 1;
        ReadTicket(self.generation)
    }

    /// Gives back the ticket of a read that failed.
    pub fn cancel_read(&mut self, entity: &K) {
        if let Some(entry) = self.entries.get_mut(entity) {
            entry.readers = entry.readers.saturating_sub(1);
        }
        self.prune(entity);
    }

    /// Returns the new likes of `entity` and whether `user_id` is contained in them. `stored`
    /// is the result of the read started with `ticket`.
    pub fn toggle_like(
        &mut self,
        entity: &K,
        ticket: ReadTicket,
        stored: &LikeSet,
        user_id: &UserId,
    ) -> (LikeSet, bool) {
        let entry = self.entries.entry(entity.clone()).or_default();
        entry.readers = entry.readers.saturating_sub(1);
        if !entry.is_stale(ticket) {
            entry.likes = None;
        }
        let likes = entry.likes.get_or_insert_with(|| stored.clone());
        let is_liked = likes.toggle(user_id);
        entry.in_flight += 1;
        (likes.clone(), is_liked)
    }

    /// Returns the new reactions of `entity` and whether `user_id` reacted with `emoji`.
    pub fn toggle_reaction(
        &mut self,
        entity: &K,
        ticket: ReadTicket,
        stored: &ReactionMap,
        emoji: &Emoji,
        user_id: &UserId,
    ) -> (ReactionMap, bool) {
        let entry = self.entries.entry(entity.clone()).or_default();
        entry.readers = entry.readers.saturating_sub(1);
        if !entry.is_stale(ticket) {
            entry.reactions = None;
        }
        let reactions = entry.reactions.get_or_insert_with(|| stored.clone());
        let has_reacted = reactions.toggle(emoji, user_id);
        entry.in_flight += 1;
        (reactions.clone(), has_reacted)
    }

    /// Marks one write of `entity` as completed. A failed write discards the local state of the
    /// entity so that the stored state is used again.
    pub fn complete(&mut self, entity: &K, succeeded: bool) {
        self.generation += 1;
        let generation = self.generation;

        let Some(entry) = self.entries.get_mut(entity) else {
            return;
        };
        entry.in_flight = entry.in_flight.saturating_sub(1);
        entry.completed_at = generation;
        if !succeeded {
            entry.likes = None;
            entry.reactions = None;
        }
        self.prune(entity);
    }

    /// Whether writes of `entity` are still under way.
    pub fn is_pending(&self, entity: &K) -> bool {
        self.entries
            .get(entity)
            .map(|entry| entry.in_flight > 0)
            .unwrap_or(false)
    }

    /// Forgets `entity` once no write and no read can depend on its local state anymore.
    fn prune(&mut self, entity: &K) {
        let is_settled = self
            .entries
            .get(entity)
            .map(|entry| entry.in_flight == 0 && entry.readers == 0)
            .unwrap_or(false);
        if is_settled {
            self.entries.remove(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_toggles_build_on_pending_state() {
        let mut pending = PendingEngagement::default();
        let entity = EntityRef::Message("m1".into());
        let stored = LikeSet::new();
        let user = UserId::from("x");

        let ticket = pending.begin_read(&entity);
        let (likes, is_liked) = pending.toggle_like(&entity, ticket, &stored, &user);
        assert!(is_liked);
        assert_eq!(likes, LikeSet::from(["x"]));

        // The stored state has not caught up yet.
        let ticket = pending.begin_read(&entity);
        let (likes, is_liked) = pending.toggle_like(&entity, ticket, &stored, &user);
        assert!(!is_liked);
        assert!(likes.is_empty());

        pending.complete(&entity, true);
        assert!(pending.is_pending(&entity));
        pending.complete(&entity, true);
        assert!(!pending.is_pending(&entity));
    }

    #[test]
    fn test_read_overlapping_a_completed_write_is_stale() {
        let mut pending = PendingEngagement::default();
        let entity = EntityRef::Message("m1".into());
        let before_write = LikeSet::new();
        let user = UserId::from("x");

        let ticket = pending.begin_read(&entity);
        pending.toggle_like(&entity, ticket, &before_write, &user);

        // The next read starts while the like is in flight and returns after it landed.
        let ticket = pending.begin_read(&entity);
        pending.complete(&entity, true);
        let (likes, is_liked) = pending.toggle_like(&entity, ticket, &before_write, &user);

        assert!(!is_liked);
        assert!(likes.is_empty());
    }

    #[test]
    fn test_fresh_read_replaces_settled_state() {
        let mut pending = PendingEngagement::default();
        let entity = EntityRef::Message("m1".into());
        let user = UserId::from("x");

        let ticket = pending.begin_read(&entity);
        pending.toggle_like(&entity, ticket, &LikeSet::new(), &user);
        pending.complete(&entity, true);

        // Someone else unliked in the meantime; a read started afterwards is authoritative.
        let ticket = pending.begin_read(&entity);
        let (likes, is_liked) = pending.toggle_like(&entity, ticket, &LikeSet::from(["y"]), &user);

        assert!(is_liked);
        assert_eq!(likes, LikeSet::from(["y", "x"]));
    }

    #[test]
    fn test_failure_discards_local_state() {
        let mut pending = PendingEngagement::default();
        let entity = EntityRef::comment("intro", "c1");

        let ticket = pending.begin_read(&entity);
        pending.toggle_reaction(&entity, ticket, &ReactionMap::new(), &"🔥".into(), &"x".into());
        let ticket = pending.begin_read(&entity);
        pending.toggle_reaction(&entity, ticket, &ReactionMap::new(), &"🎉".into(), &"x".into());
        pending.complete(&entity, false);
        assert!(pending.is_pending(&entity));

        let ticket = pending.begin_read(&entity);
        let (reactions, has_reacted) = pending.toggle_reaction(
            &entity,
            ticket,
            &ReactionMap::new(),
            &"🔥".into(),
            &"x".into(),
        );
        assert!(has_reacted);
        assert!(reactions.contains(&"🔥".into(), &"x".into()));
    }

    #[test]
    fn test_entries_are_released() {
        let mut pending = PendingEngagement::default();
        let entity = EntityRef::Message("m1".into());

        pending.begin_read(&entity);
        pending.cancel_read(&entity);
        assert!(pending.entries.is_empty());

        let ticket = pending.begin_read(&entity);
        pending.toggle_like(&entity, ticket, &LikeSet::new(), &"x".into());
        pending.complete(&entity, true);
        assert!(pending.entries.is_empty());
    }
}

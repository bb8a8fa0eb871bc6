// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::domain::comments::models::Comment;
use crate::domain::shared::models::{ClientCommentId, CommentId, ServerCommentId};

/// Merges locally staged comments and optimistic edits with the confirmed comments delivered by
/// the store. Confirmed comments are authoritative: reconciling drops provisional comments the
/// store has confirmed and every local edit of a comment whose stored version changed.
#[derive(Debug, Default)]
pub struct CommentOverlay {
    remote: Vec<Comment>,
    provisional: IndexMap<ClientCommentId, Comment>,
    patches: HashMap<ServerCommentId, Comment>,
    hidden: HashSet<ServerCommentId>,
}

impl CommentOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provisional comment. Comments with a confirmed id are ignored.
    pub fn stage(&mut self, comment: Comment) {
        let CommentId::Provisional(ref client_id) = comment.id else {
            return;
        };
        self.provisional.insert(client_id.clone(), comment);
    }

    /// Drops a provisional comment, e.g. because posting it failed or it was deleted before
    /// being confirmed.
    pub fn discard(&mut self, client_id: &ClientCommentId) -> bool {
        self.provisional.shift_remove(client_id).is_some()
    }

    /// Applies `edit` to the current local version of the comment with `id`.
    pub fn patch(&mut self, id: &CommentId, edit: impl FnOnce(&mut Comment)) -> bool {
        match id {
            CommentId::Provisional(client_id) => match self.provisional.get_mut(client_id) {
                Some(comment) => {
                    edit(comment);
                    true
                }
                None => false,
            },
            CommentId::Confirmed(server_id) => {
                if !self.patches.contains_key(server_id) {
                    let Some(remote) = self.remote.iter().find(|c| &c.id == id) else {
                        return false;
                    };
                    self.patches.insert(server_id.clone(), remote.clone());
                }
                match self.patches.get_mut(server_id) {
                    Some(comment) => {
                        edit(comment);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Forgets local edits of a confirmed comment so that the stored version shows again.
    pub fn revert(&mut self, id: &ServerCommentId) {
        self.patches.remove(id);
        self.hidden.remove(id);
    }

    /// Hides a confirmed comment until the store reports its deletion.
    pub fn hide(&mut self, id: &ServerCommentId) {
        self.hidden.insert(id.clone());
    }

    pub fn reconcile(&mut self, remote: Vec<Comment>) {
        let previous = self
            .remote
            .iter()
            .filter_map(|comment| Some((comment.id.confirmed()?, comment)))
            .collect::<HashMap<_, _>>();
        let current = remote
            .iter()
            .filter_map(|comment| Some((comment.id.confirmed()?, comment)))
            .collect::<HashMap<_, _>>();

        let confirmed_refs = remote
            .iter()
            .filter_map(|comment| comment.client_ref.as_ref())
            .collect::<HashSet<_>>();

        self.provisional
            .retain(|client_id, _| !confirmed_refs.contains(client_id));
        // A patch outlives deliveries that leave its comment untouched.
        self.patches.retain(|id, _| match (previous.get(id), current.get(id)) {
            (Some(before), Some(after)) => before == after,
            _ => false,
        });
        self.hidden.retain(|id| current.contains_key(id));

        self.remote = remote;
    }

    /// Provisional comments, newest first, followed by the confirmed comments in the order the
    /// store delivered them.
    pub fn merged(&self) -> Vec<Comment> {
        let provisional = self.provisional.values().rev().cloned();
        let confirmed = self.remote.iter().filter_map(|comment| {
            let Some(id) = comment.id.confirmed() else {
                return Some(comment.clone());
            };
            if self.hidden.contains(id) {
                return None;
            }
            Some(self.patches.get(id).unwrap_or(comment).clone())
        });
        provisional.chain(confirmed).collect()
    }

    /// The server id of the stored comment that was posted as `client_ref`, once the store
    /// delivered it.
    pub fn confirmed_id(&self, client_ref: &ClientCommentId) -> Option<&ServerCommentId> {
        self.remote
            .iter()
            .find(|comment| comment.client_ref.as_ref() == Some(client_ref))
            .and_then(|comment| comment.id.confirmed())
    }

    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        match id {
            CommentId::Provisional(client_id) => self.provisional.get(client_id),
            CommentId::Confirmed(server_id) => self
                .patches
                .get(server_id)
                .or_else(|| self.remote.iter().find(|c| &c.id == id)),
        }
    }
}

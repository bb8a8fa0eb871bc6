// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::engagement::models::{Emoji, SenderRole};
use crate::domain::shared::models::{EntityRef, ThreadId};

/// Activity on an entity that its owner gets notified about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Like,
    Reaction(Emoji),
    Reply,
}

/// Content and link of a notification that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub content: String,
    pub link: String,
}

impl NotificationDraft {
    pub fn new(content: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            link: link.into(),
        }
    }

    /// Describes `activity` by someone acting as `actor_role` on `entity`. `excerpt` is the
    /// text of the entity, shortened to `snippet_length` characters.
    pub fn for_activity(
        activity: &Activity,
        entity: &EntityRef,
        excerpt: &str,
        actor_role: SenderRole,
        snippet_length: usize,
    ) -> Self {
        match entity {
            EntityRef::Message(id) => {
                let actor = match actor_role {
                    SenderRole::Operator => "An admin",
                    SenderRole::Subject => "Someone",
                };
                let action = match activity {
                    Activity::Like => "liked".to_string(),
                    Activity::Reaction(emoji) => format!("reacted with {} to", emoji),
                    Activity::Reply => "replied to".to_string(),
                };
                Self::new(
                    format!(
                        r#"{} {} your message: "{}...""#,
                        actor,
                        action,
                        snippet(excerpt, snippet_length)
                    ),
                    message_link(id),
                )
            }
            EntityRef::Comment { track, .. } => {
                let content = match activity {
                    Activity::Like => {
                        format!(r#"Someone liked your comment on the track "{}"."#, track)
                    }
                    Activity::Reaction(emoji) => format!(
                        r#"Someone reacted with {} to your comment on "{}"."#,
                        emoji, track
                    ),
                    Activity::Reply => {
                        format!(r#"Someone replied to your comment on "{}"."#, track)
                    }
                };
                Self::new(content, format!("/music#{}", track))
            }
        }
    }

    /// Announces a message the operator started with a fan.
    pub fn direct_message(thread_id: &ThreadId, body: &str, snippet_length: usize) -> Self {
        Self::new(
            format!(
                r#"The artist sent you a message: "{}...""#,
                snippet(body, snippet_length)
            ),
            message_link(thread_id),
        )
    }
}

fn message_link(id: &ThreadId) -> String {
    format!("/messages/{}", id)
}

/// The first `length` characters of `text`.
fn snippet(text: &str, length: usize) -> &str {
    match text.char_indices().nth(length) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

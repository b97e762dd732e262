//! The shared conversation transcript.
//!
//! One transcript is shared by every provider in a session: a turn
//! produced by Claude is part of the context ChatGPT sees on the next
//! mention, and vice versa. Providers receive the full transcript and
//! must never filter it by [`Turn::origin`] — that field exists for
//! display and logging only.

use serde::{Deserialize, Serialize};

/// Origin tag for user-authored turns.
pub const USER_ORIGIN: &str = "user";

/// Who authored a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// The wire-format role string (`"user"` / `"assistant"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One exchange unit in the shared transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Provider name that produced an assistant turn, or `"user"`.
    /// Never used for routing decisions.
    pub origin: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: content.into(),
            origin: USER_ORIGIN.to_string(),
        }
    }

    /// Create an assistant turn tagged with the provider that produced it.
    pub fn assistant(content: impl Into<String>, origin: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            content: content.into(),
            origin: origin.into(),
        }
    }
}

/// Append-only ordered sequence of turns.
///
/// Created empty at session start, grown one exchange at a time, and
/// dropped with the process — there is no persistence and no size
/// bound. The single mutation besides `append` is [`rollback_last`],
/// which the router uses to drop a user turn whose provider call
/// failed, so every user turn that stays in the transcript has a
/// matching assistant reply.
///
/// [`rollback_last`]: Transcript::rollback_last
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Transcript::default()
    }

    /// Append a turn to the end. O(1).
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Read-only view of the full ordered sequence.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    /// Remove and return the most recently appended turn.
    pub fn rollback_last(&mut self) -> Option<Turn> {
        self.turns.pop()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_origin() {
        let turn = Turn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.origin, "user");
    }

    #[test]
    fn test_assistant_turn_tagged_with_provider() {
        let turn = Turn::assistant("hi there", "chatgpt");
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.origin, "chatgpt");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("first"));
        transcript.append(Turn::assistant("second", "claude"));
        transcript.append(Turn::user("third"));

        let turns = transcript.snapshot();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "first");
        assert_eq!(turns[1].content, "second");
        assert_eq!(turns[2].content, "third");
    }

    #[test]
    fn test_rollback_last_removes_newest() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("kept"));
        transcript.append(Turn::user("dropped"));

        let removed = transcript.rollback_last().unwrap();
        assert_eq!(removed.content, "dropped");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.snapshot()[0].content, "kept");
    }

    #[test]
    fn test_rollback_empty() {
        let mut transcript = Transcript::new();
        assert!(transcript.rollback_last().is_none());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}

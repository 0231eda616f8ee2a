//! Append-only conversation log.
//!
//! The log is the single source of truth for redrawing a session: a renderer
//! walks [`ConversationLog::turns`] from the top on every redraw.

use crate::content::Content;
use crate::types::Mode;
use serde::{Deserialize, Serialize};

/// One entry in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "payload", rename_all = "lowercase")]
pub enum Turn {
    /// What the user typed
    User(String),

    /// Record assembled for the reply
    Assistant(Content),
}

impl Turn {
    pub fn user(message: impl Into<String>) -> Self {
        Turn::User(message.into())
    }

    pub fn assistant(content: Content) -> Self {
        Turn::Assistant(content)
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Turn::User(_))
    }

    /// Mode an assistant turn was produced in.
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Turn::User(_) => None,
            Turn::Assistant(content) => Some(content.mode()),
        }
    }
}

/// Ordered turns of one session. Turns can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. Payload shape is the caller's responsibility.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        tracing::trace!("Conversation log now holds {} turns", self.turns.len());
    }

    /// Append a user message and the assistant reply to it, returning the
    /// reply as stored.
    pub fn append_exchange(&mut self, message: impl Into<String>, content: Content) -> &Content {
        self.append(Turn::user(message));
        self.append(Turn::assistant(content));

        match self.turns.last() {
            Some(Turn::Assistant(content)) => content,
            _ => unreachable!("assistant turn was just appended"),
        }
    }

    /// All turns in the order they were appended.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{NoMatch, SearchContent};
    use serde_json::json;

    fn search_turn_content() -> Content {
        Content::Search(SearchContent::NoMatch(NoMatch::new("none")))
    }

    fn search_turn() -> Turn {
        Turn::assistant(search_turn_content())
    }

    #[test]
    fn test_new_log_is_empty() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.turns().is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn test_turns_replay_in_append_order() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("where is the travel policy?"));
        log.append(search_turn());
        log.append(Turn::user("thanks"));

        let first: Vec<Turn> = log.turns().to_vec();
        let second: Vec<Turn> = log.iter().cloned().collect();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(first[0], Turn::user("where is the travel policy?"));
        assert_eq!(first[1].mode(), Some(Mode::Search));
        assert_eq!(first[2], Turn::user("thanks"));
    }

    #[test]
    fn test_append_grows_by_one() {
        let mut log = ConversationLog::new();
        for i in 0..10 {
            log.append(Turn::user(format!("message {}", i)));
            assert_eq!(log.len(), i + 1);
            assert_eq!(log.last(), Some(&Turn::user(format!("message {}", i))));
        }

        let messages: Vec<_> = (&log)
            .into_iter()
            .map(|turn| match turn {
                Turn::User(message) => message.clone(),
                Turn::Assistant(_) => unreachable!(),
            })
            .collect();
        assert_eq!(messages[0], "message 0");
        assert_eq!(messages[9], "message 9");
    }

    #[test]
    fn test_append_exchange_returns_stored_reply() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("earlier"));

        let reply = log.append_exchange("where?", search_turn_content());
        assert_eq!(reply, &search_turn_content());

        assert_eq!(log.len(), 3);
        assert_eq!(log.turns()[1], Turn::user("where?"));
        assert_eq!(log.last(), Some(&search_turn()));
    }

    #[test]
    fn test_append_does_not_validate_shape() {
        let mut log = ConversationLog::new();
        log.append(search_turn());
        log.append(search_turn());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_turn_serialization() {
        assert_eq!(
            serde_json::to_value(Turn::user("hello")).unwrap(),
            json!({"role": "user", "payload": "hello"})
        );
        assert_eq!(
            serde_json::to_value(search_turn()).unwrap(),
            json!({
                "role": "assistant",
                "payload": {"mode": "search", "noMatch": true, "answer": "none"}
            })
        );
    }

    #[test]
    fn test_log_serializes_as_array() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("hi"));

        assert_eq!(
            serde_json::to_value(&log).unwrap(),
            json!([{"role": "user", "payload": "hi"}])
        );
    }

    #[test]
    fn test_turn_round_trip() {
        let turn = search_turn();
        let json = serde_json::to_string(&turn).unwrap();
        let decoded: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, turn);
    }
}

//! Chat identity, inbound message shape, and the per-chat state unit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cadence::CadenceTrigger;
use crate::config::ChatConfig;
use crate::context::ContextBuffer;
use crate::session::Session;

/// Stable identifier of a chat on the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A text message as delivered by the platform adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    /// Display name of the sender, used as the context-buffer author
    pub sender: String,
    pub text: String,
    /// Group or supergroup chat (as opposed to one-to-one)
    pub is_group: bool,
}

impl InboundMessage {
    #[must_use]
    pub fn new(chat_id: impl Into<ChatId>, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender: sender.into(),
            text: text.into(),
            is_group: false,
        }
    }

    #[must_use]
    pub const fn in_group(mut self) -> Self {
        self.is_group = true;
        self
    }
}

/// Everything mutated when a message for one chat is processed.
///
/// Session, context buffer and cadence counter change together, so callers
/// hold one lock around the whole value.
#[derive(Debug, Clone)]
pub struct ChatState {
    pub session: Session,
    pub context: ContextBuffer,
    pub cadence: CadenceTrigger,
}

impl ChatState {
    #[must_use]
    pub fn new(chat_id: ChatId, config: &ChatConfig) -> Self {
        Self {
            session: Session::new(chat_id),
            context: ContextBuffer::new(config.context_limits()),
            cadence: CadenceTrigger::new(config.joke_window),
        }
    }

    /// Drop buffered context, zero the counter, and return to normal mode.
    pub fn clear(&mut self) {
        self.context.clear();
        self.cadence.reset();
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrategyIntent;
    use crate::session::ChatMode;

    #[test]
    fn clear_resets_all_parts() {
        let mut state = ChatState::new(ChatId(-100), &ChatConfig::default());
        state.context.append("ana", "hola");
        state.cadence.increment();
        state.session.await_payload(StrategyIntent::RefundRejection);

        state.clear();

        assert!(state.context.is_empty());
        assert_eq!(state.cadence.count(), 0);
        assert_eq!(state.session.mode(), ChatMode::Normal);
    }

    #[test]
    fn chat_id_displays_raw_value() {
        assert_eq!(ChatId(-1_001_234).to_string(), "-1001234");
    }
}

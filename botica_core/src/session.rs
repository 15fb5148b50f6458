//! Per-chat conversational state.
//!
//! A chat is either in normal chatter or waiting for the conversation
//! payload of a sales-advisory command that arrived without one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::chat::ChatId;
use crate::strategy::StrategyIntent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatMode {
    #[default]
    Normal,
    AwaitingRefundInput,
    AwaitingUpsellInput,
    AwaitingMotivationInput,
}

impl ChatMode {
    /// Awaiting state for an intent that takes a conversation payload.
    #[must_use]
    pub const fn awaiting(intent: StrategyIntent) -> Option<Self> {
        match intent {
            StrategyIntent::RefundRejection => Some(Self::AwaitingRefundInput),
            StrategyIntent::Upselling => Some(Self::AwaitingUpsellInput),
            StrategyIntent::PurchaseMotivation => Some(Self::AwaitingMotivationInput),
            StrategyIntent::Joke => None,
        }
    }

    /// Intent whose payload this state is waiting for.
    #[must_use]
    pub const fn pending_intent(self) -> Option<StrategyIntent> {
        match self {
            Self::Normal => None,
            Self::AwaitingRefundInput => Some(StrategyIntent::RefundRejection),
            Self::AwaitingUpsellInput => Some(StrategyIntent::Upselling),
            Self::AwaitingMotivationInput => Some(StrategyIntent::PurchaseMotivation),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::AwaitingRefundInput => "AWAITING_REFUND_INPUT",
            Self::AwaitingUpsellInput => "AWAITING_UPSELL_INPUT",
            Self::AwaitingMotivationInput => "AWAITING_MOTIVATION_INPUT",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub chat_id: ChatId,
    mode: ChatMode,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            mode: ChatMode::Normal,
            last_activity: Utc::now(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Wait for the payload of `intent`. Returns false, leaving the state
    /// untouched, for intents that take no payload.
    pub const fn await_payload(&mut self, intent: StrategyIntent) -> bool {
        match ChatMode::awaiting(intent) {
            Some(mode) => {
                self.mode = mode;
                true
            }
            None => false,
        }
    }

    /// Consume the pending payload request, returning to `Normal`.
    pub const fn take_pending(&mut self) -> Option<StrategyIntent> {
        let pending = self.mode.pending_intent();
        self.mode = ChatMode::Normal;
        pending
    }

    pub const fn reset(&mut self) {
        self.mode = ChatMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_normal() {
        let session = Session::new(ChatId(7));
        assert_eq!(session.mode(), ChatMode::Normal);
    }

    #[test]
    fn awaiting_round_trips_through_pending_intent() {
        for intent in StrategyIntent::ALL {
            match ChatMode::awaiting(intent) {
                Some(mode) => assert_eq!(mode.pending_intent(), Some(intent)),
                None => assert_eq!(intent, StrategyIntent::Joke),
            }
        }
    }

    #[test]
    fn take_pending_returns_to_normal() {
        let mut session = Session::new(ChatId(1));
        assert!(session.await_payload(StrategyIntent::Upselling));
        assert_eq!(session.mode(), ChatMode::AwaitingUpsellInput);

        assert_eq!(session.take_pending(), Some(StrategyIntent::Upselling));
        assert_eq!(session.mode(), ChatMode::Normal);
        assert_eq!(session.take_pending(), None);
    }

    #[test]
    fn joke_never_awaits_payload() {
        let mut session = Session::new(ChatId(1));
        assert!(!session.await_payload(StrategyIntent::Joke));
        assert_eq!(session.mode(), ChatMode::Normal);
    }
}

use botica_core::{
    ChatConfig, ChatId, ChatMode, ChatState, Error, InboundMessage, StrategyIntent,
    StrategyRegistry, validate_payload,
};
use chrono::Local;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::replies::{self, StatusReport};
use crate::stats::{Statistics, StatsSnapshot};
use crate::table::ChatTable;

/// Context handed to a manual joke when the chat has nothing buffered.
const EMPTY_CONTEXT_PLACEHOLDER: &str = "conversación general";

/// Routes inbound messages to commands, the session state machine, and the
/// automatic-joke cadence.
///
/// A message holds its chat's lock for the whole of its processing,
/// including any AI call, so a cadence fire and its counter reset cannot
/// interleave with the next message of the same chat. A message never
/// waits on another chat's lock: status views read the summaries each chat
/// publishes when its message is done.
pub struct Dispatcher {
    registry: Arc<StrategyRegistry>,
    chats: ChatTable,
    stats: Statistics,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: Arc<StrategyRegistry>, config: ChatConfig) -> Self {
        info!(
            "Dispatcher ready: context {} entries / {} chars, joke window {}..={}",
            config.context_max_entries,
            config.context_max_chars,
            config.joke_window.min,
            config.joke_window.max
        );
        Self {
            registry,
            chats: ChatTable::new(config),
            stats: Statistics::new(),
        }
    }

    /// Process one inbound message and return the reply to send, if any.
    ///
    /// Only blank-ness is judged on trimmed text. Payloads and buffered
    /// lines keep the text as sent.
    pub async fn handle(&self, msg: &InboundMessage) -> Option<String> {
        let text = msg.text.as_str();
        if text.trim().is_empty() {
            return None;
        }

        let preview: String = text.trim().chars().take(50).collect();
        info!("[chat {}] {}: {preview}", msg.chat_id, msg.sender);
        self.stats.record_message();

        let cell = self.chats.get_or_create(msg.chat_id);
        let mut chat = cell.lock().await;
        chat.session.touch();

        let reply = match Command::parse(text) {
            Some(command) => Some(self.handle_command(&mut chat, command).await),
            None => self.handle_freeform(&mut chat, msg, text).await,
        };
        self.chats.publish(&chat);
        reply
    }

    async fn handle_command(&self, chat: &mut ChatState, command: Command) -> String {
        let chat_id = chat.session.chat_id;
        debug!("[chat {chat_id}] command {command:?}");

        match command {
            Command::Start => {
                chat.session.reset();
                replies::welcome().to_string()
            }
            Command::Help => replies::help().to_string(),
            Command::Joke => self.manual_joke(chat).await,
            Command::Advise {
                intent,
                payload: Some(payload),
            } => {
                chat.session.reset();
                self.advise(chat_id, intent, &payload).await
            }
            Command::Advise {
                intent,
                payload: None,
            } => {
                if chat.session.await_payload(intent) {
                    info!("[chat {chat_id}] awaiting payload for {intent}");
                }
                replies::payload_prompt(intent).to_string()
            }
            Command::GeneralAnalysis(None) => replies::general_payload_prompt().to_string(),
            Command::GeneralAnalysis(Some(payload)) => match validate_payload(&payload) {
                Ok(conversation) => {
                    info!(
                        "[chat {chat_id}] general analysis of {}-char conversation",
                        conversation.chars().count()
                    );
                    replies::general_analysis(conversation, Local::now())
                }
                Err(e) => {
                    debug!("[chat {chat_id}] payload rejected: {e}");
                    replies::invalid_conversation()
                }
            },
            Command::SalesHelp => replies::sales_help().to_string(),
            Command::Status => {
                self.chats.publish(chat);
                self.status().await
            }
            Command::ClearContext => {
                chat.clear();
                info!("[chat {chat_id}] context cleared");
                replies::context_cleared().to_string()
            }
            Command::Unknown(token) => replies::unknown_command(&token),
        }
    }

    async fn handle_freeform(
        &self,
        chat: &mut ChatState,
        msg: &InboundMessage,
        text: &str,
    ) -> Option<String> {
        if let Some(intent) = chat.session.take_pending() {
            return Some(self.advise(msg.chat_id, intent, text).await);
        }

        // One-to-one chats get no automatic jokes, so they keep no cadence state
        if !msg.is_group {
            return None;
        }

        chat.context.append(msg.sender.as_str(), text);
        let count = chat.cadence.increment();
        if !chat.cadence.should_fire(count) {
            return None;
        }

        self.automatic_joke(chat).await
    }

    /// Fire attempt inside the cadence window. The counter is reset only
    /// when a joke is produced.
    async fn automatic_joke(&self, chat: &mut ChatState) -> Option<String> {
        let chat_id = chat.session.chat_id;
        let context = chat.context.render();

        if !self.registry.admits(StrategyIntent::Joke, &context) {
            info!(
                "[chat {chat_id}] context not suitable for a joke (count {})",
                chat.cadence.count()
            );
            return None;
        }

        match self.registry.dispatch(StrategyIntent::Joke, &context).await {
            Ok(joke) => {
                chat.cadence.reset();
                self.stats.record_automatic_joke();
                info!("[chat {chat_id}] automatic joke sent");
                Some(joke)
            }
            Err(e) => {
                Self::log_failure(chat_id, &e);
                None
            }
        }
    }

    async fn manual_joke(&self, chat: &ChatState) -> String {
        let chat_id = chat.session.chat_id;
        let mut context = chat.context.render();
        if context.is_empty() {
            context = EMPTY_CONTEXT_PLACEHOLDER.to_string();
        }

        match self.registry.dispatch(StrategyIntent::Joke, &context).await {
            Ok(joke) => {
                self.stats.record_manual_joke();
                joke
            }
            Err(e) => {
                Self::log_failure(chat_id, &e);
                Self::failure_reply(StrategyIntent::Joke, &e)
            }
        }
    }

    /// Validate a conversation payload and run a sales intent on it.
    async fn advise(&self, chat_id: ChatId, intent: StrategyIntent, payload: &str) -> String {
        let conversation = match validate_payload(payload) {
            Ok(conversation) => conversation,
            Err(e) => {
                debug!("[chat {chat_id}] payload rejected for {intent}: {e}");
                return Self::failure_reply(intent, &Error::from(e));
            }
        };

        match self.registry.dispatch(intent, conversation).await {
            Ok(advice) => {
                self.stats.record_advice(intent);
                info!(
                    "[chat {chat_id}] advice '{}' given for {}-char conversation",
                    intent.display_name(),
                    conversation.chars().count()
                );
                replies::advice(intent, &advice, Local::now())
            }
            Err(e) => {
                Self::log_failure(chat_id, &e);
                Self::failure_reply(intent, &e)
            }
        }
    }

    fn log_failure(chat_id: ChatId, err: &Error) {
        match err {
            Error::StrategyNotFound(_) => error!("[chat {chat_id}] {err}"),
            Error::ValidationFailed(_) => debug!("[chat {chat_id}] {err}"),
            Error::AiUnavailable(_) | Error::StrategyUnavailable(_) => {
                warn!("[chat {chat_id}] {err}");
            }
        }
    }

    fn failure_reply(intent: StrategyIntent, err: &Error) -> String {
        match err {
            Error::ValidationFailed(_) => replies::invalid_conversation(),
            Error::StrategyUnavailable(_) => replies::service_unavailable(intent),
            Error::AiUnavailable(_) | Error::StrategyNotFound(_) => replies::ai_failed(intent),
        }
    }

    /// Reads published chat summaries only, so it never waits on another
    /// chat's lock.
    async fn status(&self) -> String {
        let availability = self.availability().await;
        let summaries = self.chats.summaries();

        let report = StatusReport {
            jokes_available: availability
                .get(&StrategyIntent::Joke)
                .copied()
                .unwrap_or(false),
            active_chats: summaries.len(),
            pending_messages: summaries.iter().map(|s| u64::from(s.pending_count)).sum(),
            sales_available: Self::sales_ready(&availability),
            advice_total: self.stats.advice_total(),
        };
        replies::status(&report, Local::now())
    }

    fn sales_ready(availability: &BTreeMap<StrategyIntent, bool>) -> bool {
        StrategyIntent::SALES
            .iter()
            .all(|intent| availability.get(intent).copied().unwrap_or(false))
    }

    /// Administrative clear; same effect as `/limpiar_contexto`.
    pub async fn clear_chat(&self, chat_id: ChatId) -> bool {
        self.chats.clear(chat_id).await
    }

    /// Live availability probe of every intent.
    pub async fn availability(&self) -> BTreeMap<StrategyIntent, bool> {
        self.registry.availability().await
    }

    #[must_use]
    pub fn statistics(&self) -> StatsSnapshot {
        let summaries = self.chats.summaries();
        let mut chats_by_mode: BTreeMap<ChatMode, usize> = BTreeMap::new();
        for summary in &summaries {
            *chats_by_mode.entry(summary.mode).or_insert(0) += 1;
        }

        StatsSnapshot {
            messages_processed: self.stats.messages(),
            automatic_jokes: self.stats.automatic_jokes(),
            manual_jokes: self.stats.manual_jokes(),
            advice_by_intent: self.stats.advice_by_intent(),
            advice_total: self.stats.advice_total(),
            active_chats: summaries.len(),
            chats_by_mode,
            pending_messages: summaries.iter().map(|s| u64::from(s.pending_count)).sum(),
        }
    }

    #[must_use]
    pub const fn chats(&self) -> &ChatTable {
        &self.chats
    }
}

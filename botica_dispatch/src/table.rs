//! Per-chat serialization point.
//!
//! Each chat's state sits behind its own async mutex inside a sharded map.
//! Looking a chat up holds a shard lock only for the map access, so chats
//! never wait on each other; messages of the same chat queue on the chat's
//! mutex and observe each other's updates in arrival order.
//!
//! Aggregate views never take a chat's lock. Whoever holds a chat's lock
//! publishes a [`ChatSummary`] of it on release, and readers see the last
//! published summary of every chat.

use botica_core::{ChatConfig, ChatId, ChatMode, ChatState};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub type ChatCell = Arc<Mutex<ChatState>>;

#[derive(Debug, Clone, Serialize)]
pub struct ChatSummary {
    pub chat_id: ChatId,
    pub mode: ChatMode,
    pub buffered_messages: usize,
    pub pending_count: u32,
    pub last_activity: DateTime<Utc>,
}

impl ChatSummary {
    fn of(chat: &ChatState) -> Self {
        Self {
            chat_id: chat.session.chat_id,
            mode: chat.session.mode(),
            buffered_messages: chat.context.len(),
            pending_count: chat.cadence.count(),
            last_activity: chat.session.last_activity,
        }
    }
}

pub struct ChatTable {
    chats: DashMap<ChatId, ChatCell>,
    published: DashMap<ChatId, ChatSummary>,
    config: ChatConfig,
}

impl ChatTable {
    #[must_use]
    pub fn new(config: ChatConfig) -> Self {
        Self {
            chats: DashMap::new(),
            published: DashMap::new(),
            config,
        }
    }

    /// State cell for `chat_id`, created on first use.
    #[must_use]
    pub fn get_or_create(&self, chat_id: ChatId) -> ChatCell {
        Arc::clone(
            self.chats
                .entry(chat_id)
                .or_insert_with(|| {
                    let state = ChatState::new(chat_id, &self.config);
                    self.published.insert(chat_id, ChatSummary::of(&state));
                    Arc::new(Mutex::new(state))
                })
                .value(),
        )
    }

    #[must_use]
    pub fn get(&self, chat_id: ChatId) -> Option<ChatCell> {
        self.chats.get(&chat_id).map(|cell| Arc::clone(cell.value()))
    }

    /// Clear buffer, counter, and session of one chat. Unknown chats are
    /// already empty; returns whether the chat had state.
    pub async fn clear(&self, chat_id: ChatId) -> bool {
        let Some(cell) = self.get(chat_id) else {
            return false;
        };
        let mut chat = cell.lock().await;
        chat.clear();
        self.publish(&chat);
        drop(chat);
        info!("Context cleared for chat {chat_id}");
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Record the current figures of a chat. Call while holding its lock.
    pub fn publish(&self, chat: &ChatState) {
        self.published
            .insert(chat.session.chat_id, ChatSummary::of(chat));
    }

    /// Last published view of every chat. Never waits on a chat's lock.
    #[must_use]
    pub fn summaries(&self) -> Vec<ChatSummary> {
        let mut summaries: Vec<ChatSummary> = self
            .published
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        summaries.sort_by_key(|s| s.chat_id);
        summaries
    }
}

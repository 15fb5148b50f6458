use botica_core::{ChatMode, StrategyIntent};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-lifetime counters.
#[derive(Debug, Default)]
pub struct Statistics {
    messages: AtomicU64,
    automatic_jokes: AtomicU64,
    manual_jokes: AtomicU64,
    advice: Mutex<BTreeMap<StrategyIntent, u64>>,
}

impl Statistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_message(&self) {
        self.messages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_automatic_joke(&self) {
        self.automatic_jokes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_manual_joke(&self) {
        self.manual_jokes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_advice(&self, intent: StrategyIntent) {
        let mut advice = self
            .advice
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *advice.entry(intent).or_insert(0) += 1;
    }

    #[must_use]
    pub fn advice_by_intent(&self) -> BTreeMap<StrategyIntent, u64> {
        self.advice
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn advice_total(&self) -> u64 {
        self.advice_by_intent().values().sum()
    }

    #[must_use]
    pub fn messages(&self) -> u64 {
        self.messages.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn automatic_jokes(&self) -> u64 {
        self.automatic_jokes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn manual_jokes(&self) -> u64 {
        self.manual_jokes.load(Ordering::Relaxed)
    }
}

/// Aggregate view served by `/estado` and the admin endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub messages_processed: u64,
    pub automatic_jokes: u64,
    pub manual_jokes: u64,
    pub advice_by_intent: BTreeMap<StrategyIntent, u64>,
    pub advice_total: u64,
    pub active_chats: usize,
    pub chats_by_mode: BTreeMap<ChatMode, usize>,
    /// Sum of cadence counters across chats
    pub pending_messages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_counts_per_intent() {
        let stats = Statistics::new();
        stats.record_advice(StrategyIntent::Upselling);
        stats.record_advice(StrategyIntent::Upselling);
        stats.record_advice(StrategyIntent::RefundRejection);

        assert_eq!(stats.advice_total(), 3);
        assert_eq!(
            stats.advice_by_intent().get(&StrategyIntent::Upselling),
            Some(&2)
        );
    }

    #[test]
    fn message_and_joke_counters() {
        let stats = Statistics::new();
        stats.record_message();
        stats.record_message();
        stats.record_automatic_joke();
        stats.record_manual_joke();

        assert_eq!(stats.messages(), 2);
        assert_eq!(stats.automatic_jokes(), 1);
        assert_eq!(stats.manual_jokes(), 1);
    }
}

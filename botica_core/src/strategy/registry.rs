use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{AdvisoryStrategy, JokeStrategy, Strategy, StrategyIntent};
use crate::error::{Error, Result};
use crate::responder::AiResponder;

/// Maps each intent to the strategy that serves it.
pub struct StrategyRegistry {
    strategies: HashMap<StrategyIntent, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registry serving every intent from one responder.
    #[must_use]
    pub fn with_responder(responder: &Arc<dyn AiResponder>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JokeStrategy::new(Arc::clone(responder))));
        for intent in StrategyIntent::SALES {
            if let Some(strategy) = AdvisoryStrategy::new(intent, Arc::clone(responder)) {
                registry.register(Arc::new(strategy));
            }
        }
        registry
    }

    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        info!("Registering strategy: {}", strategy.intent().display_name());
        self.strategies.insert(strategy.intent(), strategy);
    }

    fn get(&self, intent: StrategyIntent) -> Result<&Arc<dyn Strategy>> {
        self.strategies.get(&intent).ok_or_else(|| {
            error!("No strategy registered for {intent}");
            Error::StrategyNotFound(intent)
        })
    }

    /// Probe availability, then run the intent's strategy on `input`.
    pub async fn dispatch(&self, intent: StrategyIntent, input: &str) -> Result<String> {
        let strategy = self.get(intent)?;

        if !strategy.is_available().await {
            warn!("Strategy unavailable: {}", intent.display_name());
            return Err(Error::StrategyUnavailable(intent));
        }

        info!("Running strategy: {}", intent.display_name());
        strategy.respond(input).await
    }

    /// Live probe; not cached.
    pub async fn is_available(&self, intent: StrategyIntent) -> bool {
        match self.strategies.get(&intent) {
            Some(strategy) => strategy.is_available().await,
            None => false,
        }
    }

    /// Content check for unsolicited responses. Unregistered intents admit
    /// nothing.
    #[must_use]
    pub fn admits(&self, intent: StrategyIntent, input: &str) -> bool {
        self.strategies
            .get(&intent)
            .is_some_and(|strategy| strategy.admits(input))
    }

    pub async fn availability(&self) -> BTreeMap<StrategyIntent, bool> {
        let mut status = BTreeMap::new();
        for intent in StrategyIntent::ALL {
            status.insert(intent, self.is_available(intent).await);
        }
        status
    }

    #[must_use]
    pub fn list(&self) -> Vec<StrategyIntent> {
        let mut intents: Vec<_> = self.strategies.keys().copied().collect();
        intents.sort();
        intents
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::NO_JOKE_FALLBACK;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes prompts back and records them; `reply` overrides the output.
    struct Recording {
        prompts: Mutex<Vec<String>>,
        reply: Option<String>,
        up: bool,
    }

    impl Recording {
        fn new(reply: Option<&str>, up: bool) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply: reply.map(ToString::to_string),
                up,
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl AiResponder for Recording {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(prompt.to_string());
            if !self.up {
                return Err(Error::ai_unavailable("down"));
            }
            Ok(self.reply.clone().unwrap_or_else(|| prompt.to_string()))
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn registry(responder: &Arc<Recording>) -> StrategyRegistry {
        let responder: Arc<dyn AiResponder> = responder.clone();
        StrategyRegistry::with_responder(&responder)
    }

    #[test]
    fn registers_every_intent() {
        let registry = registry(&Recording::new(None, true));
        assert_eq!(registry.list(), StrategyIntent::ALL.to_vec());
    }

    #[tokio::test]
    async fn joke_prefixes_marker() {
        let responder = Recording::new(Some("¿Por qué el libro de mates está triste?"), true);
        let joke = registry(&responder)
            .dispatch(StrategyIntent::Joke, "Ana: hola")
            .await;

        assert!(matches!(joke, Ok(ref text) if text.starts_with("😄 ")));
        // probe + generation
        assert_eq!(responder.prompts().len(), 2);
    }

    #[tokio::test]
    async fn blank_joke_falls_back() {
        let responder = Recording::new(Some("OK"), true);
        let strategy = JokeStrategy::new(Arc::new(BlankAfterProbe(responder)));
        let joke = strategy.respond("Ana: hola").await;

        assert!(matches!(joke, Ok(ref text) if text == NO_JOKE_FALLBACK));
    }

    /// Answers the probe but returns blank generations otherwise.
    struct BlankAfterProbe(Arc<Recording>);

    #[async_trait]
    impl AiResponder for BlankAfterProbe {
        async fn generate(&self, prompt: &str) -> Result<String> {
            if prompt == crate::responder::PROBE_PROMPT {
                return self.0.generate(prompt).await;
            }
            Ok("   ".to_string())
        }

        fn name(&self) -> &'static str {
            "blank"
        }
    }

    #[tokio::test]
    async fn advisory_frames_objective() {
        let responder = Recording::new(None, true);
        let advice = registry(&responder)
            .dispatch(StrategyIntent::Upselling, "Cliente: busco un portátil")
            .await;

        let Ok(advice) = advice else {
            panic!("dispatch failed: {advice:?}");
        };
        assert!(advice.contains("realizar upselling"));
        assert!(advice.contains("Cliente: busco un portátil"));
    }

    #[tokio::test]
    async fn unavailable_responder_short_circuits() {
        let responder = Recording::new(None, false);
        let result = registry(&responder)
            .dispatch(StrategyIntent::RefundRejection, "Cliente: quiero devolverlo")
            .await;

        assert!(matches!(
            result,
            Err(Error::StrategyUnavailable(StrategyIntent::RefundRejection))
        ));
        // only the probe ran
        assert_eq!(responder.prompts().len(), 1);
    }

    #[tokio::test]
    async fn missing_strategy_is_reported() {
        let result = StrategyRegistry::new()
            .dispatch(StrategyIntent::Joke, "Ana: hola")
            .await;
        assert!(matches!(
            result,
            Err(Error::StrategyNotFound(StrategyIntent::Joke))
        ));
    }

    #[test]
    fn only_joke_filters_content() {
        let registry = registry(&Recording::new(None, true));
        assert!(!registry.admits(StrategyIntent::Joke, "Ana: qué problema"));
        assert!(registry.admits(StrategyIntent::Upselling, "Ana: qué problema"));
        assert!(!StrategyRegistry::new().admits(StrategyIntent::Joke, "Ana: hola"));
    }

    #[tokio::test]
    async fn availability_covers_all_intents() {
        let status = registry(&Recording::new(None, true)).availability().await;
        assert_eq!(status.len(), 4);
        assert!(status.values().all(|up| *up));
    }
}

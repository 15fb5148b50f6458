use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::{Strategy, StrategyIntent};
use crate::error::Result;
use crate::filter::is_appropriate;
use crate::responder::AiResponder;

pub const NO_JOKE_FALLBACK: &str =
    "😅 Lo siento, no se me ocurre un buen chiste en este momento. ¡Pero sigan con la conversación interesante!";

/// Turns rendered chat context into a joke.
pub struct JokeStrategy {
    responder: Arc<dyn AiResponder>,
}

impl JokeStrategy {
    #[must_use]
    pub fn new(responder: Arc<dyn AiResponder>) -> Self {
        Self { responder }
    }
}

#[async_trait]
impl Strategy for JokeStrategy {
    fn intent(&self) -> StrategyIntent {
        StrategyIntent::Joke
    }

    async fn respond(&self, context: &str) -> Result<String> {
        let preview: String = context.chars().take(100).collect();
        info!("Generating joke from context: {preview}");

        let joke = self.responder.generate_joke(context).await?;
        let joke = joke.trim();
        if joke.is_empty() {
            return Ok(NO_JOKE_FALLBACK.to_string());
        }
        Ok(format!("😄 {joke}"))
    }

    async fn is_available(&self) -> bool {
        self.responder.is_available().await
    }

    fn admits(&self, context: &str) -> bool {
        is_appropriate(context)
    }
}

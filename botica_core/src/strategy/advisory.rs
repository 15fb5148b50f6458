use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::{Strategy, StrategyIntent};
use crate::error::Result;
use crate::responder::AiResponder;

/// Sales-advisory intent: analyses a conversation toward a fixed objective.
pub struct AdvisoryStrategy {
    intent: StrategyIntent,
    objective: &'static str,
    responder: Arc<dyn AiResponder>,
}

impl AdvisoryStrategy {
    /// Strategy for a sales intent; `None` for `Joke`.
    #[must_use]
    pub fn new(intent: StrategyIntent, responder: Arc<dyn AiResponder>) -> Option<Self> {
        Self::objective_for(intent).map(|objective| Self {
            intent,
            objective,
            responder,
        })
    }

    #[must_use]
    pub const fn objective_for(intent: StrategyIntent) -> Option<&'static str> {
        match intent {
            StrategyIntent::RefundRejection => Some(
                "rechazar una devolución de manera diplomática y mantener la relación con el cliente",
            ),
            StrategyIntent::Upselling => Some(
                "realizar upselling sugiriendo productos mejores o adicionales que aporten valor al cliente",
            ),
            StrategyIntent::PurchaseMotivation => Some(
                "motivar al cliente a realizar la compra destacando beneficios y creando urgencia apropiada",
            ),
            StrategyIntent::Joke => None,
        }
    }
}

#[async_trait]
impl Strategy for AdvisoryStrategy {
    fn intent(&self) -> StrategyIntent {
        self.intent
    }

    async fn respond(&self, conversation: &str) -> Result<String> {
        info!(
            "Analysing {}-char conversation for {}",
            conversation.chars().count(),
            self.intent
        );
        self.responder
            .analyze_conversation(conversation, self.objective)
            .await
    }

    async fn is_available(&self) -> bool {
        self.responder.is_available().await
    }
}

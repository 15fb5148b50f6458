//! Contract of the text-generation backend.

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;

/// Prompt sent by the availability probe.
pub const PROBE_PROMPT: &str = "Di 'OK' si puedes responder";

/// Stateless capability turning a prompt into generated text.
///
/// `is_available` performs a real generation, so it costs a network round
/// trip. Call it when a strategy is about to run or on explicit status
/// requests, never per inbound message.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Fails with `Error::AiUnavailable` on transport or parse failure.
    async fn generate(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;

    async fn is_available(&self) -> bool {
        match self.generate(PROBE_PROMPT).await {
            Ok(text) => !text.trim().is_empty(),
            Err(e) => {
                warn!("{} probe failed: {e}", self.name());
                false
            }
        }
    }

    async fn generate_joke(&self, context: &str) -> Result<String> {
        self.generate(&joke_prompt(context)).await
    }

    async fn analyze_conversation(&self, conversation: &str, objective: &str) -> Result<String> {
        self.generate(&analysis_prompt(conversation, objective)).await
    }
}

#[must_use]
pub fn joke_prompt(context: &str) -> String {
    format!(
        "Basándote en el siguiente contexto de conversación, genera un chiste apropiado y divertido \
         que sea relevante al tema discutido. El chiste debe ser respetuoso y adecuado para un entorno de grupo. \
         Contexto: {context}\n\nGenera solo el chiste, sin explicaciones adicionales."
    )
}

#[must_use]
pub fn analysis_prompt(conversation: &str, objective: &str) -> String {
    format!(
        "Eres un experto consultor de ventas. Analiza la siguiente conversación entre un cliente y un vendedor, \
         y proporciona consejos específicos para lograr el objetivo: {objective}.\n\n\
         Conversación:\n{conversation}\n\n\
         Proporciona consejos concretos y accionables para el vendedor, incluyendo:\n\
         1. Análisis de la situación actual\n\
         2. Estrategias recomendadas\n\
         3. Frases o argumentos específicos que puede usar\n\
         4. Qué evitar en esta situación"
    )
}

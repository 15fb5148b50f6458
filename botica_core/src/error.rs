use thiserror::Error;

use crate::strategy::StrategyIntent;
use crate::validation::PayloadError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport or parse failure talking to the AI responder.
    #[error("AI responder unavailable: {0}")]
    AiUnavailable(String),

    /// The intent's backing capability reported not ready.
    #[error("strategy {0} is not available")]
    StrategyUnavailable(StrategyIntent),

    #[error("invalid conversation payload: {0}")]
    ValidationFailed(#[from] PayloadError),

    /// No strategy registered for the intent. Registries built with
    /// `StrategyRegistry::with_responder` cover every intent.
    #[error("no strategy registered for {0}")]
    StrategyNotFound(StrategyIntent),
}

impl Error {
    pub fn ai_unavailable(err: impl std::fmt::Display) -> Self {
        Self::AiUnavailable(err.to_string())
    }
}

//! Response intents and the strategies that frame them for the AI responder.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::error::Result;

mod advisory;
mod joke;
mod registry;

pub use advisory::AdvisoryStrategy;
pub use joke::{JokeStrategy, NO_JOKE_FALLBACK};
pub use registry::StrategyRegistry;

/// Closed set of response behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyIntent {
    Joke,
    RefundRejection,
    Upselling,
    PurchaseMotivation,
}

impl StrategyIntent {
    pub const ALL: [Self; 4] = [
        Self::Joke,
        Self::RefundRejection,
        Self::Upselling,
        Self::PurchaseMotivation,
    ];

    /// Intents that analyse a client/seller conversation.
    pub const SALES: [Self; 3] = [
        Self::RefundRejection,
        Self::Upselling,
        Self::PurchaseMotivation,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joke => "joke",
            Self::RefundRejection => "refund_rejection",
            Self::Upselling => "upselling",
            Self::PurchaseMotivation => "purchase_motivation",
        }
    }

    /// Human-facing strategy name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Joke => "Generación de Chistes",
            Self::RefundRejection => "Rechazo de Devolución",
            Self::Upselling => "Upselling",
            Self::PurchaseMotivation => "Motivación de Compra",
        }
    }
}

impl fmt::Display for StrategyIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One intent's framing around the AI responder.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn intent(&self) -> StrategyIntent;

    async fn respond(&self, input: &str) -> Result<String>;

    /// Live probe of the backing responder.
    async fn is_available(&self) -> bool;

    /// Whether `input` is suitable for an unsolicited response.
    fn admits(&self, _input: &str) -> bool {
        true
    }
}

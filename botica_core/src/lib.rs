#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Chat routing core: per-chat conversational state, the bounded context
//! buffer, joke cadence, and the strategy registry that fronts the AI
//! responder.

pub mod cadence;
pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod responder;
pub mod session;
pub mod strategy;
pub mod validation;

pub use cadence::{CadenceTrigger, CadenceWindow};
pub use chat::{ChatId, ChatState, InboundMessage};
pub use config::{ChatConfig, ContextLimits};
pub use context::{ContextBuffer, ContextEntry};
pub use error::{Error, Result};
pub use filter::is_appropriate;
pub use responder::AiResponder;
pub use session::{ChatMode, Session};
pub use strategy::{AdvisoryStrategy, JokeStrategy, Strategy, StrategyIntent, StrategyRegistry};
pub use validation::{PayloadError, validate_payload};

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

//! Entry point for inbound chat messages.
//!
//! The [`Dispatcher`] classifies each message as a command or freeform text,
//! drives the chat's session state machine, keeps the context buffer and
//! joke cadence up to date, and calls the strategy registry when a command
//! or the cadence asks for an AI response. Every path ends in at most one
//! reply string; failures are turned into user-facing text here.

mod command;
mod dispatcher;
pub mod replies;
mod stats;
mod table;

pub use command::Command;
pub use dispatcher::Dispatcher;
pub use stats::{Statistics, StatsSnapshot};
pub use table::{ChatSummary, ChatTable};

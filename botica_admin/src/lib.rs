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

//! Administrative HTTP surface.
//!
//! Read-only health and statistics views over the dispatcher, plus the
//! administrative "clear chat context" action, which goes through the same
//! clear contract as the in-chat command.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use botica_core::{ChatId, StrategyIntent};
use botica_dispatch::{Dispatcher, StatsSnapshot};
use chrono::Local;
use serde::Serialize;
use tracing::{error, info, warn};

#[cfg(test)]
mod tests;

const TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";

const FEATURES: [&str; 4] = [
    "Generación automática de chistes en grupos",
    "Asesoría de ventas con IA",
    "Análisis de conversaciones cliente-vendedor",
    "Estrategias de upselling y motivación de compra",
];

/// Deployment facts shown next to the live figures.
#[derive(Debug, Clone, Serialize)]
pub struct BotInfo {
    pub bot_username: String,
    pub ai_model: String,
    pub config_valid: bool,
}

/// Shared state of the admin handlers.
#[derive(Clone)]
pub struct AdminState {
    dispatcher: Arc<Dispatcher>,
    info: Arc<BotInfo>,
}

impl AdminState {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>, info: BotInfo) -> Self {
        Self {
            dispatcher,
            info: Arc::new(info),
        }
    }
}

#[derive(Debug, Serialize)]
struct Services {
    jokes: bool,
    sales: bool,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
    bot: String,
    services: Services,
}

#[derive(Debug, Serialize)]
struct Stats {
    general: StatsSnapshot,
    availability: BTreeMap<StrategyIntent, bool>,
    config: BotInfo,
}

fn build_router(state: AdminState) -> Router {
    Router::new()
        .route("/api/bot/health", get(health_handler))
        .route("/api/bot/stats", get(stats_handler))
        .route("/api/bot/chat/{chat_id}/context", delete(clear_context_handler))
        .route("/api/bot/info", get(info_handler))
        .with_state(state)
}

fn services(availability: &BTreeMap<StrategyIntent, bool>) -> Services {
    let up = |intent: &StrategyIntent| availability.get(intent).copied().unwrap_or(false);
    Services {
        jokes: up(&StrategyIntent::Joke),
        sales: StrategyIntent::SALES.iter().all(up),
    }
}

/// GET /api/bot/health
async fn health_handler(State(state): State<AdminState>) -> impl IntoResponse {
    let availability = state.dispatcher.availability().await;
    Json(Health {
        status: "UP",
        timestamp: Local::now().format(TIMESTAMP).to_string(),
        bot: state.info.bot_username.clone(),
        services: services(&availability),
    })
}

/// GET /api/bot/stats
async fn stats_handler(State(state): State<AdminState>) -> impl IntoResponse {
    Json(Stats {
        general: state.dispatcher.statistics(),
        availability: state.dispatcher.availability().await,
        config: (*state.info).clone(),
    })
}

/// DELETE /api/bot/chat/{chat_id}/context
async fn clear_context_handler(
    State(state): State<AdminState>,
    Path(chat_id): Path<String>,
) -> impl IntoResponse {
    let Ok(id) = chat_id.trim().parse::<i64>() else {
        warn!("Admin clear rejected: invalid chat id {chat_id:?}");
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": format!("invalid chat id: {chat_id}")})),
        );
    };

    let had_state = state.dispatcher.clear_chat(ChatId(id)).await;
    info!("Admin cleared context of chat {id} (had state: {had_state})");
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("Contexto limpiado para chat: {id}"),
            "cleared": had_state,
            "timestamp": Local::now().format(TIMESTAMP).to_string(),
        })),
    )
}

/// GET /api/bot/info
async fn info_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "botica",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Bot de Telegram con chistes automáticos y asesoría de ventas con IA",
        "features": FEATURES,
    }))
}

/// Bind and serve the admin API in a background task.
pub async fn serve(host: &str, port: u16, state: AdminState) -> Result<tokio::task::JoinHandle<()>> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Admin API listening on {addr}");

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Admin API server error: {e}");
        }
    }))
}

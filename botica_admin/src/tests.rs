use super::*;
use axum::body::Body;
use axum::http::Request;
use botica_core::{ChatConfig, InboundMessage, StrategyRegistry};
use tower::ServiceExt;

fn make_state() -> AdminState {
    let dispatcher = Dispatcher::new(Arc::new(StrategyRegistry::new()), ChatConfig::default());
    AdminState::new(
        Arc::new(dispatcher),
        BotInfo {
            bot_username: "botica_bot".to_string(),
            ai_model: "grok-beta".to_string(),
            config_valid: true,
        },
    )
}

async fn call(state: AdminState, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let resp = build_router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_reports_bot_and_services() {
    let (status, json) = call(make_state(), "GET", "/api/bot/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "UP");
    assert_eq!(json["bot"], "botica_bot");
    // empty registry: nothing is available
    assert_eq!(json["services"]["jokes"], false);
    assert_eq!(json["services"]["sales"], false);
}

#[tokio::test]
async fn stats_include_counters_and_config() {
    let state = make_state();
    state
        .dispatcher
        .handle(&InboundMessage::new(-5_i64, "Ana", "hola").in_group())
        .await;

    let (status, json) = call(state, "GET", "/api/bot/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["general"]["messages_processed"], 1);
    assert_eq!(json["general"]["active_chats"], 1);
    assert_eq!(json["general"]["pending_messages"], 1);
    assert_eq!(json["general"]["chats_by_mode"]["NORMAL"], 1);
    assert_eq!(json["availability"]["upselling"], false);
    assert_eq!(json["config"]["ai_model"], "grok-beta");
}

#[tokio::test]
async fn clear_context_resets_chat() {
    let state = make_state();
    state
        .dispatcher
        .handle(&InboundMessage::new(-5_i64, "Ana", "hola").in_group())
        .await;

    let (status, json) = call(state.clone(), "DELETE", "/api/bot/chat/-5/context").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], true);
    assert_eq!(json["message"], "Contexto limpiado para chat: -5");

    let cell = state.dispatcher.chats().get(ChatId(-5)).unwrap();
    let chat = cell.lock().await;
    assert!(chat.context.is_empty());
    assert_eq!(chat.cadence.count(), 0);
}

#[tokio::test]
async fn clear_context_unknown_chat_is_ok() {
    let (status, json) = call(make_state(), "DELETE", "/api/bot/chat/77/context").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], false);
}

#[tokio::test]
async fn clear_context_rejects_non_numeric_id() {
    let (status, json) = call(make_state(), "DELETE", "/api/bot/chat/abc/context").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn info_lists_features() {
    let (status, json) = call(make_state(), "GET", "/api/bot/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "botica");
    assert_eq!(json["features"].as_array().unwrap().len(), 4);
}

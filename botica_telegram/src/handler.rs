use crate::{Result, TelegramBot};
use botica_core::InboundMessage;
use teloxide::{
    requests::Requester,
    types::{ChatAction, Message},
};
use tracing::{debug, warn};

/// Display name used as the context-buffer author:
/// first name, last name, and `(@username)` when present.
#[must_use]
pub fn sender_name(first: &str, last: Option<&str>, username: Option<&str>) -> String {
    let mut parts: Vec<String> = [Some(first), last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect();
    if let Some(username) = username.filter(|u| !u.is_empty()) {
        parts.push(format!("(@{username})"));
    }

    if parts.is_empty() {
        return "unknown".to_string();
    }
    parts.join(" ")
}

fn inbound(msg: &Message, text: &str) -> InboundMessage {
    let sender = msg.from.as_ref().map_or_else(
        || "unknown".to_string(),
        |u| sender_name(&u.first_name, u.last_name.as_deref(), u.username.as_deref()),
    );

    InboundMessage {
        chat_id: msg.chat.id.0.into(),
        sender,
        text: text.to_string(),
        is_group: msg.chat.is_group() || msg.chat.is_supergroup(),
    }
}

/// Handle one Telegram message. Non-text updates are ignored.
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if !bot.is_allowed(msg.chat.id.0) {
        warn!("Ignoring message from chat {} (not in allow list)", msg.chat.id);
        return Ok(());
    }

    // Commands may take a while; show typing
    if text.trim_start().starts_with('/') {
        if let Err(e) = bot.bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
            debug!("Typing indicator failed for chat {}: {e}", msg.chat.id);
        }
    }

    let inbound = inbound(&msg, text);
    if let Some(reply) = bot.dispatcher().handle(&inbound).await {
        bot.bot.send_message(msg.chat.id, reply).await?;
    }

    Ok(())
}

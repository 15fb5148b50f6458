use crate::{Error, Result, command::bot_commands};
use botica_dispatch::Dispatcher;
use std::{sync::Arc, time::Duration};
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};

/// Telegram front end for the dispatcher
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    dispatcher: Arc<Dispatcher>,
    /// Chats allowed to talk to the bot; empty allows all
    allowed_chats: Arc<Vec<i64>>,
}

impl TelegramBot {
    pub fn new(token: &str, dispatcher: Arc<Dispatcher>, allowed_chats: &[String]) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::Config("Telegram bot token is empty".into()));
        }

        let allowed_chats = allowed_chats
            .iter()
            .filter_map(|s| match s.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring invalid chat id in allow list: {s}");
                    None
                }
            })
            .collect();

        Ok(Self {
            bot: Bot::new(token),
            dispatcher,
            allowed_chats: Arc::new(allowed_chats),
        })
    }

    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Wait for the Telegram API to answer `getMe`.
    /// Delay grows by 2s per attempt, capped at 10s. Retries indefinitely.
    async fn test_connection(&self) -> Result<()> {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(me) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        me.user.username.as_deref().unwrap_or("no username"),
                        me.user.id
                    );
                    return Ok(());
                }
                Err(e) => {
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);
                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("Check network access to api.telegram.org and the bot token");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Publish the command menu. A failure only costs the menu.
    async fn register_commands(&self) {
        match self.bot.set_my_commands(bot_commands()).await {
            Ok(_) => info!("Registered {} bot commands", bot_commands().len()),
            Err(e) => warn!("Failed to register bot commands: {e}"),
        }
    }

    /// Poll for updates until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.test_connection().await?;
        self.register_commands().await;

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let front = self.clone();
            move |_bot: Bot, msg: teloxide::types::Message| {
                let front = front.clone();
                async move { crate::handler::handle_message(front, msg).await }
            }
        }));

        info!("Listening for Telegram updates");
        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram dispatcher stopped");
        Ok(())
    }
}

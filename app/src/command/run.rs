use crate::command::{CommandStrategy, build_responder};
use botica_admin::{AdminState, BotInfo};
use botica_config::Config;
use botica_core::{AiResponder, StrategyIntent, StrategyRegistry};
use botica_dispatch::Dispatcher;
use botica_telegram::TelegramBot;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the run command.
pub struct RunInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
    /// Optional allowed chat IDs (overrides config)
    pub allow_from: Option<Vec<String>>,
    pub no_admin: bool,
}

/// Strategy for running the bot and, unless disabled, the admin API.
pub struct RunStrategy;

impl CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(token) = input.token {
            config.telegram.token = token;
        }
        if let Some(allow_from) = input.allow_from {
            config.telegram.allow_from = allow_from;
        }
        config.validate()?;

        let responder: Arc<dyn AiResponder> = Arc::new(build_responder(&config.providers.grok));
        info!(
            "AI responder: {} (model {})",
            responder.name(),
            config.providers.grok.model
        );

        let registry = Arc::new(StrategyRegistry::with_responder(&responder));
        let intents: Vec<&str> = registry.list().into_iter().map(StrategyIntent::as_str).collect();
        info!("Strategies registered: {}", intents.join(", "));
        let dispatcher = Arc::new(Dispatcher::new(registry, config.chat));

        let admin = if input.no_admin || !config.admin.enabled {
            info!("Admin API disabled");
            None
        } else {
            let state = AdminState::new(
                Arc::clone(&dispatcher),
                BotInfo {
                    bot_username: config.telegram.username.clone(),
                    ai_model: config.providers.grok.model.clone(),
                    config_valid: true,
                },
            );
            Some(botica_admin::serve(&config.admin.host, config.admin.port, state).await?)
        };

        let bot = TelegramBot::new(&config.telegram.token, dispatcher, &config.telegram.allow_from)?;

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        if let Some(handle) = admin {
            warn!("Stopping admin API");
            handle.abort();
        }

        Ok(())
    }
}

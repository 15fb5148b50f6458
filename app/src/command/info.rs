use botica_config::Config;
use botica_core::AiResponder;
use tracing::info;

use super::build_responder;

/// Strategy for displaying configuration information.
///
/// Secrets are masked. The AI provider is probed live, so the command needs
/// network access to report its status.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== botica Configuration ===\n");

        let grok = &config.providers.grok;
        println!("AI Provider:");
        println!("  API Key: {}", mask(&grok.api_key));
        println!("  Base URL: {}", grok.base_url);
        println!("  Model: {}", grok.model);
        println!("  Max Tokens: {}", grok.max_tokens);
        println!("  Temperature: {}", grok.temperature);
        println!("  Timeout: {}s", grok.timeout_secs);
        if grok.retry_delays_ms.is_empty() {
            println!("  Retries: none");
        } else {
            println!("  Retry Delays (ms): {:?}", grok.retry_delays_ms);
        }

        if grok.api_key.is_empty() {
            println!("  Status: (no API key)");
        } else {
            info!("Probing AI provider");
            let status = if build_responder(grok).is_available().await {
                "Available"
            } else {
                "Unavailable"
            };
            println!("  Status: {status}");
        }
        println!();

        println!("Chat:");
        println!("  Context Max Entries: {}", config.chat.context_max_entries);
        println!("  Context Max Chars: {}", config.chat.context_max_chars);
        println!(
            "  Joke Window: {}..={}",
            config.chat.joke_window.min, config.chat.joke_window.max
        );
        println!();

        println!("Telegram:");
        println!("  Token: {}", mask(&config.telegram.token));
        if !config.telegram.username.is_empty() {
            println!("  Username: @{}", config.telegram.username);
        }
        if config.telegram.allow_from.is_empty() {
            println!("  Allow From: (empty - all chats allowed)");
        } else {
            println!("  Allow From: {}", config.telegram.allow_from.join(", "));
        }
        println!();

        println!("Admin API:");
        if config.admin.enabled {
            println!("  Listen: {}:{}", config.admin.host, config.admin.port);
        } else {
            println!("  Disabled");
        }

        if let Err(e) = config.validate() {
            println!("\nConfiguration incomplete: {e}");
        }

        Ok(())
    }
}

/// First and last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask(""), "(not set)");
        assert_eq!(mask("short"), "***");
        assert_eq!(mask("xai-1234567890abcd"), "xai-...abcd");
    }
}

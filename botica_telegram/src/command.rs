use botica_dispatch::Command;
use teloxide::types::BotCommand;

/// Command menu registered with Telegram at startup.
#[must_use]
pub fn bot_commands() -> Vec<BotCommand> {
    Command::catalogue()
        .iter()
        .map(|(command, description)| BotCommand {
            command: (*command).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

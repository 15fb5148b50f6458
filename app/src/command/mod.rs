//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own zero-sized strategy type with a typed input,
//! dispatched statically from `main`.

use botica_config::ProviderConfig;
use botica_providers::GrokResponder;

mod info;
mod init;
mod run;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Contract shared by every command strategy.
pub trait CommandStrategy: Send + Sync + 'static {
    /// Input accepted by the strategy.
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// AI responder configured from the provider section.
fn build_responder(provider: &ProviderConfig) -> GrokResponder {
    GrokResponder::new(provider.api_key.clone())
        .with_base_url(provider.base_url.clone())
        .with_model(provider.model.clone())
        .with_max_tokens(provider.max_tokens)
        .with_temperature(provider.temperature)
        .with_timeout(provider.timeout())
        .with_retry_delays(provider.retry_delays())
}

//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use std::sync::Arc;

use minichat_config::ProviderConfig;
use minichat_core::ResponseGenerator;
use minichat_providers::{CompletionProvider, CompletionSettings, EchoGenerator};
use tracing::info;

mod chat;
mod info;
mod init;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without boxing or runtime casts.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build the generation backend selected by `provider.kind`.
fn build_generator(provider: &ProviderConfig) -> anyhow::Result<Arc<dyn ResponseGenerator>> {
    match provider.kind.as_str() {
        "http" => {
            let settings = CompletionSettings {
                model: provider.model.clone(),
                max_tokens: provider.max_tokens,
                temperature: provider.temperature,
            };
            Ok(Arc::new(CompletionProvider::new(
                provider.base_url.clone(),
                provider.api_key.clone(),
                settings,
            )))
        }
        "echo" => {
            info!("Using offline echo generator");
            Ok(Arc::new(EchoGenerator::new()))
        }
        other => anyhow::bail!("Unknown provider kind: {other}. Expected \"http\" or \"echo\"."),
    }
}

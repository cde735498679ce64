//! Interactive chat command.

use minichat_config::Config;
use minichat_conversation::ChatSession;
use tracing::info;

use super::build_generator;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub config: Config,
    /// Optional model override
    pub model: Option<String>,
    /// Optional memory window override
    pub memory_window: Option<usize>,
    /// Optional provider kind override
    pub provider: Option<String>,
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
}

impl ChatInput {
    /// Config with command-line overrides applied.
    fn resolved_config(&self) -> Config {
        let mut config = self.config.clone();
        if let Some(model) = &self.model {
            config.provider.model.clone_from(model);
        }
        if let Some(window) = self.memory_window {
            config.memory.window_size = window;
        }
        if let Some(kind) = &self.provider {
            config.provider.kind.clone_from(kind);
        }
        config
    }
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = input.resolved_config();

        println!("🤖 Initializing chatbot...");
        println!("📦 Model: {}", config.provider.model);
        let generator = build_generator(&config.provider)?;

        let mut session = ChatSession::new(generator, config.memory.buffer_config());
        println!("🧠 Memory window size: {} turns", session.buffer().capacity());
        println!("💻 Backend: {}", session.generator().describe().backend);

        if let Some(msg) = input.message {
            let outcome = session.process_turn(&msg).await;
            println!("🤖 Bot: {}", outcome.response);
            return Ok(());
        }

        session.run_interactive().await?;
        info!(
            "Conversation ended: {} total turns",
            session.buffer().total_turns_seen()
        );
        Ok(())
    }
}

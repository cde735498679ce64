use async_trait::async_trait;
use minichat_core::{GeneratorInfo, ResponseGenerator, clean_response};

/// Offline generator that answers by repeating the latest user input.
///
/// Useful for exercising the memory and command handling without a model
/// server.
#[derive(Debug, Clone, Default)]
pub struct EchoGenerator;

impl EchoGenerator {
    const MODEL_NAME: &'static str = "echo";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let last_input = prompt
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("Human: "))
            .unwrap_or_default();

        Ok(clean_response(&format!("You said: {last_input}")))
    }

    fn model_name(&self) -> &str {
        Self::MODEL_NAME
    }

    fn describe(&self) -> GeneratorInfo {
        GeneratorInfo {
            model_name: Self::MODEL_NAME.to_string(),
            backend: "local".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_latest_input() {
        let prompt = "Human: first\nAssistant: ok\nHuman: second\nAssistant:";
        let response = EchoGenerator::new().generate(prompt).await.unwrap();
        assert_eq!(response, "You said: second");
    }
}

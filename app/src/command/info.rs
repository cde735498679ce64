use minichat_config::Config;

/// Strategy for displaying configuration information.
///
/// Loads the config file (which must exist, see `minichat init`) and outputs
/// its location, memory settings and provider settings with the API key
/// masked.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== minichat Configuration ===\n");

        println!("Config File:");
        println!("  Path: {}", Config::config_path()?.display());
        println!();

        println!("Memory:");
        println!("  Window Size: {} turns", config.memory.window_size);
        println!("  Max Words Per Turn: {}", config.memory.max_words_per_turn);
        println!();

        println!("Provider:");
        println!("  Kind: {}", config.provider.kind);
        println!("  Base URL: {}", config.provider.base_url);
        println!("  API Key: {}", mask_api_key(&config.provider.api_key));
        println!("  Model: {}", config.provider.model);
        println!("  Max Tokens: {}", config.provider.max_tokens);
        println!("  Temperature: {}", config.provider.temperature);
        println!();

        println!("Logging:");
        println!("  Level: {}", config.logging.level);

        Ok(())
    }
}

fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
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

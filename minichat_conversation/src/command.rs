//! Slash command parsing.

use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
❓ Available Commands:
  /exit           - Exit the chatbot gracefully
  /clear          - Clear the conversation memory
  /stats          - Show memory and model statistics
  /topics         - Show the current conversation topics
  /export <path>  - Save the conversation memory to a JSON file
  /import <path>  - Replace the conversation memory from a JSON file
  /help           - Show this help message";

/// A user-facing command entered with a leading `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Clear,
    Stats,
    Topics,
    Help,
    Export(PathBuf),
    Import(PathBuf),
    /// `/export` or `/import` without a path
    MissingArgument(String),
    Unknown(String),
}

impl Command {
    /// Parse `input` as a command. Returns `None` for ordinary chat input.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if !input.starts_with('/') {
            return None;
        }

        let (name, argument) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(name, rest)| (name, rest.trim()));
        let name = name.to_lowercase();

        let command = match (name.as_str(), argument) {
            ("/exit" | "/quit", _) => Self::Exit,
            ("/clear", _) => Self::Clear,
            ("/stats", _) => Self::Stats,
            ("/topics", _) => Self::Topics,
            ("/help", _) => Self::Help,
            ("/export" | "/import", "") => Self::MissingArgument(name),
            ("/export", path) => Self::Export(PathBuf::from(path)),
            ("/import", path) => Self::Import(PathBuf::from(path)),
            _ => Self::Unknown(input.to_lowercase()),
        };
        Some(command)
    }
}

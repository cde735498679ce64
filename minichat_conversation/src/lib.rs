#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Interactive chat sessions on top of the short-term memory.
//!
//! A session drives one interaction cycle per user input:
//! render the prompt from the conversation buffer, ask the generator for a
//! response, then record the turn and its topics. Slash commands map onto
//! the buffer and tracker operations.

mod command;
mod session;

pub use command::{Command, HELP_TEXT};
pub use session::{
    ChatSession, CommandOutcome, InterruptHandle, SessionError, TurnOutcome, spawn_stdin_reader,
};

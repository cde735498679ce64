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

//! Text generation backends.

mod completion;
mod echo;
pub mod retry;

pub use completion::{CompletionProvider, CompletionSettings};
pub use echo::EchoGenerator;
pub use retry::{RetryPolicy, retry_with_backoff};

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

//! Short-term conversational memory.
//!
//! - [`ConversationBuffer`]: bounded FIFO of recent turns, prompt rendering,
//!   statistics and snapshot import/export
//! - [`TopicTracker`]: running keyword summary of the discussion
//! - [`SnapshotFile`]: JSON persistence of exported snapshots

pub mod buffer;
pub mod snapshot;
pub mod topics;

pub use buffer::{BufferConfig, BufferStats, ConversationBuffer, truncate_words};
pub use snapshot::SnapshotFile;
pub use topics::{TopicTracker, extract_keywords};

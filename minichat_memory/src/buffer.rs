//! Bounded conversation buffer.
//!
//! Keeps the most recent turns, oldest first, and renders them into the
//! prompt handed to the generator.

use std::collections::VecDeque;

use minichat_core::{RawTurnRecord, Role, Turn, TurnRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Appended to text cut by [`truncate_words`].
pub const ELLIPSIS: &str = "...";

/// Upper bound on turns allocated up front; larger buffers grow on demand.
const PREALLOCATED_TURNS: usize = 16;

/// Configuration for a conversation buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Maximum number of turns retained
    pub capacity: usize,
    /// Word limit applied independently to each side of a turn
    pub max_words_per_turn: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            max_words_per_turn: 100,
        }
    }
}

impl BufferConfig {
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words_per_turn = max_words;
        self
    }
}

/// Point-in-time statistics of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferStats {
    pub total_turns_seen: u64,
    pub current_length: usize,
    pub capacity: usize,
    pub is_full: bool,
}

/// Fixed-capacity FIFO of conversation turns.
#[derive(Debug, Clone)]
pub struct ConversationBuffer {
    turns: VecDeque<Turn>,
    capacity: usize,
    max_words_per_turn: usize,
    total_turns_seen: u64,
}

impl ConversationBuffer {
    /// Create a buffer with the default capacity of 5 turns.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    #[must_use]
    pub fn with_config(config: BufferConfig) -> Self {
        let capacity = if config.capacity == 0 {
            warn!("Buffer capacity of 0 requested, using 1");
            1
        } else {
            config.capacity
        };

        info!(
            "Initialized conversation buffer: capacity={capacity}, max_words_per_turn={}",
            config.max_words_per_turn
        );

        Self {
            turns: VecDeque::with_capacity(capacity.min(PREALLOCATED_TURNS)),
            capacity,
            max_words_per_turn: config.max_words_per_turn,
            total_turns_seen: 0,
        }
    }

    /// Append one exchanged pair, evicting the oldest turn when full.
    pub fn add_turn(&mut self, user_text: &str, agent_text: &str) {
        let user_text = truncate_words(user_text, self.max_words_per_turn);
        let agent_text = truncate_words(agent_text, self.max_words_per_turn);
        self.push(user_text, agent_text);
        debug!("Added turn {} to conversation buffer", self.total_turns_seen);
    }

    fn push(&mut self, user_text: String, agent_text: String) {
        self.total_turns_seen += 1;
        self.turns
            .push_back(Turn::new(self.total_turns_seen, user_text, agent_text));

        while self.turns.len() > self.capacity {
            if let Some(evicted) = self.turns.pop_front() {
                debug!("Evicted turn {}", evicted.sequence_number());
            }
        }
    }

    /// Render the retained history plus `current_input` as a prompt.
    ///
    /// Each retained turn becomes a `Human:` line and an `Assistant:` line;
    /// the output ends with the current input and a bare `Assistant:` cue.
    #[must_use]
    pub fn render_prompt(&self, current_input: &str) -> String {
        let user = Role::User.prompt_prefix();
        let assistant = Role::Assistant.prompt_prefix();

        let mut lines = Vec::with_capacity(self.turns.len() * 2 + 2);
        for turn in &self.turns {
            lines.push(format!("{user}: {}", turn.user_text()));
            lines.push(format!("{assistant}: {}", turn.agent_text()));
        }
        lines.push(format!("{user}: {current_input}"));
        lines.push(format!("{assistant}:"));

        lines.join("\n")
    }

    /// The last `n` retained turns, oldest first. `None` returns everything.
    #[must_use]
    pub fn recent(&self, n: Option<usize>) -> Vec<&Turn> {
        let n = n.unwrap_or(self.turns.len());
        let skip = self.turns.len().saturating_sub(n);
        self.turns.iter().skip(skip).collect()
    }

    /// Drop all retained turns and reset the turn counter.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.total_turns_seen = 0;
        info!("Cleared conversation memory");
    }

    #[must_use]
    pub fn stats(&self) -> BufferStats {
        BufferStats {
            total_turns_seen: self.total_turns_seen,
            current_length: self.turns.len(),
            capacity: self.capacity,
            is_full: self.turns.len() == self.capacity,
        }
    }

    #[must_use]
    pub fn export_snapshot(&self) -> Vec<TurnRecord> {
        self.turns.iter().map(Turn::to_record).collect()
    }

    /// Replace the buffer contents with the tail of `records`.
    ///
    /// Only the last `capacity` records are considered; among those, records
    /// missing a text field are skipped. Imported turns are renumbered from 1
    /// and the turn counter ends equal to the number imported, which is
    /// returned.
    pub fn import_snapshot(&mut self, records: &[RawTurnRecord]) -> usize {
        self.clear();

        let start = records.len().saturating_sub(self.capacity);
        for raw in &records[start..] {
            let Some(record) = raw.clone().into_record() else {
                debug!("Skipping malformed snapshot record");
                continue;
            };
            let user_text = truncate_words(&record.user_text, self.max_words_per_turn);
            let agent_text = truncate_words(&record.agent_text, self.max_words_per_turn);
            self.push(user_text, agent_text);
        }

        info!("Imported {} conversation turns", self.turns.len());
        self.turns.len()
    }

    /// Import already validated records.
    pub fn import_records(&mut self, records: &[TurnRecord]) -> usize {
        let raw: Vec<RawTurnRecord> = records.iter().cloned().map(Into::into).collect();
        self.import_snapshot(&raw)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn total_turns_seen(&self) -> u64 {
        self.total_turns_seen
    }

    /// Iterate over retained turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

impl Default for ConversationBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep at most `max_words` whitespace-delimited words of `text`.
///
/// Text within the limit is returned unchanged. Longer text is rebuilt from
/// its first `max_words` words joined by single spaces, followed by
/// [`ELLIPSIS`].
#[must_use]
pub fn truncate_words(text: &str, max_words: usize) -> String {
    if text.split_whitespace().nth(max_words).is_none() {
        return text.to_string();
    }

    let mut truncated = text
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    truncated.push_str(ELLIPSIS);
    truncated
}

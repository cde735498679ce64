//! Running keyword summary of a conversation.

use tracing::debug;

use crate::buffer::ConversationBuffer;

/// Keywords kept once the tracker overflows.
const RETAINED_KEYWORDS: usize = 15;
/// Size above which the tracker is trimmed.
const MAX_KEYWORDS: usize = 20;
/// Keywords taken from a single observation.
const KEYWORDS_PER_OBSERVATION: usize = 5;
/// Keywords listed by [`TopicTracker::summary`].
const SUMMARY_KEYWORDS: usize = 5;
/// Tokens of this many characters or fewer are ignored.
const MIN_KEYWORD_CHARS: usize = 3;

const TRIM_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']'];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should",
];

pub const SUMMARY_LABEL: &str = "Current conversation topics: ";
pub const NO_TOPIC_MESSAGE: &str = "No specific topic context available.";

/// Accumulates a bounded, insertion-ordered set of keywords.
#[derive(Debug, Clone, Default)]
pub struct TopicTracker {
    // oldest first; no duplicates
    keywords: Vec<String>,
}

impl TopicTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    /// Merge the keywords of one exchanged pair into the tracker.
    pub fn observe(&mut self, user_text: &str, agent_text: &str) {
        let text = format!("{user_text} {agent_text}");
        for keyword in extract_keywords(&text) {
            if !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }

        if self.keywords.len() > MAX_KEYWORDS {
            let excess = self.keywords.len() - RETAINED_KEYWORDS;
            self.keywords.drain(..excess);
            debug!("Trimmed topic keywords to {RETAINED_KEYWORDS}");
        }
    }

    /// Replay every retained turn of `buffer` through [`Self::observe`].
    pub fn seed_from(&mut self, buffer: &ConversationBuffer) {
        for turn in buffer.turns() {
            self.observe(turn.user_text(), turn.agent_text());
        }
    }

    /// Human-readable list of the most recently added keywords.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.keywords.is_empty() {
            return NO_TOPIC_MESSAGE.to_string();
        }

        let start = self.keywords.len().saturating_sub(SUMMARY_KEYWORDS);
        format!("{SUMMARY_LABEL}{}", self.keywords[start..].join(", "))
    }

    /// Tracked keywords, oldest first.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
    }
}

/// Extract up to five keywords from `text`, in left-to-right order.
///
/// Tokens are lowercased, stripped of surrounding punctuation and dropped
/// when they are stop words or no longer than three characters.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(TRIM_CHARS))
        .filter(|token| token.chars().count() > MIN_KEYWORD_CHARS)
        .filter(|token| !STOP_WORDS.contains(token))
        .take(KEYWORDS_PER_OBSERVATION)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_strips_punctuation_and_stop_words() {
        let keywords = extract_keywords("Could you EXPLAIN (quantum) computing, please?");
        assert_eq!(keywords, vec!["explain", "quantum", "computing", "please"]);
    }

    #[test]
    fn test_extract_keeps_first_five() {
        let keywords = extract_keywords("alpha bravo charlie delta echoes foxtrot golfing");
        assert_eq!(keywords, vec!["alpha", "bravo", "charlie", "delta", "echoes"]);
    }

    #[test]
    fn test_extract_drops_short_tokens() {
        assert!(extract_keywords("I am ok, are we? (yes)").is_empty());
    }

    #[test]
    fn test_duplicates_are_noops() {
        let mut tracker = TopicTracker::new();
        tracker.observe("rust ownership", "ownership rules");
        tracker.observe("borrowing", "rust");
        assert_eq!(tracker.keywords(), &["rust", "ownership", "rules", "borrowing"]);
    }

    #[test]
    fn test_summary() {
        let mut tracker = TopicTracker::new();
        assert_eq!(tracker.summary(), NO_TOPIC_MESSAGE);

        tracker.observe("tell me about volcanoes", "volcanoes erupt magma");
        assert_eq!(
            tracker.summary(),
            "Current conversation topics: tell, about, volcanoes, erupt"
        );
    }
}

//! Turn and snapshot record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exchanged pair of user input and agent response.
///
/// Turns are created by the conversation buffer and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    sequence_number: u64,
    user_text: String,
    agent_text: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    #[must_use]
    pub fn new(sequence_number: u64, user_text: String, agent_text: String) -> Self {
        Self {
            sequence_number,
            user_text,
            agent_text,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    #[must_use]
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    #[must_use]
    pub fn agent_text(&self) -> &str {
        &self.agent_text
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The serializable shape of this turn.
    #[must_use]
    pub fn to_record(&self) -> TurnRecord {
        TurnRecord {
            user_text: self.user_text.clone(),
            agent_text: self.agent_text.clone(),
        }
    }
}

/// Snapshot record: the only shape exchanged across the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub user_text: String,
    pub agent_text: String,
}

impl TurnRecord {
    #[must_use]
    pub fn new(user_text: impl Into<String>, agent_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            agent_text: agent_text.into(),
        }
    }
}

/// A snapshot record as read from untrusted input.
///
/// Either text may be missing; such records are skipped on import. The
/// `user`/`bot` aliases accept snapshots written by older exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTurnRecord {
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub user_text: Option<String>,
    #[serde(default, alias = "bot", skip_serializing_if = "Option::is_none")]
    pub agent_text: Option<String>,
}

impl RawTurnRecord {
    /// Returns the complete record, or `None` when a text field is missing.
    #[must_use]
    pub fn into_record(self) -> Option<TurnRecord> {
        Some(TurnRecord {
            user_text: self.user_text?,
            agent_text: self.agent_text?,
        })
    }
}

impl From<TurnRecord> for RawTurnRecord {
    fn from(record: TurnRecord) -> Self {
        Self {
            user_text: Some(record.user_text),
            agent_text: Some(record.agent_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_with_missing_field_is_rejected() {
        let raw = RawTurnRecord {
            user_text: Some("hello".to_string()),
            agent_text: None,
        };
        assert!(raw.into_record().is_none());
    }

    #[test]
    fn raw_record_accepts_legacy_keys() {
        let raw: RawTurnRecord =
            serde_json::from_str(r#"{"user": "hi", "bot": "hello", "turn_id": 3}"#).unwrap();
        assert_eq!(raw.into_record(), Some(TurnRecord::new("hi", "hello")));
    }

    #[test]
    fn turn_to_record_drops_metadata() {
        let turn = Turn::new(7, "question".to_string(), "answer".to_string());
        assert_eq!(turn.sequence_number(), 7);
        assert_eq!(turn.to_record(), TurnRecord::new("question", "answer"));
    }
}

//! Integration tests for the conversation buffer.
//!
//! These exercise the public contract end to end: FIFO eviction, the
//! monotonic turn counter, prompt rendering and snapshot import/export.

use minichat_core::{RawTurnRecord, Turn, TurnRecord};
use minichat_memory::{BufferConfig, ConversationBuffer};

fn numbered_records(count: usize) -> Vec<TurnRecord> {
    (1..=count)
        .map(|i| TurnRecord::new(format!("question {i}"), format!("answer {i}")))
        .collect()
}

#[test]
fn test_retained_turns_are_most_recent_in_order() {
    for calls in 0..12_usize {
        let mut buffer = ConversationBuffer::new();
        for i in 1..=calls {
            buffer.add_turn(&format!("q{i}"), &format!("a{i}"));
        }

        let retained: Vec<String> = buffer.turns().map(|t| t.user_text().to_string()).collect();
        let first_kept = calls.saturating_sub(5) + 1;
        let expected: Vec<String> = (first_kept..=calls).map(|i| format!("q{i}")).collect();

        assert!(buffer.len() <= buffer.capacity());
        assert_eq!(retained, expected, "after {calls} calls");
    }
}

#[test]
fn test_total_turns_seen_counts_every_call() {
    let mut buffer = ConversationBuffer::with_config(BufferConfig::default().with_capacity(3));
    for i in 0..17 {
        buffer.add_turn(&format!("q{i}"), "");
    }

    let stats = buffer.stats();
    assert_eq!(stats.total_turns_seen, 17);
    assert_eq!(stats.current_length, 3);
    assert_eq!(stats.capacity, 3);
    assert!(stats.is_full);
}

#[test]
fn test_empty_buffer_prompt() {
    let buffer = ConversationBuffer::new();
    assert_eq!(buffer.render_prompt("Hi"), "Human: Hi\nAssistant:");
}

#[test]
fn test_prompt_contains_every_retained_turn() {
    let mut buffer = ConversationBuffer::new();
    buffer.add_turn("What is Rust?", "A systems language.");
    buffer.add_turn("Who made it?", "Mozilla, originally.");

    let prompt = buffer.render_prompt("Is it fast?");
    let lines: Vec<&str> = prompt.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Human: What is Rust?",
            "Assistant: A systems language.",
            "Human: Who made it?",
            "Assistant: Mozilla, originally.",
            "Human: Is it fast?",
            "Assistant:",
        ]
    );
    assert!(!prompt.ends_with('\n'));
}

#[test]
fn test_long_user_text_is_truncated_at_insertion() {
    let long_text: Vec<String> = (1..=150).map(|i| format!("word{i}")).collect();
    let mut buffer = ConversationBuffer::new();
    buffer.add_turn(&long_text.join(" "), "short reply");

    let stored = buffer.export_snapshot();
    let expected = format!("{}...", long_text[..100].join(" "));
    assert_eq!(stored[0].user_text, expected);
    assert_eq!(stored[0].agent_text, "short reply");
}

#[test]
fn test_empty_strings_are_stored_as_is() {
    let mut buffer = ConversationBuffer::new();
    buffer.add_turn("", "");
    assert_eq!(buffer.export_snapshot(), vec![TurnRecord::new("", "")]);
    assert_eq!(buffer.render_prompt("x"), "Human: \nAssistant: \nHuman: x\nAssistant:");
}

#[test]
fn test_export_import_round_trip() {
    let mut buffer = ConversationBuffer::new();
    for i in 0..8 {
        buffer.add_turn(&format!("q{i}"), &format!("a{i}"));
    }
    let before = buffer.export_snapshot();

    let imported = buffer.import_records(&before);

    assert_eq!(imported, 5);
    assert_eq!(buffer.export_snapshot(), before);
    assert_eq!(buffer.len(), 5);
    let numbers: Vec<u64> = buffer.turns().map(Turn::sequence_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_truncated_text_survives_round_trip_unchanged() {
    let long_text: Vec<String> = (1..=150).map(|i| format!("w{i}")).collect();
    let mut buffer = ConversationBuffer::new();
    buffer.add_turn(&long_text.join(" "), &long_text.join(" "));
    let before = buffer.export_snapshot();
    let expected = format!("{}...", long_text[..100].join(" "));
    assert_eq!(before[0].user_text, expected);

    buffer.import_records(&before);
    let after = buffer.export_snapshot();

    assert_eq!(after, before);
    assert_eq!(after[0].user_text.split_whitespace().count(), 100);
    assert!(after[0].agent_text.ends_with("w100..."));
    assert!(!after[0].agent_text.ends_with("......"));
}

#[test]
fn test_import_keeps_last_capacity_records() {
    let mut buffer = ConversationBuffer::new();
    buffer.add_turn("stale", "state");

    let records = numbered_records(8);
    buffer.import_records(&records);

    assert_eq!(buffer.export_snapshot(), records[3..].to_vec());
    assert_eq!(buffer.stats().total_turns_seen, 5);
}

#[test]
fn test_import_skips_malformed_records() {
    let mut buffer = ConversationBuffer::new();
    let records = vec![
        RawTurnRecord::from(TurnRecord::new("one", "1")),
        RawTurnRecord {
            user_text: Some("missing agent".to_string()),
            agent_text: None,
        },
        RawTurnRecord::default(),
        RawTurnRecord::from(TurnRecord::new("two", "2")),
    ];

    let imported = buffer.import_snapshot(&records);

    assert_eq!(imported, 2);
    assert_eq!(buffer.stats().total_turns_seen, 2);
    assert_eq!(
        buffer.export_snapshot(),
        vec![TurnRecord::new("one", "1"), TurnRecord::new("two", "2")]
    );
}

#[test]
fn test_clear_resets_everything() {
    let mut buffer = ConversationBuffer::new();
    for i in 0..7 {
        buffer.add_turn(&format!("q{i}"), "a");
    }

    buffer.clear();
    let stats = buffer.stats();

    assert_eq!(stats.total_turns_seen, 0);
    assert_eq!(stats.current_length, 0);
    assert!(!stats.is_full);

    buffer.add_turn("fresh", "start");
    assert_eq!(buffer.recent(None)[0].sequence_number(), 1);
}

// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
use super::*;

#[test]
fn json_lines_yield_events_in_order() {
    let input = "\
{\"id\": 0, \"timestamp\": 10}\n\
{\"id\": 1, \"timestamp\": 11}\n";

    let mut source = JsonLines::new(input.as_bytes());
    let first = source.next_event().expect("Could not read event");
    assert_eq!(first.expect("No event yielded").u64("timestamp"), Some(10));
    let second = source.next_event().expect("Could not read event");
    assert_eq!(second.expect("No event yielded").u64("timestamp"), Some(11));
    assert!(source.next_event().expect("Could not read event").is_none());
}

#[test]
fn json_lines_skip_unrelated_content() {
    let input = "\
starting simulation\n\
42\n\
[1, 2, 3]\n\
{\"id\": 0, \"timestamp\": 10}\n\
\n";

    let mut source = JsonLines::new(input.as_bytes());
    let event = source
        .next_event()
        .expect("Could not read event")
        .expect("No event yielded");
    assert_eq!(event.u64("id"), Some(0));
    assert!(source.next_event().expect("Could not read event").is_none());
}

#[test]
fn field_accessors() {
    let event: Event = serde_json::from_str(
        r#"{"pc": 128, "insn": 19, "name": "addi", "negative": -1}"#,
    )
    .expect("Could not parse event");

    assert_eq!(event.u64("pc"), Some(128));
    assert_eq!(event.u64("missing"), None);
    assert_eq!(event.u64("name"), None);
    assert_eq!(event.u64("negative"), None);
    assert_eq!(event.str("name"), Some("addi"));
    assert_eq!(event.str("pc"), None);
}

#[test]
fn events_convert_from_object_values_only() {
    let event = Event::try_from(serde_json::json!({"id": 1}))
        .expect("Could not convert object value");
    assert_eq!(event.u64("id"), Some(1));
    assert!(Event::try_from(serde_json::json!([1, 2])).is_err());
}

#[test]
fn insn_field_is_word_or_text() {
    let event: Event = serde_json::from_str(r#"{"raw": 19, "text": "addi a0, a0, 1"}"#)
        .expect("Could not parse event");

    assert_eq!(event.insn("raw"), Some(crate::types::Insn::Word(19)));
    assert_eq!(
        event.insn("text"),
        Some(crate::types::Insn::Text("addi a0, a0, 1".into())),
    );
    assert_eq!(event.insn("missing"), None);
}

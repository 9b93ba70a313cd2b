// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
use super::*;

fn names(pipeline: &Pipeline) -> Vec<&'static str> {
    pipeline.stages.iter().map(|s| s.name).collect()
}

#[test]
fn declared_stage_orders() {
    assert_eq!(names(&ARIANE), ["IF", "DE", "IS", "EX", "C"]);
    assert_eq!(names(&BOOM), ["IF", "DE", "RN", "IS", "C", "RE"]);
    assert_eq!(names(&IBEX), ["IF", "IDEX"]);
    assert_eq!(names(&SWERV_EL2), ["IF", "DE", "EX", "WB"]);
}

#[test]
fn retire_rules_point_at_terminal_stages() {
    // One documented rule per pipeline family
    assert_eq!(ARIANE.retire, RetireRule::Stage(4));
    assert_eq!(ARIANE.stages[4].name, "C");
    assert_eq!(BOOM.retire, RetireRule::Stage(5));
    assert_eq!(BOOM.stages[5].name, "RE");
    assert_eq!(IBEX.retire, RetireRule::End);
    assert_eq!(SWERV_EL2.retire, RetireRule::End);
}

#[test]
fn dialects_resolve_by_name() {
    for dialect in DIALECTS {
        assert_eq!(Dialect::from_name(dialect.name()), Some(*dialect));
    }
    assert_eq!(Dialect::from_name("rocket"), None);
}

#[test]
fn text_dialects_are_always_supported() {
    assert!(Dialect::Ariane.supported());
    assert!(Dialect::Boom.supported());
}

#[cfg(not(feature = "events"))]
#[test]
fn event_dialects_fail_without_reader() {
    assert!(!Dialect::Ibex.supported());
    let err = Dialect::Ibex
        .parse(&b""[..])
        .expect_err("Parse unexpectedly succeeded");
    assert!(matches!(err, crate::parser::Error::Unsupported { .. }));
}

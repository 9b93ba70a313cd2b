// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Whole-pipeline tests: parse, filter and render synthetic traces

use crate::filter::{Filter, Row};
use crate::pipeline::Dialect;
use crate::render::Renderer;
use crate::types::ModeSet;

fn modes(letters: &str) -> ModeSet {
    letters.parse().expect("Could not parse mode set")
}

#[test]
fn ariane_mode_filtered_timeline() {
    yansi::disable();

    let trace = "\
 0 IF 1 M 0000000080000000\n\
 1 C 1\n\
 2 IF 2 M 0000000080000004\n\
 3 C 2\n\
 4 IF 3 U 0000000080000008\n\
 5 C 3\n\
 6 IF 4 U 000000008000000c\n\
 7 C 4\n\
 8 IF 5 M 0000000080000010\n\
 9 C 5\n";

    let dialect = Dialect::Ariane;
    let pipeline = dialect.pipeline();
    let store = dialect.parse(trace.as_bytes()).expect("Could not parse trace");
    assert_eq!(store.len(), 5);

    let renderer = Renderer::new(pipeline, 20, "mr".parse().expect("Could not parse layout"));
    let rows: Vec<_> = Filter::new(store.records(), modes("M"), pipeline.retire)
        .map(|row| renderer.row_string(&row, None))
        .collect();

    assert_eq!(
        rows,
        [
            "[fc..................] M        1",
            "[..fc................] M        2",
            "~~~~~~~~~~~~~~~~~~~~ snip (mode)",
            "[........fc..........] M        1",
        ],
    );
}

#[test]
fn rendered_rows_account_for_every_record() {
    let trace = "\
 0 IF 1 M 0000000080000000\n\
 1 IF 2 U 0000000080000004\n\
 2 IF 3 U 0000000080000008\n\
 3 IF 4 S 000000008000000c\n\
 4 IF 5 M 0000000080000010\n";

    let dialect = Dialect::Ariane;
    let store = dialect.parse(trace.as_bytes()).expect("Could not parse trace");

    let allowed = modes("MS");
    let rows: Vec<_> =
        Filter::new(store.records(), allowed, dialect.pipeline().retire).collect();
    let visible = rows
        .iter()
        .filter(|r| matches!(r, Row::Visible { .. }))
        .count();
    let elided = store
        .records()
        .filter(|r| !allowed.contains(r.mode))
        .count();
    assert_eq!(visible + elided, store.len());
}

#[test]
fn boom_timeline_with_mnemonics() {
    yansi::disable();

    let trace = "\
 7; O3PipeView:fetch:10000:0x0000000080001000:0: 7:li a0, 7\n\
 7; O3PipeView:decode:11000\n\
 7; O3PipeView:rename:12000\n\
 7; O3PipeView:dispatch:13000\n\
 7; O3PipeView:complete:15000\n\
 7; O3PipeView:retire:16000:store: 0:3\n";

    let dialect = Dialect::Boom;
    let pipeline = dialect.pipeline();
    let store = dialect.parse(trace.as_bytes()).expect("Could not parse trace");

    let renderer = Renderer::new(pipeline, 20, "rti".parse().expect("Could not parse layout"));
    let rows: Vec<_> = Filter::new(store.records(), modes("MSU"), pipeline.retire)
        .map(|row| renderer.row_string(&row, None))
        .collect();

    assert_eq!(
        rows,
        ["[..........fdni=cr...]        1       10-      16 li a0, 7            "],
    );
}

#[cfg(feature = "events")]
#[test]
fn ibex_timeline_with_multicycle_tail() {
    yansi::disable();

    let trace = r#"
{"id": 0, "insn_id": 1, "timestamp": 2, "pc": 256, "mode": 3}
{"id": 2, "insn_id": 1, "timestamp": 3}
{"id": 3, "insn_id": 1, "timestamp": 6}
{"id": 0, "insn_id": 2, "timestamp": 4, "pc": 260, "mode": 3}
{"id": 1, "insn_id": 2, "timestamp": 7}
"#;

    let dialect = Dialect::Ibex;
    let pipeline = dialect.pipeline();
    let store = dialect.parse(trace.as_bytes()).expect("Could not parse trace");

    let renderer = Renderer::new(pipeline, 10, "r".parse().expect("Could not parse layout"));
    let rows: Vec<_> = Filter::new(store.records(), modes("M"), pipeline.retire)
        .map(|row| renderer.row_string(&row, None))
        .collect();

    assert_eq!(
        rows,
        [
            "[..fe===...]        1",
            "[....f==e..]        2",
        ],
    );
}

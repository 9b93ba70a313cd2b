// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
use super::*;

use crate::insn::Model;
use crate::pipeline::{ARIANE, IBEX, SWERV_EL2};
use crate::types::{Mode, branch};

fn renderer<'p>(pipeline: &'p Pipeline, width: usize, format: &str) -> Renderer<'p> {
    yansi::disable();
    Renderer::new(pipeline, width, format.parse().expect("Could not parse layout"))
}

fn visible(record: &Record) -> Row<'_> {
    Row::Visible { record, retired: 0 }
}

#[test]
fn five_stage_round_trip() {
    let renderer = renderer(&ARIANE, 20, "");

    let mut record = Record::new(0x8000_0000, Mode::Machine, 5);
    for (stage, cycle) in [10, 11, 13, 15, 16].into_iter().enumerate() {
        record.set_stamp(stage, cycle);
    }

    assert_eq!(
        renderer.row_string(&visible(&record), None),
        "[..........fd=i=ec...]",
    );
}

#[test]
fn timestamps_wrap_around() {
    let renderer = renderer(&SWERV_EL2, 20, "");

    let mut record = Record::new(0x8000_0000, Mode::Machine, 4);
    record.set_stamp(0, 105);

    assert_eq!(
        renderer.row_string(&visible(&record), None),
        "[.....f..............]",
    );
}

#[test]
fn variable_latency_tail_fills_through_end() {
    let renderer = renderer(&IBEX, 20, "");

    let mut record = Record::new(0x100, Mode::Machine, 2);
    record.set_stamp(0, 3);
    record.set_stamp(1, 5);
    record.end = Some(8);

    assert_eq!(
        renderer.row_string(&visible(&record), None),
        "[...f=e===...........]",
    );
}

#[test]
fn distant_end_covers_the_whole_window() {
    let renderer = renderer(&IBEX, 10, "");

    let mut record = Record::new(0x100, Mode::Machine, 2);
    record.set_stamp(0, 0);
    record.set_stamp(1, 1);
    record.end = Some(1_000_000);

    // A tail longer than one wrap leaves its fill glyph in every cell
    assert_eq!(renderer.row_string(&visible(&record), None), "[==========]");
}

#[test]
fn snip_marker() {
    let renderer = renderer(&ARIANE, 10, "mrtpi");
    assert_eq!(renderer.row_string(&Row::Snip, None), "~~~~~~~~~~ snip (mode)");
}

#[test]
fn columns_are_padded() {
    let renderer = renderer(&ARIANE, 20, "mrtp");

    let mut record = Record::new(0x8000_0000, Mode::Machine, 5);
    record.set_stamp(0, 10);
    let row = Row::Visible {
        record: &record,
        retired: 3,
    };

    assert_eq!(
        renderer.row_string(&row, None),
        "[..........f.........] M        3       10--------- 0000000080000000",
    );
}

#[test]
fn mnemonic_from_raw_word() {
    let renderer = renderer(&ARIANE, 10, "i");

    let mut record = Record::new(0x8000_0000, Mode::Machine, 5);
    record.insn = Some(crate::types::Insn::Word(0x0015_0513));
    record.set_stamp(0, 0);

    assert_eq!(
        renderer.row_string(&visible(&record), None),
        "[f.........] addi a0, a0, 1      ",
    );
}

#[test]
fn missing_fields_render_placeholders() {
    let renderer = renderer(&ARIANE, 10, "ti");

    // No stage observed at all, no instruction
    let record = Record::new(0x8000_0000, Mode::Machine, 5);

    assert_eq!(
        renderer.row_string(&visible(&record), None),
        format!("[..........] {} {}", "-".repeat(17), " ".repeat(20)),
    );
}

#[test]
fn operand_annotation() {
    let renderer = renderer(&ARIANE, 10, "e");

    let mut record = Record::new(0x8000_0000, Mode::Machine, 5);
    // addi a0, zero, 5
    record.insn = Some(crate::types::Insn::Word(0x0050_0513));

    let mut model = Model::new();
    let line = renderer.row_string(&visible(&record), Some(&mut model));
    assert_eq!(
        line,
        format!("[..........] [i] zero=0x0 [o] a0=0x5{}", " ".repeat(17)),
    );
}

#[test]
fn branch_annotation_suffix() {
    let renderer = renderer(&ARIANE, 10, "b");

    let mut record = Record::new(0x8000_0000, Mode::Machine, 5);
    record.branch.prediction = Some(branch::Prediction {
        kind: branch::Kind::Dynamic,
        index: 17,
        taken: true,
    });
    record.branch.update = Some(branch::Update {
        index: 17,
        taken: false,
        old: branch::Counter::from_binary_str("01").expect("Could not parse counter"),
        new: branch::Counter::from_binary_str("00").expect("Could not parse counter"),
    });

    assert_eq!(
        renderer.row_string(&visible(&record), None),
        "[..........] , BP taken @17 (dynamic), BHT @17 not taken (01->00)",
    );
}

#[test]
fn preamble_legend_and_headers() {
    let renderer = renderer(&IBEX, 10, "mrt");

    let mut out = Vec::new();
    renderer
        .write_preamble(&mut out)
        .expect("Could not write preamble");
    let text = String::from_utf8(out).expect("Preamble is not valid UTF-8");
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], "f=fetch e=decode/execute");
    // The mode caption sits above the first appended column
    assert_eq!(lines[1], format!("{}mode", " ".repeat(11)));
    assert_eq!(lines[2], format!("{}| #retired    cycle from-to", " ".repeat(13)));
    assert_eq!(lines.len(), 3);
}

#[test]
fn layout_rejects_unknown_letters() {
    assert_eq!("mrxp".parse::<Layout>(), Err('x'));
    assert!("mrtpieb".parse::<Layout>().is_ok());
}

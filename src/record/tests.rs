// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
use super::*;

#[test]
fn stamps() {
    let mut record = Record::new(0x8000_0000, Mode::Machine, 3);
    assert_eq!(record.stamp(0), None);
    record.set_stamp(0, 10);
    record.set_stamp(2, 12);
    assert_eq!(record.stamp(0), Some(10));
    assert_eq!(record.stamp(1), None);
    assert_eq!(record.stamp(2), Some(12));
    assert_eq!(record.stamp(3), None);
}

#[test]
fn update_requires_record() {
    let mut store = Store::new();
    assert_eq!(store.update(7, 0, 10), Err(MissingId(7)));

    store.upsert(7, Record::new(0x80, Mode::Machine, 2));
    assert_eq!(store.update(7, 1, 11), Ok(()));
    assert_eq!(store.update(8, 1, 11), Err(MissingId(8)));
}

#[test]
fn iteration_order_is_first_appearance() {
    let mut store = Store::new();
    store.upsert(3, Record::new(0x30, Mode::Machine, 1));
    store.upsert(1, Record::new(0x10, Mode::Machine, 1));
    store.upsert(2, Record::new(0x20, Mode::Machine, 1));

    let pcs: Vec<_> = store.records().map(|r| r.pc).collect();
    assert_eq!(pcs, [0x30, 0x10, 0x20]);
}

#[test]
fn id_reuse_keeps_both_records() {
    let mut store = Store::new();
    let mut first = Record::new(0x10, Mode::Machine, 1);
    first.set_stamp(0, 10);
    first.end = Some(12);
    store.upsert(5, first);

    // The same id shows up again after the first instruction completed
    store.upsert(5, Record::new(0x40, Mode::Machine, 1));
    store.update(5, 0, 20).expect("Could not update record");

    assert_eq!(store.len(), 2);
    let records: Vec<_> = store.records().collect();
    assert_eq!(records[0].pc, 0x10);
    assert_eq!(records[0].stamp(0), Some(10));
    assert_eq!(records[0].end, Some(12));
    assert_eq!(records[1].pc, 0x40);
    assert_eq!(records[1].stamp(0), Some(20));
    assert_eq!(records[1].end, None);
}

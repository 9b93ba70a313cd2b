// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Parser for CVA6/Ariane pipeline trace logs
//!
//! The testbench emits one event per line:
//!
//! - `<cycle> IF <id> <mode> <addr>`
//! - `<cycle> DE <id> <addr> <insn>`
//! - `<cycle> IS <id>`
//! - `<cycle> EX <id>`
//! - `<cycle> C <id>`
//!
//! plus branch predictor side-channel lines:
//!
//! - `<cycle> BHT <id> <pc> <index> [<valid>] <taken>: <old>-><new>`
//! - `<cycle> BP STATIC <id> <pc> <index> <direction>`
//! - `<cycle> BP DYNAMIC <id> <pc> <index> <counter>`

use std::io::BufRead;

use regex::Regex;

use crate::pipeline::ARIANE;
use crate::record::{Record, Store};
use crate::types::{Insn, Mode, branch};

use super::{Error, uint};

const IF: usize = 0;
const DE: usize = 1;
const IS: usize = 2;
const EX: usize = 3;
const C: usize = 4;

struct Grammar {
    fetch: Regex,
    decode: Regex,
    issue: Regex,
    execute: Regex,
    complete: Regex,
    bht: Regex,
    bp_static: Regex,
    bp_dynamic: Regex,
}

impl Grammar {
    fn new() -> Self {
        Self {
            fetch: Regex::new(r"^\s*(\d+) IF \s*(\d+) (\w) ([0-9A-Fa-f]+)")
                .expect("Invalid fetch pattern"),
            decode: Regex::new(r"^\s*(\d+) DE \s*(\d+) ([0-9A-Fa-f]+) (.*)")
                .expect("Invalid decode pattern"),
            issue: Regex::new(r"^\s*(\d+) IS \s*(\d+)").expect("Invalid issue pattern"),
            execute: Regex::new(r"^\s*(\d+) EX \s*(\d+)").expect("Invalid execute pattern"),
            complete: Regex::new(r"^\s*(\d+) C \s*(\d+)").expect("Invalid complete pattern"),
            bht: Regex::new(r"^\s*(\d+) BHT\s+(\d+) ([0-9A-Fa-f]+)\s+(\d+) \[(\d)\] (\d): (\d+)->(\d+)")
                .expect("Invalid BHT pattern"),
            bp_static: Regex::new(r"^\s*(\d+) BP STATIC \s*(\d+) ([0-9A-Fa-f]+)\s+(\d+) (\d)")
                .expect("Invalid static prediction pattern"),
            bp_dynamic: Regex::new(r"^\s*(\d+) BP DYNAMIC \s*(\d+) ([0-9A-Fa-f]+)\s+(\d+) (\d+)")
                .expect("Invalid dynamic prediction pattern"),
        }
    }
}

/// Parse a complete Ariane trace
pub fn parse(input: impl BufRead) -> Result<Store, Error> {
    let grammar = Grammar::new();
    let mut store = Store::new();

    for (num, line) in input.lines().enumerate() {
        let line = line?;
        let unit = num as u64 + 1;

        if let Some(m) = grammar.fetch.captures(&line) {
            let cycle = uint(&m[1], 10, "cycle", unit)?;
            let id = uint(&m[2], 10, "instruction id", unit)?;
            let mode = m[3]
                .chars()
                .next()
                .and_then(|l| Mode::try_from(l).ok())
                .ok_or(Error::Malformed { what: "mode", unit })?;
            let pc = uint(&m[4], 16, "address", unit)?;

            let mut record = Record::new(pc, mode, ARIANE.stages.len());
            record.set_stamp(IF, cycle);
            store.upsert(id, record);
        } else if let Some(m) = grammar.decode.captures(&line) {
            let cycle = uint(&m[1], 10, "cycle", unit)?;
            let id = uint(&m[2], 10, "instruction id", unit)?;
            let restated = uint(&m[3], 16, "address", unit)?;

            let record = store.get_mut(id).ok_or(Error::UnknownId {
                stage: "DE",
                id,
                unit,
            })?;
            if restated & !(ARIANE.ialign - 1) != record.pc {
                return Err(Error::PcMismatch {
                    id,
                    unit,
                    stored: record.pc,
                    restated,
                });
            }
            record.pc = restated;
            record.insn = Some(Insn::Text(m[4].to_string()));
            record.set_stamp(DE, cycle);
        } else if let Some(m) = grammar.issue.captures(&line) {
            stamp(&mut store, &m, IS, "IS", unit)?;
        } else if let Some(m) = grammar.execute.captures(&line) {
            stamp(&mut store, &m, EX, "EX", unit)?;
        } else if let Some(m) = grammar.complete.captures(&line) {
            stamp(&mut store, &m, C, "C", unit)?;
        } else if let Some(m) = grammar.bht.captures(&line) {
            let id = uint(&m[2], 10, "instruction id", unit)?;
            let index = uint(&m[4], 10, "table index", unit)?;
            let taken = &m[6] == "1";
            let old = branch::Counter::from_binary_str(&m[7])
                .ok_or(Error::Malformed { what: "BHT counter", unit })?;
            let new = branch::Counter::from_binary_str(&m[8])
                .ok_or(Error::Malformed { what: "BHT counter", unit })?;

            let record = store.get_mut(id).ok_or(Error::UnknownId {
                stage: "BHT",
                id,
                unit,
            })?;
            record.branch.update = Some(branch::Update {
                index,
                taken,
                old,
                new,
            });
        } else if let Some(m) = grammar.bp_static.captures(&line) {
            let id = uint(&m[2], 10, "instruction id", unit)?;
            let index = uint(&m[4], 10, "table index", unit)?;
            let taken = &m[5] == "1";
            predict(&mut store, id, branch::Kind::Static, index, taken, unit)?;
        } else if let Some(m) = grammar.bp_dynamic.captures(&line) {
            let id = uint(&m[2], 10, "instruction id", unit)?;
            let index = uint(&m[4], 10, "table index", unit)?;
            let taken = branch::Counter::from_binary_str(&m[5])
                .ok_or(Error::Malformed { what: "predictor counter", unit })?
                .taken();
            predict(&mut store, id, branch::Kind::Dynamic, index, taken, unit)?;
        } else {
            tracing::trace!(unit, "skipping unrecognized line");
        }
    }

    Ok(store)
}

fn stamp(
    store: &mut Store,
    m: &regex::Captures<'_>,
    stage: usize,
    name: &'static str,
    unit: u64,
) -> Result<(), Error> {
    let cycle = uint(&m[1], 10, "cycle", unit)?;
    let id = uint(&m[2], 10, "instruction id", unit)?;
    store.update(id, stage, cycle).map_err(|e| Error::UnknownId {
        stage: name,
        id: e.0,
        unit,
    })
}

fn predict(
    store: &mut Store,
    id: u64,
    kind: branch::Kind,
    index: u64,
    taken: bool,
    unit: u64,
) -> Result<(), Error> {
    let record = store.get_mut(id).ok_or(Error::UnknownId {
        stage: "BP",
        id,
        unit,
    })?;
    record.branch.prediction = Some(branch::Prediction { kind, index, taken });
    Ok(())
}

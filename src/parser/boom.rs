// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Parser for BOOM pipeline trace logs in the O3PipeView format
//!
//! Lines have the shape `<id>; O3PipeView:<stage>:<tick>[:<payload>]` with
//! sub-cycle ticks. Ticks are normalized to whole pipeline cycles by a fixed
//! truncating scale-down before they are stored.
//!
//! The format carries no per-instruction mode field. Retire events of store
//! type restate the mode the instruction retired under; that mode is kept as
//! a running guess for subsequently fetched instructions, seeded with machine
//! mode.

use std::io::BufRead;

use regex::Regex;

use crate::pipeline::BOOM;
use crate::record::{Record, Store};
use crate::types::{Insn, Mode};

use super::{Error, uint};

const IF: usize = 0;
const DE: usize = 1;
const RN: usize = 2;
const IS: usize = 3;
const C: usize = 4;
const RE: usize = 5;

/// Sub-cycle ticks per pipeline cycle
const SCALE: u64 = 1000;

struct Grammar {
    fetch: Regex,
    decode: Regex,
    rename: Regex,
    dispatch: Regex,
    complete: Regex,
    retire: Regex,
}

impl Grammar {
    fn new() -> Self {
        Self {
            fetch: Regex::new(r"^\s*(\d+); O3PipeView:fetch:\s*(\d+):0x([0-9A-Fa-f]+):0:\s*\d+:(.*)")
                .expect("Invalid fetch pattern"),
            decode: Regex::new(r"^\s*(\d+); O3PipeView:decode:\s*(\d+)")
                .expect("Invalid decode pattern"),
            rename: Regex::new(r"^\s*(\d+); O3PipeView:rename:\s*(\d+)")
                .expect("Invalid rename pattern"),
            dispatch: Regex::new(r"^\s*(\d+); O3PipeView:dispatch:\s*(\d+)")
                .expect("Invalid dispatch pattern"),
            complete: Regex::new(r"^\s*(\d+); O3PipeView:complete:\s*(\d+)")
                .expect("Invalid complete pattern"),
            retire: Regex::new(r"^\s*(\d+); O3PipeView:retire:\s*(\d+):store: 0:(\d)")
                .expect("Invalid retire pattern"),
        }
    }
}

/// Parse a complete BOOM trace
pub fn parse(input: impl BufRead) -> Result<Store, Error> {
    let grammar = Grammar::new();
    let mut store = Store::new();
    let mut guess = Mode::Machine;

    for (num, line) in input.lines().enumerate() {
        let line = line?;
        let unit = num as u64 + 1;

        if let Some(m) = grammar.fetch.captures(&line) {
            let id = uint(&m[1], 10, "instruction id", unit)?;
            let tick = uint(&m[2], 10, "tick", unit)?;
            let pc = uint(&m[3], 16, "address", unit)?;

            let mut record = Record::new(pc, guess, BOOM.stages.len());
            record.insn = Some(Insn::Text(m[4].to_string()));
            record.set_stamp(IF, tick / SCALE);
            store.upsert(id, record);
        } else if let Some(m) = grammar.retire.captures(&line) {
            let id = uint(&m[1], 10, "instruction id", unit)?;
            let tick = uint(&m[2], 10, "tick", unit)?;
            let mode = u8::try_from(uint(&m[3], 10, "mode", unit)?)
                .ok()
                .and_then(|i| Mode::try_from(i).ok())
                .ok_or(Error::Malformed { what: "mode", unit })?;

            let record = store.get_mut(id).ok_or(Error::UnknownId {
                stage: "retire",
                id,
                unit,
            })?;
            record.set_stamp(RE, tick / SCALE);
            record.mode = mode;
            guess = mode;
        } else if let Some((m, stage, name)) = [
            (&grammar.decode, DE, "decode"),
            (&grammar.rename, RN, "rename"),
            (&grammar.dispatch, IS, "dispatch"),
            (&grammar.complete, C, "complete"),
        ]
        .into_iter()
        .find_map(|(p, s, n)| p.captures(&line).map(|m| (m, s, n)))
        {
            let id = uint(&m[1], 10, "instruction id", unit)?;
            let tick = uint(&m[2], 10, "tick", unit)?;
            store
                .update(id, stage, tick / SCALE)
                .map_err(|e| Error::UnknownId {
                    stage: name,
                    id: e.0,
                    unit,
                })?;
        } else {
            tracing::trace!(unit, "skipping unrecognized line");
        }
    }

    Ok(store)
}

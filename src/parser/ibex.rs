// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Parser for Ibex structured-event traces
//!
//! Ibex folds decode and execute into a single stage whose execute tail may
//! take multiple cycles. Single-cycle instructions report one `IDEX` event
//! setting both the stage entry and the retirement timestamp; multi-cycle
//! instructions split them into an `IDEX_MULTCYCLE_START`/`..._END` pair.

use crate::event::{Event, Source};
use crate::pipeline::IBEX;
use crate::record::{Record, Store};
use crate::types::Mode;

use super::Error;

const IF: usize = 0;
const IDEX: usize = 1;

/// Event kind discriminators, in the order declared by the tracer
const KIND_IF: u64 = 0;
const KIND_IDEX: u64 = 1;
const KIND_IDEX_MULTCYCLE_START: u64 = 2;
const KIND_IDEX_MULTCYCLE_END: u64 = 3;

/// Parse a complete Ibex trace
pub fn parse(mut source: impl Source) -> Result<Store, Error> {
    let mut store = Store::new();
    let mut unit = 0;

    while let Some(event) = source.next_event()? {
        unit += 1;

        let Some(kind) = event.u64("id") else {
            tracing::trace!(unit, "skipping event without kind");
            continue;
        };
        let timestamp = required(&event, "timestamp", unit)?;

        match kind {
            KIND_IF => {
                let id = required(&event, "insn_id", unit)?;
                let pc = required(&event, "pc", unit)?;
                let mode = u8::try_from(required(&event, "mode", unit)?)
                    .ok()
                    .and_then(|i| Mode::try_from(i).ok())
                    .ok_or(Error::Malformed { what: "mode", unit })?;

                let mut record = Record::new(pc, mode, IBEX.stages.len());
                record.insn = event.insn("insn");
                record.set_stamp(IF, timestamp);
                store.upsert(id, record);
            }
            KIND_IDEX => {
                let record = lookup(&mut store, &event, "IDEX", unit)?;
                record.set_stamp(IDEX, timestamp);
                record.end = Some(timestamp);
            }
            KIND_IDEX_MULTCYCLE_START => {
                lookup(&mut store, &event, "IDEX", unit)?.set_stamp(IDEX, timestamp);
            }
            KIND_IDEX_MULTCYCLE_END => {
                lookup(&mut store, &event, "IDEX", unit)?.end = Some(timestamp);
            }
            kind => tracing::trace!(unit, kind, "skipping event of unknown kind"),
        }
    }

    Ok(store)
}

fn required(event: &Event, field: &'static str, unit: u64) -> Result<u64, Error> {
    event.u64(field).ok_or(Error::Malformed { what: field, unit })
}

fn lookup<'s>(
    store: &'s mut Store,
    event: &Event,
    stage: &'static str,
    unit: u64,
) -> Result<&'s mut Record, Error> {
    let id = required(event, "insn_id", unit)?;
    store
        .get_mut(id)
        .ok_or(Error::UnknownId { stage, id, unit })
}

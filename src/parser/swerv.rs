// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Parser for SweRV EL2 structured-event traces
//!
//! One event kind per stage. The trace carries no privilege information, so
//! every record is tagged with the documented default of machine mode. Write
//! back is the pipeline's terminal stage and doubles as the retirement
//! timestamp.

use crate::event::{Event, Source};
use crate::pipeline::SWERV_EL2;
use crate::record::{Record, Store};
use crate::types::Mode;

use super::Error;

const IF: usize = 0;
const DE: usize = 1;
const EX: usize = 2;
const WB: usize = 3;

/// Event kind discriminators, in the order declared by the tracer
const KIND_IF: u64 = 0;
const KIND_DE: u64 = 1;
const KIND_EX: u64 = 2;
const KIND_WB: u64 = 3;

/// Parse a complete SweRV EL2 trace
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

                let mut record = Record::new(pc, Mode::Machine, SWERV_EL2.stages.len());
                record.insn = event.insn("insn");
                record.set_stamp(IF, timestamp);
                store.upsert(id, record);
            }
            KIND_DE => {
                lookup(&mut store, &event, "DE", unit)?.set_stamp(DE, timestamp);
            }
            KIND_EX => {
                lookup(&mut store, &event, "EX", unit)?.set_stamp(EX, timestamp);
            }
            KIND_WB => {
                let record = lookup(&mut store, &event, "WB", unit)?;
                record.set_stamp(WB, timestamp);
                record.end = Some(timestamp);
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

// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Structured trace event transport
//!
//! Event-based dialects do not match text lines; they consume a stream of
//! keyed field maps delivered by an external trace reader. This module
//! provides the [`Source`] seam the parsers are written against and a
//! [`JsonLines`] reader for traces converted to one JSON object per line.

#[cfg(test)]
mod tests;

use std::io::{self, BufRead};

use serde_json::{Map, Value};

use crate::types::Insn;

/// A single trace event as a keyed field map
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    /// Retrieve an unsigned integer field
    pub fn u64(&self, field: &str) -> Option<u64> {
        self.0.get(field)?.as_u64()
    }

    /// Retrieve a string field
    pub fn str(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.as_str()
    }

    /// Retrieve an instruction payload field
    ///
    /// Trace readers deliver instructions either as the raw encoded word or
    /// as text disassembled by the testbench.
    pub fn insn(&self, field: &str) -> Option<Insn> {
        match self.0.get(field)? {
            Value::String(text) => Some(Insn::Text(text.clone())),
            value => value.as_u64().map(|w| Insn::Word(w as u32)),
        }
    }
}

impl TryFrom<Value> for Event {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            value => Err(value),
        }
    }
}

/// Source of trace [`Event`]s
pub trait Source {
    /// Retrieve the next event
    ///
    /// Returns `None` once the source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// [`Source`] reading one JSON object per input line
///
/// Lines that do not parse as a JSON object are skipped, as dialects freely
/// interleave unrelated log lines.
pub struct JsonLines<R: BufRead> {
    lines: io::Lines<R>,
}

impl<R: BufRead> JsonLines<R> {
    /// Create a new reader over the given input
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
        }
    }
}

impl<R: BufRead> Source for JsonLines<R> {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        for line in self.lines.by_ref() {
            match serde_json::from_str(&line?) {
                Ok(event) => return Ok(Some(event)),
                Err(err) => tracing::trace!(%err, "skipping non-event line"),
            }
        }
        Ok(None)
    }
}

// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Dialect trace parsers
//!
//! One parser per supported core family. Parsers share no grammar; they only
//! agree on the [record shape][crate::record::Record] they produce and on the
//! policies applied to it: a fetch shape allocates a fresh record (id reuse is
//! expected), any later-stage shape requires an active record, restated
//! addresses must be consistent with the stored program counter, and trace
//! units matching no known shape are skipped without diagnostic.

pub mod ariane;
pub mod boom;
#[cfg(feature = "events")]
pub mod ibex;
#[cfg(feature = "events")]
pub mod swerv;


use core::fmt;

use std::io;

/// Parse errors
///
/// All variants carrying a `unit` field refer to the position of the
/// offending trace unit: the 1-based line number for text dialects, the
/// 1-based event ordinal for event dialects.
#[derive(Debug)]
pub enum Error {
    /// A later-stage event references an id with no active record
    ///
    /// The instruction's creation event was missing or mis-parsed. Causal
    /// ordering is violated, the trace cannot be visualized reliably.
    UnknownId {
        stage: &'static str,
        id: u64,
        unit: u64,
    },
    /// A restated address contradicts the stored program counter
    PcMismatch {
        id: u64,
        unit: u64,
        stored: u64,
        restated: u64,
    },
    /// A trace unit matching a known shape carries an unusable field
    Malformed { what: &'static str, unit: u64 },
    /// The dialect's backing trace reader is not part of this build
    Unsupported {
        dialect: &'static str,
        hint: &'static str,
    },
    /// Reading the trace source failed
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId { stage, id, unit } => {
                write!(f, "Unit {unit}: {stage} event for unknown instruction id {id}")
            }
            Self::PcMismatch {
                id,
                unit,
                stored,
                restated,
            } => write!(
                f,
                "Unit {unit}: instruction {id} restates pc {restated:#x}, contradicting {stored:#x}",
            ),
            Self::Malformed { what, unit } => write!(f, "Unit {unit}: malformed {what}"),
            Self::Unsupported { dialect, hint } => {
                write!(f, "Dialect \"{dialect}\" is not supported by this build; {hint}")
            }
            Self::Io(_) => write!(f, "Could not read trace source"),
        }
    }
}

/// Parse an unsigned integer field of a matched trace unit
pub(crate) fn uint(text: &str, radix: u32, what: &'static str, unit: u64) -> Result<u64, Error> {
    u64::from_str_radix(text, radix).map_err(|_| Error::Malformed { what, unit })
}

// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Pipeline and dialect descriptions
//!
//! This module provides a static [`Pipeline`] description per supported core,
//! covering the declared stage order, the per-stage display attributes used by
//! the [renderer][crate::render] and the family's retirement rule, as well as
//! the [`Dialect`] registry tying each description to its trace parser.

#[cfg(test)]
mod tests;

use std::io::BufRead;

use yansi::{Color, Style};

use crate::parser;
use crate::record::{Record, Store};

/// A single named pipeline stage and its display attributes
#[derive(Copy, Clone, Debug)]
pub struct Stage {
    /// Stage name as used in trace logs
    pub name: &'static str,
    /// Cell glyph marking the cycle the stage was entered
    pub glyph: char,
    /// Human readable name shown in the legend
    pub legend: &'static str,
    /// Display style for cells belonging to this stage
    pub style: Style,
}

/// Description of one core's pipeline
#[derive(Copy, Clone, Debug)]
pub struct Pipeline {
    /// Stages in declared pipeline order
    pub stages: &'static [Stage],
    /// Instruction address alignment in bytes
    ///
    /// Restated addresses must match the stored program counter under the
    /// mask `!(ialign - 1)`.
    pub ialign: u64,
    /// Retirement counting rule of this pipeline family
    pub retire: RetireRule,
}

/// Rule determining when an instruction counts as retired
///
/// The traced cores do not share a retirement notion: some report a dedicated
/// retire or complete stage, others only the end of a variable-latency tail.
/// Each pipeline family declares its own rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RetireRule {
    /// The record's `end` timestamp marks retirement
    End,
    /// Entering the stage with the given index marks retirement
    Stage(usize),
}

impl RetireRule {
    /// Check whether the given record has reached its terminal state
    pub fn is_retired(&self, record: &Record) -> bool {
        match self {
            Self::End => record.end.is_some(),
            Self::Stage(idx) => record.stamp(*idx).is_some(),
        }
    }
}

const WHITE_ON_BLUE: Style = Style::new().fg(Color::White).bg(Color::Blue);
const WHITE_ON_YELLOW: Style = Style::new().fg(Color::White).bg(Color::Yellow);
const WHITE_ON_MAGENTA: Style = Style::new().fg(Color::White).bg(Color::Magenta);
const WHITE_ON_RED: Style = Style::new().fg(Color::White).bg(Color::Red);
const WHITE_ON_BRIGHT_MAGENTA: Style = Style::new().fg(Color::White).bg(Color::BrightMagenta);
const WHITE_ON_CYAN: Style = Style::new().fg(Color::White).bg(Color::Cyan);

const FETCH: Stage = Stage {
    name: "IF",
    glyph: 'f',
    legend: "fetch",
    style: WHITE_ON_BLUE,
};
const DECODE: Stage = Stage {
    name: "DE",
    glyph: 'd',
    legend: "decode",
    style: WHITE_ON_YELLOW,
};
const RENAME: Stage = Stage {
    name: "RN",
    glyph: 'n',
    legend: "rename",
    style: WHITE_ON_MAGENTA,
};
const ISSUE: Stage = Stage {
    name: "IS",
    glyph: 'i',
    legend: "issue",
    style: WHITE_ON_RED,
};
const EXECUTE: Stage = Stage {
    name: "EX",
    glyph: 'e',
    legend: "execute",
    style: WHITE_ON_BRIGHT_MAGENTA,
};
const DECODE_EXECUTE: Stage = Stage {
    name: "IDEX",
    glyph: 'e',
    legend: "decode/execute",
    style: WHITE_ON_BRIGHT_MAGENTA,
};
const COMPLETE: Stage = Stage {
    name: "C",
    glyph: 'c',
    legend: "complete",
    style: WHITE_ON_CYAN,
};
const RETIRE: Stage = Stage {
    name: "RE",
    glyph: 'r',
    legend: "retire",
    style: WHITE_ON_BLUE,
};
const WRITE_BACK: Stage = Stage {
    name: "WB",
    glyph: 'w',
    legend: "write back",
    style: WHITE_ON_BLUE,
};

/// CVA6/Ariane, a scalar in-order five-stage core
pub const ARIANE: Pipeline = Pipeline {
    stages: &[FETCH, DECODE, ISSUE, EXECUTE, COMPLETE],
    ialign: 4,
    retire: RetireRule::Stage(4),
};

/// BOOM, an out-of-order superscalar core
pub const BOOM: Pipeline = Pipeline {
    stages: &[FETCH, DECODE, RENAME, ISSUE, COMPLETE, RETIRE],
    ialign: 2,
    retire: RetireRule::Stage(5),
};

/// Ibex, a multi-cycle embedded two-stage core
pub const IBEX: Pipeline = Pipeline {
    stages: &[FETCH, DECODE_EXECUTE],
    ialign: 2,
    retire: RetireRule::End,
};

/// SweRV EL2, a four-stage in-order core
pub const SWERV_EL2: Pipeline = Pipeline {
    stages: &[FETCH, DECODE, EXECUTE, WRITE_BACK],
    ialign: 2,
    retire: RetireRule::End,
};

/// A supported trace dialect
///
/// A dialect ties one core's [`Pipeline`] description to the grammar of its
/// trace source. Dialects are selected by name on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Dialect {
    Ariane,
    Boom,
    Ibex,
    SwervEl2,
}

/// All known dialects
pub const DIALECTS: &[Dialect] = &[
    Dialect::Ariane,
    Dialect::Boom,
    Dialect::Ibex,
    Dialect::SwervEl2,
];

impl Dialect {
    /// Look up a dialect by its name
    pub fn from_name(name: &str) -> Option<Self> {
        DIALECTS.iter().find(|d| d.name() == name).copied()
    }

    /// Retrieve the dialect's name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ariane => "ariane",
            Self::Boom => "boom",
            Self::Ibex => "ibex",
            Self::SwervEl2 => "swerv-el2",
        }
    }

    /// Retrieve the dialect's [`Pipeline`] description
    pub fn pipeline(self) -> &'static Pipeline {
        match self {
            Self::Ariane => &ARIANE,
            Self::Boom => &BOOM,
            Self::Ibex => &IBEX,
            Self::SwervEl2 => &SWERV_EL2,
        }
    }

    /// Check whether this build carries the dialect's trace reader
    pub fn supported(self) -> bool {
        match self {
            Self::Ariane | Self::Boom => true,
            Self::Ibex | Self::SwervEl2 => cfg!(feature = "events"),
        }
    }

    /// Parse a complete trace into a record [`Store`]
    ///
    /// Consumes the input in a single pass. Selecting a dialect whose backing
    /// reader is not part of this build fails before any input is read.
    pub fn parse<R: BufRead>(self, input: R) -> Result<Store, parser::Error> {
        match self {
            Self::Ariane => parser::ariane::parse(input),
            Self::Boom => parser::boom::parse(input),
            #[cfg(feature = "events")]
            Self::Ibex => parser::ibex::parse(crate::event::JsonLines::new(input)),
            #[cfg(feature = "events")]
            Self::SwervEl2 => parser::swerv::parse(crate::event::JsonLines::new(input)),
            #[cfg(not(feature = "events"))]
            Self::Ibex | Self::SwervEl2 => Err(parser::Error::Unsupported {
                dialect: self.name(),
                hint: "rebuild with the `events` feature for structured-event dialects",
            }),
        }
    }
}

// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Branch predictor side data

use core::fmt;

/// Branch predictor side data attached to a lifecycle record
///
/// A record may carry a prediction, a branch history table update, or both,
/// depending on what the traced core reports for the instruction.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct Info {
    /// Outcome reported by the branch predictor
    pub prediction: Option<Prediction>,
    /// Saturating counter update in the branch history table
    pub update: Option<Update>,
}

impl Info {
    /// Check whether any side data is present
    pub fn is_empty(&self) -> bool {
        self.prediction.is_none() && self.update.is_none()
    }
}

/// Kind of branch predictor that produced a [`Prediction`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Static,
    Dynamic,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Static => write!(f, "static"),
            Kind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// A single branch prediction
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Prediction {
    /// Kind of predictor
    pub kind: Kind,
    /// Predictor table index
    pub index: u64,
    /// Predicted direction
    pub taken: bool,
}

/// A branch history table counter update
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Update {
    /// Table index of the updated entry
    pub index: u64,
    /// Resolved direction of the branch
    pub taken: bool,
    /// Counter value before the update
    pub old: Counter,
    /// Counter value after the update
    pub new: Counter,
}

/// A saturating branch predictor counter of a fixed bit width
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Counter {
    value: u8,
    width: u8,
}

impl Counter {
    /// Create a new counter
    ///
    /// Returns `None` if the value does not fit the given width or the width
    /// is outside `1..=8`.
    pub fn new(value: u8, width: u8) -> Option<Self> {
        ((1..=8).contains(&width) && u16::from(value) < 1 << width)
            .then_some(Self { value, width })
    }

    /// Parse a counter from its binary digit representation
    ///
    /// The number of digits determines the counter width, e.g. `"10"` is the
    /// two bit counter with value `2`.
    pub fn from_binary_str(digits: &str) -> Option<Self> {
        let value = u8::from_str_radix(digits, 2).ok()?;
        Self::new(value, digits.len() as u8)
    }

    /// Retrieve the counter value
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Predicted direction of this counter
    ///
    /// A counter predicts taken if its value is at or above half of its
    /// range.
    pub fn taken(&self) -> bool {
        self.value >= 1 << (self.width - 1)
    }
}

/// Counters are displayed as zero-padded binary digits
impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width as usize)
    }
}

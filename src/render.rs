// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Timeline rendering
//!
//! The renderer maps each visible record onto a fixed-width cell grid. A
//! stage entered at cycle `t` lights the cell at `t mod W` with the stage's
//! glyph; the cells between two consecutively entered stages are filled with
//! a stage-colored continuation glyph representing dwell time. Wrapping via
//! modulo is deliberate: a single row can represent more than one pass around
//! a `W`-cycle window, trading precision for bounded width. Cells never
//! written keep the `.` placeholder, which uniformly covers "before fetch"
//! and "trace ended first".
//!
//! Optional display columns are appended per a caller-selected [`Layout`] and
//! padded to fixed per-column widths so rows stay aligned. A record missing a
//! field needed only for a column renders a placeholder in that column; it
//! never aborts the render pass.

#[cfg(test)]
mod tests;

use core::fmt::Write as _;
use core::str::FromStr;

use std::io::{self, Write};

use yansi::{Condition, Paint, Style};

use crate::filter::Row;
use crate::insn;
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::types::Insn;

/// An optional display column
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Column {
    /// Privilege mode letter
    Mode,
    /// Running retirement count
    Retired,
    /// First-to-last stage cycle range
    TimeRange,
    /// Full hex program counter
    Pc,
    /// Disassembled instruction mnemonic
    Mnemonic,
    /// Input/output operand annotation
    Operands,
    /// Branch predictor annotation suffix
    Branch,
}

impl Column {
    /// Look up the column selected by a format letter
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'm' => Some(Self::Mode),
            'r' => Some(Self::Retired),
            't' => Some(Self::TimeRange),
            'p' => Some(Self::Pc),
            'i' => Some(Self::Mnemonic),
            'e' => Some(Self::Operands),
            'b' => Some(Self::Branch),
            _ => None,
        }
    }

    /// Declared width the column is padded to
    fn width(self) -> usize {
        match self {
            Self::Mode => 1,
            Self::Retired => 8,
            Self::TimeRange => 17,
            Self::Pc => 16,
            Self::Mnemonic => 20,
            Self::Operands => 40,
            Self::Branch => 0,
        }
    }

    /// Caption shown in the header line
    fn caption(self) -> Option<&'static str> {
        match self {
            Self::Mode => Some("|"),
            Self::Retired => Some("#retired"),
            Self::TimeRange => Some("   cycle from-to "),
            Self::Pc => Some(" pc             "),
            Self::Mnemonic => Some(" insn"),
            Self::Operands | Self::Branch => None,
        }
    }
}

/// Display column layout
///
/// Layouts are parsed from format specifier strings such as `"mrtpi"`, one
/// letter per column, appended in the order given.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct Layout {
    columns: Vec<Column>,
}

impl Layout {
    /// Retrieve the selected columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl FromStr for Layout {
    type Err = char;

    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        letters
            .chars()
            .map(|l| Column::from_letter(l).ok_or(l))
            .collect::<Result<_, _>>()
            .map(|columns| Self { columns })
    }
}

/// Model answering operand annotation queries for the [`Column::Operands`]
/// column
///
/// Implementations track whatever architectural state they need across the
/// queried instructions, which are issued to them in display order.
pub trait Semantics {
    /// Annotate an instruction's operands, then issue it
    fn annotate(&mut self, insn: &Insn) -> Option<Annotation>;
}

/// Operand annotation of a single instruction
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct Annotation {
    /// Input operands with their values
    pub inputs: String,
    /// Output operands with their values
    pub outputs: String,
}

/// Bracket around the global ANSI color state
///
/// Styling is enabled once when the guard is created and restored to the
/// default condition when it is dropped, scoping the color configuration to
/// one rendering pass.
pub struct ColorGuard(());

impl ColorGuard {
    /// Enable colored output for one rendering pass
    ///
    /// Unless `force` is given, styling remains subject to TTY detection and
    /// the usual color environment variables.
    pub fn new(force: bool) -> Self {
        if force {
            yansi::enable();
        } else {
            yansi::whenever(Condition::TTY_AND_COLOR);
        }
        Self(())
    }
}

impl Drop for ColorGuard {
    fn drop(&mut self) {
        yansi::whenever(Condition::DEFAULT);
    }
}

/// Timeline renderer for a single pipeline
pub struct Renderer<'p> {
    pipeline: &'p Pipeline,
    width: usize,
    layout: Layout,
}

impl<'p> Renderer<'p> {
    /// Create a renderer with the given display width and column layout
    pub fn new(pipeline: &'p Pipeline, width: usize, layout: Layout) -> Self {
        debug_assert!(width > 0, "display width must be positive");
        Self {
            pipeline,
            width,
            layout,
        }
    }

    /// Write the stage legend and column header lines
    pub fn write_preamble(&self, out: &mut impl Write) -> io::Result<()> {
        let mut legend = String::new();
        for (i, stage) in self.pipeline.stages.iter().enumerate() {
            if i > 0 {
                legend.push(' ');
            }
            let _ = write!(
                legend,
                "{}={}",
                stage.glyph.paint(stage.style.bold()),
                stage.legend.bold(),
            );
        }
        writeln!(out, "{legend}")?;

        if let Some(pos) = self.column_position(Column::Mode) {
            writeln!(out, "{}{}", " ".repeat(pos - 1), "mode".bold())?;
        }

        let mut header = " ".repeat(self.width + 3);
        for col in self.layout.columns() {
            if let Some(caption) = col.caption() {
                let _ = write!(header, "{}", caption.bold());
            }
            header.push(' ');
        }
        writeln!(out, "{}", header.trim_end())
    }

    /// Write a single row
    pub fn write_row(
        &self,
        out: &mut impl Write,
        row: &Row,
        model: Option<&mut dyn Semantics>,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.row_string(row, model))
    }

    /// Render a single row to a string, without the line terminator
    pub fn row_string(&self, row: &Row, model: Option<&mut dyn Semantics>) -> String {
        match row {
            Row::Snip => format!("{} snip (mode)", "~".repeat(self.width)),
            Row::Visible { record, retired } => self.record_string(record, *retired, model),
        }
    }

    fn record_string(
        &self,
        record: &Record,
        retired: u64,
        mut model: Option<&mut dyn Semantics>,
    ) -> String {
        let mut cells: Vec<(char, Option<Style>)> = vec![('.', None); self.width];
        let stages = self.pipeline.stages;

        for (s, stage) in stages.iter().enumerate() {
            let Some(entered) = record.stamp(s) else {
                continue;
            };
            *self.cell(&mut cells, entered) = (stage.glyph, Some(stage.style));

            // Dwell time: up to the next entered stage, or through `end` for
            // a variable-latency tail
            let fill = if s + 1 == stages.len() {
                record.end.map(|end| (entered + 1, end + 1))
            } else {
                record.stamp(s + 1).map(|next| (entered + 1, next))
            };
            if let Some((from, to)) = fill {
                for cycle in (from..to).take(self.width) {
                    *self.cell(&mut cells, cycle) = ('=', Some(stage.style));
                }
            }
        }

        let mut line = String::with_capacity(self.width + 32);
        line.push('[');
        for (glyph, style) in &cells {
            match style {
                Some(style) => {
                    let _ = write!(line, "{}", glyph.paint(*style));
                }
                None => line.push(*glyph),
            }
        }
        line.push(']');

        for col in self.layout.columns() {
            line.push(' ');
            let used = match col {
                Column::Mode => {
                    let _ = write!(line, "{}", record.mode);
                    1
                }
                Column::Retired => {
                    let _ = write!(line, "{retired:8}");
                    8
                }
                Column::TimeRange => self.time_range(&mut line, record),
                Column::Pc => {
                    let _ = write!(line, "{:016x}", record.pc);
                    16
                }
                Column::Mnemonic => match &record.insn {
                    Some(Insn::Text(text)) => {
                        line.push_str(text);
                        text.chars().count()
                    }
                    Some(Insn::Word(word)) => {
                        let text = insn::disassemble(*word);
                        line.push_str(&text);
                        text.chars().count()
                    }
                    None => 0,
                },
                Column::Operands => self.operands(&mut line, record, model.as_deref_mut()),
                Column::Branch => {
                    self.branch(&mut line, record);
                    0
                }
            };
            for _ in used..col.width() {
                line.push(' ');
            }
        }

        line
    }

    fn cell<'c>(
        &self,
        cells: &'c mut [(char, Option<Style>)],
        cycle: u64,
    ) -> &'c mut (char, Option<Style>) {
        &mut cells[(cycle % self.width as u64) as usize]
    }

    fn time_range(&self, line: &mut String, record: &Record) -> usize {
        let last = self.pipeline.stages.len() - 1;
        match (record.stamp(0), record.stamp(last)) {
            (Some(start), Some(done)) => {
                let _ = write!(line, "{start:8}-{done:8}");
            }
            (Some(start), None) => {
                let _ = write!(line, "{start:8}---------");
            }
            (None, _) => line.push_str(&"-".repeat(17)),
        }
        17
    }

    fn operands<'m>(
        &self,
        line: &mut String,
        record: &Record,
        model: Option<&mut (dyn Semantics + 'm)>,
    ) -> usize {
        let annotation = match (model, record.insn.as_ref()) {
            (Some(model), Some(insn)) => model.annotate(insn),
            _ => None,
        };
        let Some(annotation) = annotation else {
            return 0;
        };

        let mut text = String::new();
        if !annotation.inputs.is_empty() {
            text.push_str("[i] ");
            text.push_str(&annotation.inputs);
        }
        if !annotation.outputs.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str("[o] ");
            text.push_str(&annotation.outputs);
        }

        let used = text.chars().count();
        let _ = write!(line, "{}", text.paint(Style::new().dim()));
        used
    }

    fn branch(&self, line: &mut String, record: &Record) {
        if let Some(p) = &record.branch.prediction {
            let taken = if p.taken { "taken" } else { "not taken" };
            let _ = write!(line, ", BP {taken} @{} ({})", p.index, p.kind);
        }
        if let Some(u) = &record.branch.update {
            let taken = if u.taken { "taken" } else { "not taken" };
            let _ = write!(line, ", BHT @{} {taken} ({}->{})", u.index, u.old, u.new);
        }
    }

    fn column_position(&self, column: Column) -> Option<usize> {
        let mut pos = self.width + 1;
        for col in self.layout.columns() {
            pos += 1;
            if *col == column {
                return Some(pos);
            }
            pos += col.width();
        }
        None
    }
}

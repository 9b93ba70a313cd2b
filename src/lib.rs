// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0

//! # Pipeline timeline viewer for RISC-V core trace logs
//!
//! This crate reconstructs the lifecycle of every instruction observed in a
//! hardware pipeline trace and renders it as a fixed-width, color-coded ASCII
//! timeline, one row per instruction. It understands the incompatible trace
//! dialects of several unrelated cores; see [`pipeline::Dialect`] for the
//! supported set.
//!
//! Processing is a single batch pass: a [dialect parser][parser] normalizes
//! the trace into one [record][record::Record] per instruction, the
//! [filter][filter::Filter] elides records outside the requested privilege
//! modes and counts retirements, and the [renderer][render::Renderer] maps
//! stage timestamps onto a wrapped cell grid with optional display columns.
//!
//! # Example
//!
//! The following example renders a short trace of a scalar in-order core.
//!
//! ```
//! use riscv_pipeview::filter::Filter;
//! use riscv_pipeview::pipeline::Dialect;
//! use riscv_pipeview::render::Renderer;
//!
//! let trace = b"\
//!     10 IF 1 M 0000000080000000\n\
//!     11 DE 1 0000000080000000 addi a0, a0, 1\n\
//!     13 IS 1\n\
//!     15 EX 1\n\
//!     16 C 1\n";
//!
//! let dialect = Dialect::Ariane;
//! let pipeline = dialect.pipeline();
//! let store = dialect.parse(trace.as_slice()).unwrap();
//!
//! let renderer = Renderer::new(pipeline, 20, "tp".parse().unwrap());
//! let rows = Filter::new(store.records(), "MSU".parse().unwrap(), pipeline.retire);
//! for row in rows {
//!     println!("{}", renderer.row_string(&row, None));
//! }
//! ```

#[cfg(feature = "events")]
pub mod event;
pub mod filter;
pub mod insn;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod types;

#[cfg(test)]
mod tests;

pub use pipeline::Dialect;

// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Pipeline trace viewer
//!
//!     Usage: pipeview <core> [infile] [outfile]
//!
//! This program parses a pipeline trace emitted by one of the supported cores
//! and renders each observed instruction as one row of a fixed-width
//! timeline. The trace is read from a file or, by default, from stdin; output
//! goes to a file or stdout. The set of visible privilege modes, the timeline
//! width and the appended display columns are selectable via options.
//!
//! Diagnostics are controlled via the `RUST_LOG` environment variable.

use std::path::PathBuf;

use anyhow::Context;
use either::Either;

use riscv_pipeview::filter::Filter;
use riscv_pipeview::insn;
use riscv_pipeview::pipeline::{DIALECTS, Dialect};
use riscv_pipeview::render::{ColorGuard, Layout, Renderer};
use riscv_pipeview::types::ModeSet;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = clap::Command::new("pipeview")
        .about("Render pipeline trace logs as a per-instruction timeline")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            clap::arg!(<core> "Core whose trace dialect to parse").value_parser(
                clap::builder::PossibleValuesParser::new(
                    DIALECTS.iter().map(|d| d.name()).collect::<Vec<_>>(),
                ),
            ),
        )
        .arg(clap::arg!([infile] "File with the pipeline trace, - for stdin").default_value("-"))
        .arg(clap::arg!([outfile] "File to render to").value_parser(clap::value_parser!(PathBuf)))
        .arg(
            clap::arg!(-c --colored "Force colored output")
                .env("PIPEVIEW_COLOR")
                .action(clap::ArgAction::SetTrue)
                .value_parser(clap::builder::FalseyValueParser::new()),
        )
        .arg(
            clap::arg!(-m --modes <MODES> "Only show instructions from the given modes")
                .default_value("MSU"),
        )
        .arg(
            clap::arg!(-w --width <WIDTH> "Column width of the timeline graph")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("80"),
        )
        .arg(clap::arg!(-f --format <FORMAT> "Output column layout").default_value("mrtpi"))
        .get_matches();

    let core = matches.get_one::<String>("core").expect("No core specified");
    let dialect = Dialect::from_name(core).expect("Unknown core");
    anyhow::ensure!(
        dialect.supported(),
        "dialect \"{}\" needs a trace reader that is not part of this build; \
         rebuild with the `events` feature",
        dialect.name(),
    );

    let modes: ModeSet = matches
        .get_one::<String>("modes")
        .expect("No modes specified")
        .parse()
        .map_err(|l| anyhow::anyhow!("unknown mode letter {l:?}"))?;
    let layout: Layout = matches
        .get_one::<String>("format")
        .expect("No format specified")
        .parse()
        .map_err(|l| anyhow::anyhow!("unknown format letter {l:?}"))?;
    let width = *matches.get_one::<u64>("width").expect("No width specified") as usize;

    let infile = matches.get_one::<String>("infile").expect("No input specified");
    let input = if infile == "-" {
        Either::Left(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(infile)
            .with_context(|| format!("Could not open trace file {infile}"))?;
        Either::Right(std::io::BufReader::new(file))
    };

    let store = dialect.parse(input).context("Could not parse trace")?;
    tracing::debug!(records = store.len(), "trace parsed");

    let mut output = match matches.get_one::<PathBuf>("outfile") {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Could not create output file {}", path.display()))?;
            Either::Right(std::io::BufWriter::new(file))
        }
        None => Either::Left(std::io::stdout().lock()),
    };

    let pipeline = dialect.pipeline();
    let renderer = Renderer::new(pipeline, width, layout);
    let mut model = insn::Model::new();

    let colors = ColorGuard::new(matches.get_flag("colored"));
    let result = (|| {
        use std::io::Write;

        renderer.write_preamble(&mut output)?;
        for row in Filter::new(store.records(), modes, pipeline.retire) {
            renderer.write_row(&mut output, &row, Some(&mut model))?;
        }
        output.flush()
    })();
    drop(colors);

    match result {
        // A closed output pipe ends the rendering pass, it is not a failure
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("Could not write rendered timeline"),
    }
}

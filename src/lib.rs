pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use clap::Parser;

use crate::cli::{Cli, Format};

pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();

    let input: Box<dyn BufRead> = match args.input_path() {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report(&args, input, &mut out)?;
    out.flush().with_context(|| "Flushing output")?;
    Ok(())
}

/// Parse, process and write one input stream.
pub fn report<R: BufRead, W: Write>(args: &Cli, input: R, out: &mut W) -> anyhow::Result<()> {
    // 1. ── Parse ──────────────────────────────────────────────────────
    let survey = parser::load(input).with_context(|| "Loading room lines")?;

    // 2. ── Process ────────────────────────────────────────────────────
    let report = processor::run(&survey).with_context(|| "Summing room areas")?;

    // 3. ── Write output ───────────────────────────────────────────────
    match args.format {
        Format::Text => writer::text::emit(&report, out, !args.quiet)
            .with_context(|| "Writing text report")?,
        Format::Json => writer::json::emit(&report, out).with_context(|| "Writing JSON report")?,
    }

    Ok(())
}

//! Machine-readable report.

use crate::model::Report;
use std::io::Write;

pub fn emit<W: Write>(report: &Report, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    Ok(())
}

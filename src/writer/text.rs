//! Plain-text report: optional `room:` echo lines, then the total.

use crate::model::{Report, RoomSize};
use std::io::{self, Write};

pub fn emit<W: Write>(report: &Report, out: &mut W, echo_rooms: bool) -> io::Result<()> {
    if echo_rooms {
        rooms(report, out)?;
    }
    writeln!(out, "Total Size (sqft): {}", report.total)?;
    Ok(())
}

fn rooms<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    for entry in &report.rooms {
        writeln!(out, "room: {}", RoomSize::new(entry.width, entry.height))?;
    }
    Ok(())
}

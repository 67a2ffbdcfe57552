//! The arithmetic core: sums room areas and turns the total back into a
//! feet/inches figure for the writers.

use thiserror::Error;
use tracing::debug;

use crate::model::{Area, Measurement, Report, RoomEntry, RoomSize, Survey};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("area overflow at room {index}: {room}")]
    Overflow { index: usize, room: RoomSize },
}

/// Total floor area of `rooms`, in square inches.
///
/// Pure: nothing is printed here, callers report rooms themselves.
pub fn total_area(rooms: &[RoomSize]) -> Result<Area, ProcessError> {
    let mut total = Area::default();
    for (index, room) in rooms.iter().enumerate() {
        let overflow = || ProcessError::Overflow { index, room: *room };
        let area = room.checked_area().ok_or_else(overflow)?;
        total = Area(total.0.checked_add(area.0).ok_or_else(overflow)?);
    }
    Ok(total)
}

/// Builds the `Report` handed to the writers.
pub fn run(survey: &Survey) -> Result<Report, ProcessError> {
    let total_square_inches = total_area(&survey.rooms)?;
    let total = Measurement::from_square_inches(total_square_inches);
    debug!(sq_in = total_square_inches.0, %total, "total computed");

    let rooms = survey
        .rooms
        .iter()
        .map(|r| RoomEntry {
            width: r.width,
            height: r.height,
            // checked by total_area above
            area: r.area(),
        })
        .collect();

    Ok(Report {
        rooms,
        skipped: survey.rejected.len(),
        total_square_inches,
        total,
    })
}

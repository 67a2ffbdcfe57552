use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;

use crate::parser::LineParseError;

pub const INCHES_PER_FOOT: i64 = 12;
pub const SQ_INCHES_PER_SQ_FOOT: i64 = INCHES_PER_FOOT * INCHES_PER_FOOT; // 144

/// A linear length, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Distance(pub i64);

/// A floor area, in square inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Area(pub i64);

impl Add for Area {
    type Output = Area;

    fn add(self, rhs: Area) -> Area {
        Area(self.0 + rhs.0)
    }
}

impl Sum for Area {
    fn sum<I: Iterator<Item = Area>>(iter: I) -> Area {
        iter.fold(Area::default(), Add::add)
    }
}

/// A feet/inches pair as written in the input, e.g. `3-6`.
///
/// Nothing is range checked: `inches` may be 12 or more when parsed
/// verbatim. Values are only normalised when rebuilt from a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Measurement {
    pub feet: i64,
    pub inches: i64,
}

impl Measurement {
    pub fn new(feet: i64, inches: i64) -> Self {
        Self { feet, inches }
    }

    /// `feet * 12 + inches`. Panics on overflow in debug builds only;
    /// use [`Measurement::checked_total_inches`] on untrusted values.
    pub fn total_inches(&self) -> Distance {
        Distance(self.feet * INCHES_PER_FOOT + self.inches)
    }

    pub fn checked_total_inches(&self) -> Option<Distance> {
        self.feet
            .checked_mul(INCHES_PER_FOOT)?
            .checked_add(self.inches)
            .map(Distance)
    }

    /// Linear inches back to feet/inches (divisor 12).
    pub fn from_inches(d: Distance) -> Self {
        Self {
            feet: d.0 / INCHES_PER_FOOT,
            inches: d.0 % INCHES_PER_FOOT,
        }
    }

    /// Square inches to square feet plus left-over square inches (divisor 144).
    pub fn from_square_inches(a: Area) -> Self {
        Self {
            feet: a.0 / SQ_INCHES_PER_SQ_FOOT,
            inches: a.0 % SQ_INCHES_PER_SQ_FOOT,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ F: {}, I: {} ]", self.feet, self.inches)
    }
}

/// One room line: `width,height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomSize {
    pub width: Measurement,
    pub height: Measurement,
}

impl RoomSize {
    pub fn new(width: Measurement, height: Measurement) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> Area {
        Area(self.width.total_inches().0 * self.height.total_inches().0)
    }

    /// Same as [`RoomSize::area`] but `None` instead of overflowing.
    pub fn checked_area(&self) -> Option<Area> {
        let w = self.width.checked_total_inches()?;
        let h = self.height.checked_total_inches()?;
        w.0.checked_mul(h.0).map(Area)
    }
}

impl fmt::Display for RoomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} {} ]", self.width, self.height)
    }
}

/// A line the loader could not turn into a `RoomSize`.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based.
    pub line_no: usize,
    pub text: String,
    pub error: LineParseError,
}

/// Everything read from one input stream, before any arithmetic.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    pub rooms: Vec<RoomSize>,
    pub rejected: Vec<RejectedLine>,
}

/// A room together with its computed area, as reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomEntry {
    pub width: Measurement,
    pub height: Measurement,
    pub area: Area,
}

/// Fully processed output handed to `writer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rooms: Vec<RoomEntry>,
    pub skipped: usize,
    pub total_square_inches: Area,
    pub total: Measurement,
}

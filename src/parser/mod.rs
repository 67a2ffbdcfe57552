use std::io::BufRead;
use std::num::ParseIntError;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Measurement, RejectedLine, RoomSize, Survey};

pub const MEASUREMENT_SEP: char = '-';
pub const FIELD_SEP: char = ',';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasurementParseError {
    #[error("invalid measurement `{0}`: expected <feet>-<inches>")]
    Shape(String),

    #[error("invalid feet in `{desc}`: {source}")]
    Feet { desc: String, source: ParseIntError },

    #[error("invalid inches in `{desc}`: {source}")]
    Inches { desc: String, source: ParseIntError },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineParseError {
    #[error("invalid line `{line}`: expected 2 comma-separated fields, found {found}")]
    FieldCount { line: String, found: usize },

    #[error("bad width: {0}")]
    Width(#[source] MeasurementParseError),

    #[error("bad height: {0}")]
    Height(#[source] MeasurementParseError),

    #[error("line is not valid UTF-8")]
    Encoding,
}

/// Parse `"<feet>-<inches>"` into a `Measurement`.
///
/// Both parts follow `i64::from_str`: an optional sign, then digits, no
/// surrounding whitespace. Values are kept verbatim.
pub fn parse_measurement(desc: &str) -> Result<Measurement, MeasurementParseError> {
    let parts: Vec<&str> = desc.split(MEASUREMENT_SEP).collect();
    let [feet, inches] = parts[..] else {
        return Err(MeasurementParseError::Shape(desc.to_string()));
    };

    let feet = feet.parse::<i64>().map_err(|source| MeasurementParseError::Feet {
        desc: desc.to_string(),
        source,
    })?;
    let inches = inches
        .parse::<i64>()
        .map_err(|source| MeasurementParseError::Inches {
            desc: desc.to_string(),
            source,
        })?;

    Ok(Measurement::new(feet, inches))
}

/// Parse `"<width>,<height>"` into a `RoomSize`.
pub fn parse_line(line: &str) -> Result<RoomSize, LineParseError> {
    let parts: Vec<&str> = line.split(FIELD_SEP).collect();
    let [width, height] = parts[..] else {
        return Err(LineParseError::FieldCount {
            line: line.to_string(),
            found: parts.len(),
        });
    };

    let width = parse_measurement(width).map_err(LineParseError::Width)?;
    let height = parse_measurement(height).map_err(LineParseError::Height)?;

    Ok(RoomSize::new(width, height))
}

impl FromStr for Measurement {
    type Err = MeasurementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_measurement(s)
    }
}

impl FromStr for RoomSize {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

/// Read every room line from `reader`.
///
/// Malformed lines are logged and collected in `Survey::rejected`; reading
/// carries on. A read error is returned as-is and never treated as the end
/// of input.
pub fn load<R: BufRead>(reader: R) -> Result<Survey> {
    let mut survey = Survey::default();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let mut raw = raw.with_context(|| format!("Reading input line {line_no}"))?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        let parsed = match std::str::from_utf8(&raw) {
            Ok(text) => parse_line(text),
            Err(_) => Err(LineParseError::Encoding),
        };

        match parsed {
            Ok(room) => {
                debug!(line_no, %room, "room accepted");
                survey.rooms.push(room);
            }
            Err(error) => {
                warn!(line_no, "skipping line: {error}");
                survey.rejected.push(RejectedLine {
                    line_no,
                    text: String::from_utf8_lossy(&raw).into_owned(),
                    error,
                });
            }
        }
    }

    debug!(
        accepted = survey.rooms.len(),
        rejected = survey.rejected.len(),
        "input loaded"
    );
    Ok(survey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    #[test]
    fn test_parse_measurement() {
        let m = parse_measurement("3-6").unwrap();
        assert_eq!(m, Measurement::new(3, 6));
        assert_eq!(m.total_inches().0, 42);

        // no range check on inches
        assert_eq!(parse_measurement("0-15").unwrap(), Measurement::new(0, 15));
        // explicit plus sign is accepted by the integer parser
        assert_eq!(parse_measurement("+2-+3").unwrap(), Measurement::new(2, 3));
    }

    #[test]
    fn test_parse_measurement_errors() {
        let cases = vec!["3", "3-6-1", "", "-3-6", "3--6"];
        for desc in cases {
            assert!(
                matches!(parse_measurement(desc), Err(MeasurementParseError::Shape(_))),
                "expected shape error for {desc:?}"
            );
        }

        assert!(matches!(
            parse_measurement("a-6"),
            Err(MeasurementParseError::Feet { .. })
        ));
        assert!(matches!(
            parse_measurement("3-x"),
            Err(MeasurementParseError::Inches { .. })
        ));
        assert!(matches!(
            parse_measurement(" 3-6"),
            Err(MeasurementParseError::Feet { .. })
        ));
        assert!(matches!(
            parse_measurement("3-"),
            Err(MeasurementParseError::Inches { .. })
        ));
    }

    #[test]
    fn test_parse_line() {
        let room = parse_line("3-6,4-0").unwrap();
        assert_eq!(room.width, Measurement::new(3, 6));
        assert_eq!(room.height, Measurement::new(4, 0));
        assert_eq!(room.area().0, 2016);

        let room: RoomSize = "10-0,12-6".parse().unwrap();
        assert_eq!(room.area().0, 120 * 150);
    }

    #[test]
    fn test_parse_line_field_count() {
        assert_eq!(
            parse_line("3-6"),
            Err(LineParseError::FieldCount {
                line: "3-6".into(),
                found: 1
            })
        );
        assert!(matches!(
            parse_line("3-6,4-0,5-0"),
            Err(LineParseError::FieldCount { found: 3, .. })
        ));
        assert!(matches!(
            parse_line(""),
            Err(LineParseError::FieldCount { found: 1, .. })
        ));
    }

    #[test]
    fn test_parse_line_propagates_measurement_error() {
        assert!(matches!(
            parse_line("a-6,4-0"),
            Err(LineParseError::Width(MeasurementParseError::Feet { .. }))
        ));
        assert!(matches!(
            parse_line("3-6,4"),
            Err(LineParseError::Height(MeasurementParseError::Shape(_)))
        ));
        assert!(matches!(
            parse_line("3-6, 4-0"),
            Err(LineParseError::Height(MeasurementParseError::Feet { .. }))
        ));
    }

    #[test]
    fn test_load_skips_bad_lines() {
        let input = "3-6,4-0\nnonsense\n\n1-0,1-0\r\n1-0,1-0";
        let survey = load(Cursor::new(input)).unwrap();

        assert_eq!(survey.rooms.len(), 3);
        assert_eq!(survey.rejected.len(), 2);
        assert_eq!(survey.rejected[0].line_no, 2);
        assert_eq!(survey.rejected[0].text, "nonsense");
        assert_eq!(survey.rejected[1].line_no, 3);
        assert_eq!(survey.rejected[1].text, "");
    }

    #[test]
    fn test_load_empty() {
        let survey = load(Cursor::new("")).unwrap();
        assert!(survey.rooms.is_empty());
        assert!(survey.rejected.is_empty());
    }

    #[test]
    fn test_load_invalid_utf8() {
        let input: &[u8] = b"1-0,1-0\n\xff\xfe\n2-0,1-0\n";
        let survey = load(Cursor::new(input)).unwrap();
        assert_eq!(survey.rooms.len(), 2);
        assert_eq!(survey.rejected.len(), 1);
        assert_eq!(survey.rejected[0].error, LineParseError::Encoding);
    }

    /// Yields some bytes, then fails.
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            Ok(n)
        }
    }

    #[test]
    fn test_load_surfaces_read_error() {
        let reader = BufReader::new(FailingReader {
            data: Cursor::new(b"1-0,1-0\n".to_vec()),
        });
        let err = load(reader).unwrap_err();
        assert!(format!("{err:#}").contains("disk on fire"));
    }
}

//! Race log line parser
//!
//! Each line of a race log looks like
//! `[HH:MM:SS.mmm] <kind> <competitorId> [extra...]`.

use crate::timefmt::parse_clock_time;
use crate::types::{CompetitorId, EventKind, ParseEventError, RaceError, RaceEvent, Result};
use std::io::{self, BufRead};

/// Parse a single race log line
pub fn parse_event_line(line: &str) -> std::result::Result<RaceEvent, ParseEventError> {
    let line = line.trim();
    let rest = line
        .strip_prefix('[')
        .ok_or(ParseEventError::MissingTimestamp)?;
    let (time_str, rest) = rest
        .split_once(']')
        .ok_or(ParseEventError::MissingTimestamp)?;

    let time = parse_clock_time(time_str)
        .ok_or_else(|| ParseEventError::InvalidTime(time_str.trim().to_string()))?;

    let mut fields = rest.split_whitespace();

    let kind_str = fields.next().ok_or(ParseEventError::MissingField("event kind"))?;
    let code: u32 = kind_str.parse().map_err(|_| ParseEventError::InvalidNumber {
        field: "event kind",
        value: kind_str.to_string(),
    })?;
    let kind = EventKind::from_code(code).ok_or(ParseEventError::UnknownKind(code))?;

    let id_str = fields
        .next()
        .ok_or(ParseEventError::MissingField("competitor id"))?;
    let competitor_id: CompetitorId = id_str.parse().map_err(|_| ParseEventError::InvalidNumber {
        field: "competitor id",
        value: id_str.to_string(),
    })?;

    let extra = fields.collect::<Vec<_>>().join(" ");

    Ok(RaceEvent {
        time,
        kind,
        competitor_id,
        extra,
    })
}

/// Iterator over the events of a race log
///
/// Blank lines are skipped. Parse failures carry the 1-based line number.
pub struct EventReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<RaceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.line_number += 1,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    self.line_number += 1;
                    return Some(Err(RaceError::MalformedEvent {
                        line: self.line_number,
                        source: ParseEventError::InvalidUtf8,
                    }));
                }
                Err(e) => return Some(Err(RaceError::IoError(e))),
            }

            let line = self.buffer.trim();
            if line.is_empty() {
                log::trace!("Skipping blank line {}", self.line_number);
                continue;
            }
            log::trace!("Line {}: {}", self.line_number, line);

            return Some(parse_event_line(line).map_err(|source| RaceError::MalformedEvent {
                line: self.line_number,
                source,
            }));
        }
    }
}

//! Core types for the biathlon timing library
//!
//! This module defines the events that flow through the library: the input
//! events read from a race log, the events derived while applying them, and
//! the single error type shared by every stage.

use chrono::NaiveTime;
use serde::Serialize;
use std::fmt;

/// Wall-clock time of day with millisecond precision
pub type ClockTime = NaiveTime;

/// Identifier assigned to a competitor in the race log
pub type CompetitorId = u32;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, RaceError>;

/// Kinds of input events, keyed by their stable numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    Registered,
    StartTimeSet,
    OnStartLine,
    Started,
    OnFiringRange,
    TargetHit,
    LeftFiringRange,
    EnteredPenalty,
    LeftPenalty,
    EndedMainLap,
    CannotContinue,
}

impl EventKind {
    /// Look up an event kind by its code in the race log
    pub fn from_code(code: u32) -> Option<Self> {
        let kind = match code {
            1 => EventKind::Registered,
            2 => EventKind::StartTimeSet,
            3 => EventKind::OnStartLine,
            4 => EventKind::Started,
            5 => EventKind::OnFiringRange,
            6 => EventKind::TargetHit,
            7 => EventKind::LeftFiringRange,
            8 => EventKind::EnteredPenalty,
            9 => EventKind::LeftPenalty,
            10 => EventKind::EndedMainLap,
            11 => EventKind::CannotContinue,
            _ => return None,
        };
        Some(kind)
    }

    /// Numeric code used in the race log
    pub fn code(self) -> u32 {
        match self {
            EventKind::Registered => 1,
            EventKind::StartTimeSet => 2,
            EventKind::OnStartLine => 3,
            EventKind::Started => 4,
            EventKind::OnFiringRange => 5,
            EventKind::TargetHit => 6,
            EventKind::LeftFiringRange => 7,
            EventKind::EnteredPenalty => 8,
            EventKind::LeftPenalty => 9,
            EventKind::EndedMainLap => 10,
            EventKind::CannotContinue => 11,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

/// Kinds of events produced by the processor rather than read from the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DerivedKind {
    /// Carries the reason in `extra`
    Disqualified,
    Finished,
}

impl DerivedKind {
    pub fn code(self) -> u32 {
        match self {
            DerivedKind::Disqualified => 32,
            DerivedKind::Finished => 33,
        }
    }
}

/// A single line of the race log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceEvent {
    /// Time the event happened
    pub time: ClockTime,
    /// What happened
    pub kind: EventKind,
    /// Competitor the event refers to
    pub competitor_id: CompetitorId,
    /// Free-text payload; meaning depends on `kind`
    pub extra: String,
}

impl RaceEvent {
    /// Create an event with an empty payload
    pub fn new(time: ClockTime, kind: EventKind, competitor_id: CompetitorId) -> Self {
        Self {
            time,
            kind,
            competitor_id,
            extra: String::new(),
        }
    }

    /// Builder method: attach a payload
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }
}

/// An event emitted as a consequence of applying a `RaceEvent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedEvent {
    /// Time of the event that caused it
    pub time: ClockTime,
    pub kind: DerivedKind,
    pub competitor_id: CompetitorId,
    pub extra: String,
}

impl DerivedEvent {
    pub fn disqualified(time: ClockTime, competitor_id: CompetitorId, reason: impl Into<String>) -> Self {
        Self {
            time,
            kind: DerivedKind::Disqualified,
            competitor_id,
            extra: reason.into(),
        }
    }

    pub fn finished(time: ClockTime, competitor_id: CompetitorId) -> Self {
        Self {
            time,
            kind: DerivedKind::Finished,
            competitor_id,
            extra: String::new(),
        }
    }
}

/// Reasons a single log line fails to parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEventError {
    #[error("missing bracketed timestamp")]
    MissingTimestamp,

    #[error("invalid time '{0}'")]
    InvalidTime(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown event kind {0}")]
    UnknownKind(u32),

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors that abort a race run
#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    #[error("Invalid race configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed event on line {line}: {source}")]
    MalformedEvent {
        line: usize,
        #[source]
        source: ParseEventError,
    },

    #[error("Event {kind} refers to unregistered competitor {competitor_id}")]
    UnknownCompetitor {
        competitor_id: CompetitorId,
        kind: EventKind,
    },

    #[error("Event {kind} for competitor {competitor_id} has invalid payload '{value}'")]
    InvalidPayload {
        competitor_id: CompetitorId,
        kind: EventKind,
        value: String,
    },

    #[error("Event {kind} for competitor {competitor_id} arrived with no {what}")]
    MissingState {
        competitor_id: CompetitorId,
        kind: EventKind,
        what: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

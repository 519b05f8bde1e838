//! Competitor state and the store that owns it for one run

use crate::types::{ClockTime, CompetitorId, EventKind, RaceError, Result};
use chrono::Duration;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where a competitor stands in the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Registered but not yet started
    Registered,
    /// Started and still on the course (or stopped without finishing)
    NotFinished,
    /// Missed the start window
    Disqualified,
    /// Completed every main lap
    Finished,
}

/// Accumulated state for a single competitor
#[derive(Debug, Clone, PartialEq)]
pub struct Competitor {
    pub id: CompetitorId,
    /// Start time assigned by the draw
    pub scheduled_start: Option<ClockTime>,
    pub status: Status,
    /// Durations of completed main laps, in order
    pub laps: Vec<Duration>,
    /// Total time spent on penalty laps
    pub penalties: Duration,
    /// Penalty laps owed
    pub penalty_laps: i64,
    /// Targets hit across the whole race
    pub hits: u32,
    /// Time the last main lap was completed
    pub finish: Option<ClockTime>,
    /// Comment from the last "cannot continue" event
    pub extra: String,
    pub(crate) current_lap_start: Option<ClockTime>,
    pub(crate) current_penalty_start: Option<ClockTime>,
}

impl Competitor {
    pub fn new(id: CompetitorId) -> Self {
        Self {
            id,
            scheduled_start: None,
            status: Status::Registered,
            laps: Vec::new(),
            penalties: Duration::zero(),
            penalty_laps: 0,
            hits: 0,
            finish: None,
            extra: String::new(),
            current_lap_start: None,
            current_penalty_start: None,
        }
    }

    /// Finish time minus scheduled start, when both are known
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.finish, self.scheduled_start) {
            (Some(finish), Some(start)) => Some(finish.signed_duration_since(start)),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }
}

/// All competitors seen in one run, ordered by id
#[derive(Debug, Clone, Default)]
pub struct CompetitorStore {
    competitors: BTreeMap<CompetitorId, Competitor>,
}

impl CompetitorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record for `id` unless one exists; returns whether it was created
    pub fn register(&mut self, id: CompetitorId) -> bool {
        if self.competitors.contains_key(&id) {
            return false;
        }
        self.competitors.insert(id, Competitor::new(id));
        true
    }

    pub fn get(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.get(&id)
    }

    /// Look up a registered competitor for an event of `kind`
    pub fn get_mut(&mut self, id: CompetitorId, kind: EventKind) -> Result<&mut Competitor> {
        self.competitors
            .get_mut(&id)
            .ok_or(RaceError::UnknownCompetitor {
                competitor_id: id,
                kind,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.values()
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}

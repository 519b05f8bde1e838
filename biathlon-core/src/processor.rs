//! Event processing engine
//!
//! Applies one race event at a time to the competitor store and reports the
//! derived event (disqualification or finish) the transition produced, if any.
//! Nothing here writes output; narration is the caller's job.

use crate::competitor::{CompetitorStore, Status};
use crate::config::RaceConfig;
use crate::timefmt::{format_clock_time, parse_clock_time};
use crate::types::{DerivedEvent, EventKind, RaceError, RaceEvent, Result};

/// Targets on the range at every firing stage
pub const TARGETS_PER_STAGE: u32 = 5;

/// Reason attached to a disqualification for a late or early start
pub const MISSED_START_REASON: &str = "missed the start time";

/// Stateless state-transition engine bound to one race configuration
pub struct EventProcessor<'a> {
    config: &'a RaceConfig,
}

impl<'a> EventProcessor<'a> {
    pub fn new(config: &'a RaceConfig) -> Self {
        Self { config }
    }

    /// Apply a single event to the store
    ///
    /// # Returns
    /// * `Ok(Some(DerivedEvent))` when the event disqualified or finished the competitor
    /// * `Ok(None)` when it only changed (or didn't change) state
    /// * `Err` when the event refers to an unregistered competitor, carries an
    ///   unusable payload, or arrives before the state it depends on
    pub fn apply(&self, event: &RaceEvent, store: &mut CompetitorStore) -> Result<Option<DerivedEvent>> {
        let id = event.competitor_id;

        match event.kind {
            EventKind::Registered => {
                if !store.register(id) {
                    log::warn!("Competitor {} registered twice, ignoring", id);
                }
                Ok(None)
            }

            EventKind::StartTimeSet => {
                let competitor = store.get_mut(id, event.kind)?;
                let start = parse_clock_time(&event.extra).ok_or_else(|| RaceError::InvalidPayload {
                    competitor_id: id,
                    kind: event.kind,
                    value: event.extra.clone(),
                })?;
                if start < self.config.start {
                    log::warn!(
                        "Competitor {} drawn to start at {}, before the race start {}",
                        id,
                        format_clock_time(start),
                        format_clock_time(self.config.start)
                    );
                }
                competitor.scheduled_start = Some(start);
                Ok(None)
            }

            EventKind::OnStartLine => Ok(None),

            EventKind::Started => {
                let competitor = store.get_mut(id, event.kind)?;
                let scheduled = competitor.scheduled_start.ok_or(RaceError::MissingState {
                    competitor_id: id,
                    kind: event.kind,
                    what: "scheduled start time",
                })?;
                competitor.current_lap_start = Some(scheduled);

                let lateness = event.time.signed_duration_since(scheduled);
                if lateness < chrono::Duration::zero() || lateness > self.config.start_delta {
                    log::debug!("Competitor {} started outside the window", id);
                    competitor.status = Status::Disqualified;
                    return Ok(Some(DerivedEvent::disqualified(event.time, id, MISSED_START_REASON)));
                }

                if competitor.status == Status::Registered {
                    competitor.status = Status::NotFinished;
                }
                Ok(None)
            }

            EventKind::OnFiringRange => {
                match event.extra.trim().parse::<u32>() {
                    Ok(line) if (1..=self.config.firing_lines).contains(&line) => {}
                    _ => log::warn!(
                        "Competitor {} on unknown firing line '{}' ({} configured)",
                        id,
                        event.extra,
                        self.config.firing_lines
                    ),
                }
                Ok(None)
            }

            EventKind::TargetHit => {
                let competitor = store.get_mut(id, event.kind)?;
                competitor.hits += 1;
                Ok(None)
            }

            EventKind::LeftFiringRange => {
                let competitor = store.get_mut(id, event.kind)?;
                let stages = competitor.laps.len() as i64 + 1;
                let owed = TARGETS_PER_STAGE as i64 * stages - competitor.hits as i64;
                competitor.penalty_laps += owed;
                log::debug!(
                    "Competitor {} left the range owing {} penalty laps ({} total)",
                    id,
                    owed,
                    competitor.penalty_laps
                );
                Ok(None)
            }

            EventKind::EnteredPenalty => {
                let competitor = store.get_mut(id, event.kind)?;
                competitor.current_penalty_start = Some(event.time);
                Ok(None)
            }

            EventKind::LeftPenalty => {
                let competitor = store.get_mut(id, event.kind)?;
                let entered = competitor
                    .current_penalty_start
                    .take()
                    .ok_or(RaceError::MissingState {
                        competitor_id: id,
                        kind: event.kind,
                        what: "penalty lap in progress",
                    })?;
                competitor.penalties = competitor.penalties + event.time.signed_duration_since(entered);
                Ok(None)
            }

            EventKind::EndedMainLap => {
                let laps = self.config.laps as usize;
                let competitor = store.get_mut(id, event.kind)?;
                if competitor.is_finished() || competitor.laps.len() >= laps {
                    log::warn!("Competitor {} already finished, ignoring extra lap", id);
                    return Ok(None);
                }

                let lap_start = competitor.current_lap_start.ok_or(RaceError::MissingState {
                    competitor_id: id,
                    kind: event.kind,
                    what: "main lap in progress",
                })?;
                competitor.laps.push(event.time.signed_duration_since(lap_start));

                if competitor.laps.len() == laps {
                    competitor.status = Status::Finished;
                    competitor.finish = Some(event.time);
                    competitor.current_lap_start = None;
                    log::debug!("Competitor {} finished", id);
                    return Ok(Some(DerivedEvent::finished(event.time, id)));
                }

                competitor.current_lap_start = Some(event.time);
                Ok(None)
            }

            EventKind::CannotContinue => {
                let competitor = store.get_mut(id, event.kind)?;
                competitor.extra = event.extra.clone();
                Ok(Some(DerivedEvent::disqualified(event.time, id, event.extra.clone())))
            }
        }
    }
}

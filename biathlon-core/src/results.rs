//! Final results table
//!
//! Built once every event has been applied. Rows are ranked with finishers
//! first (fastest elapsed time first), then everyone else in id order.

use crate::competitor::{Competitor, CompetitorStore, Status};
use crate::config::RaceConfig;
use crate::processor::TARGETS_PER_STAGE;
use crate::timefmt::{as_seconds, format_duration, serialize_duration};
use crate::types::CompetitorId;
use chrono::Duration;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A timed segment with its average speed in meters per second
///
/// `speed` is `None` for a zero-length duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Split {
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    pub speed: Option<f64>,
}

impl Split {
    fn new(meters: f64, duration: Duration) -> Self {
        let seconds = as_seconds(duration);
        let speed = if seconds == 0.0 { None } else { Some(meters / seconds) };
        Self { duration, speed }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speed {
            Some(speed) => write!(f, "{{{}, {:.3}}}", format_duration(self.duration), speed),
            None => write!(f, "{{{}, NaN}}", format_duration(self.duration)),
        }
    }
}

/// Final standing of a competitor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum Standing {
    Disqualified,
    Finished {
        #[serde(serialize_with = "serialize_duration")]
        elapsed: Duration,
    },
    NotFinished,
}

impl Standing {
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Standing::Finished { elapsed } => Some(*elapsed),
            _ => None,
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::Disqualified => write!(f, "[NotStarted]"),
            Standing::Finished { elapsed } => write!(f, "{}", format_duration(*elapsed)),
            Standing::NotFinished => write!(f, "[NotFinished]"),
        }
    }
}

/// One line of the results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub competitor_id: CompetitorId,
    pub standing: Standing,
    /// One slot per configured lap; `None` for laps not completed
    pub laps: Vec<Option<Split>>,
    /// Penalty time and speed, present only when penalty laps were owed
    pub penalty: Option<Split>,
    pub hits: u32,
    pub shots: u32,
}

impl ResultRow {
    fn from_competitor(competitor: &Competitor, config: &RaceConfig) -> Self {
        let standing = match (competitor.status, competitor.elapsed()) {
            (Status::Disqualified, _) => Standing::Disqualified,
            (Status::Finished, Some(elapsed)) => Standing::Finished { elapsed },
            _ => Standing::NotFinished,
        };

        let lap_len = config.lap_len as f64;
        let laps = (0..config.laps as usize)
            .map(|i| competitor.laps.get(i).map(|lap| Split::new(lap_len, *lap)))
            .collect();

        let penalty = if competitor.penalty_laps != 0 {
            let meters = competitor.penalty_laps as f64 * config.penalty_len as f64;
            Some(Split::new(meters, competitor.penalties))
        } else {
            None
        };

        Self {
            competitor_id: competitor.id,
            standing,
            laps,
            penalty,
            hits: competitor.hits,
            shots: competitor.laps.len() as u32 * TARGETS_PER_STAGE,
        }
    }

    /// Fraction of shots that hit, if any were taken
    pub fn hit_ratio(&self) -> Option<f64> {
        if self.shots == 0 {
            None
        } else {
            Some(self.hits as f64 / self.shots as f64)
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [", self.standing, self.competitor_id)?;
        for (i, lap) in self.laps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match lap {
                Some(split) => write!(f, "{}", split)?,
                None => write!(f, "{{,}}")?,
            }
        }
        write!(f, "] ")?;
        match &self.penalty {
            Some(split) => write!(f, "{}", split)?,
            None => write!(f, "{{,}}")?,
        }
        write!(f, " {}/{}", self.hits, self.shots)
    }
}

fn rank(a: &ResultRow, b: &ResultRow) -> Ordering {
    match (a.standing.elapsed(), b.standing.elapsed()) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.competitor_id.cmp(&b.competitor_id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.competitor_id.cmp(&b.competitor_id),
    }
}

/// Build the ranked results table from the final competitor state
pub fn build_results(store: &CompetitorStore, config: &RaceConfig) -> Vec<ResultRow> {
    let mut rows: Vec<ResultRow> = store
        .iter()
        .map(|competitor| ResultRow::from_competitor(competitor, config))
        .collect();
    rows.sort_by(rank);
    rows
}

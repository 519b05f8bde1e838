//! Biathlon Timing Library
//!
//! Turns a chronological race log (registration, start, laps, shooting,
//! penalties, withdrawals) into per-competitor state and a ranked results
//! table with lap pace and penalty statistics.
//!
//! # Architecture
//!
//! - `parser` reads race log lines into `RaceEvent`s
//! - `processor` applies one event to the `CompetitorStore` and reports any
//!   derived disqualification or finish
//! - `results` ranks competitors once the log is exhausted
//! - `session` runs the above in order and hands narration to an `EventSink`
//!
//! The library performs no output of its own; writing the narrated log and
//! the table is left to the application layer (biathlon-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use biathlon_core::{EventReader, NullSink, RaceConfigFile, RaceSession};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file: RaceConfigFile = serde_json::from_str(
//!     r#"{"laps": 2, "lapLen": 3500, "penaltyLen": 150, "firingLines": 2,
//!         "start": "10:00:00", "startDelta": "00:01:30"}"#,
//! ).unwrap();
//! let mut session = RaceSession::new(file.validate().unwrap());
//!
//! let events = EventReader::new(BufReader::new(File::open("events").unwrap()));
//! session.process(events, &mut NullSink).unwrap();
//!
//! for row in session.results() {
//!     println!("{}", row);
//! }
//! ```

pub mod competitor;
pub mod config;
pub mod parser;
pub mod processor;
pub mod results;
pub mod session;
pub mod timefmt;
pub mod types;

// Re-export main types for convenience
pub use competitor::{Competitor, CompetitorStore, Status};
pub use config::{RaceConfig, RaceConfigFile};
pub use parser::{parse_event_line, EventReader};
pub use processor::{EventProcessor, MISSED_START_REASON, TARGETS_PER_STAGE};
pub use results::{build_results, ResultRow, Split, Standing};
pub use session::{EventSink, NullSink, RaceSession};
pub use types::{
    ClockTime, CompetitorId, DerivedEvent, DerivedKind, EventKind, ParseEventError, RaceError,
    RaceEvent, Result,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Race session runner
//!
//! Ties the processor to a narration sink: every input event is narrated
//! before it is applied, and any derived event is narrated right after it.

use crate::competitor::CompetitorStore;
use crate::config::RaceConfig;
use crate::processor::EventProcessor;
use crate::results::{build_results, ResultRow};
use crate::types::{DerivedEvent, RaceEvent, Result};
use std::io;

/// Receives the narration of a race in causal order
pub trait EventSink {
    /// Called for each input event before it is applied
    fn on_event(&mut self, event: &RaceEvent) -> io::Result<()>;

    /// Called for each derived event right after its cause was applied
    fn on_derived(&mut self, event: &DerivedEvent) -> io::Result<()>;
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &RaceEvent) -> io::Result<()> {
        Ok(())
    }

    fn on_derived(&mut self, _event: &DerivedEvent) -> io::Result<()> {
        Ok(())
    }
}

/// State of one race run
pub struct RaceSession {
    config: RaceConfig,
    store: CompetitorStore,
}

impl RaceSession {
    pub fn new(config: RaceConfig) -> Self {
        Self {
            config,
            store: CompetitorStore::new(),
        }
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn store(&self) -> &CompetitorStore {
        &self.store
    }

    /// Narrate, apply, then narrate whatever the event caused
    pub fn ingest<S: EventSink>(&mut self, event: &RaceEvent, sink: &mut S) -> Result<Option<DerivedEvent>> {
        sink.on_event(event)?;
        let derived = EventProcessor::new(&self.config).apply(event, &mut self.store)?;
        if let Some(derived) = &derived {
            sink.on_derived(derived)?;
        }
        Ok(derived)
    }

    /// Consume an event stream, stopping at the first error
    ///
    /// Returns the number of events applied.
    pub fn process<I, S>(&mut self, events: I, sink: &mut S) -> Result<usize>
    where
        I: IntoIterator<Item = Result<RaceEvent>>,
        S: EventSink,
    {
        let mut count = 0;
        for event in events {
            self.ingest(&event?, sink)?;
            count += 1;
        }
        log::info!(
            "Processed {} events for {} competitors",
            count,
            self.store.len()
        );
        Ok(count)
    }

    /// Build the ranked results table
    pub fn results(&self) -> Vec<ResultRow> {
        build_results(&self.store, &self.config)
    }
}

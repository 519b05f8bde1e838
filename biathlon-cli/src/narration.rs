//! Narrated race log
//!
//! Renders every input and derived event as one human-readable line:
//! `[HH:MM:SS.mmm] The competitor(1) registered`.

use biathlon_core::timefmt::format_clock_time;
use biathlon_core::{DerivedEvent, DerivedKind, EventKind, EventSink, RaceEvent};
use std::io::{self, Write};

/// Writes narration lines to any `Write` target
pub struct TextLog<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> TextLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Number of lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, time: biathlon_core::ClockTime, sentence: String) -> io::Result<()> {
        writeln!(self.writer, "[{}] {}", format_clock_time(time), sentence)?;
        self.lines += 1;
        Ok(())
    }
}

/// Sentence for an input event
pub fn describe_event(event: &RaceEvent) -> String {
    let id = event.competitor_id;
    let extra = &event.extra;
    match event.kind {
        EventKind::Registered => format!("The competitor({}) registered", id),
        EventKind::StartTimeSet => format!(
            "The start time for the competitor({}) was set by a draw to {}",
            id, extra
        ),
        EventKind::OnStartLine => format!("The competitor({}) is on the start line", id),
        EventKind::Started => format!("The competitor({}) has started", id),
        EventKind::OnFiringRange => format!("The competitor({}) is on the firing range({})", id, extra),
        EventKind::TargetHit => format!("The target({}) has been hit by competitor({})", extra, id),
        EventKind::LeftFiringRange => format!("The competitor({}) left the firing range", id),
        EventKind::EnteredPenalty => format!("The competitor({}) entered the penalty laps", id),
        EventKind::LeftPenalty => format!("The competitor({}) left the penalty laps", id),
        EventKind::EndedMainLap => format!("The competitor({}) ended the main lap", id),
        EventKind::CannotContinue => format!("The competitor({}) can`t continue: {}", id, extra),
    }
}

/// Sentence for a derived event
pub fn describe_derived(event: &DerivedEvent) -> String {
    match event.kind {
        DerivedKind::Disqualified => format!(
            "The competitor({}) is disqualified: {}",
            event.competitor_id, event.extra
        ),
        DerivedKind::Finished => format!("The competitor({}) finished the race", event.competitor_id),
    }
}

impl<W: Write> EventSink for TextLog<W> {
    fn on_event(&mut self, event: &RaceEvent) -> io::Result<()> {
        self.write_line(event.time, describe_event(event))
    }

    fn on_derived(&mut self, event: &DerivedEvent) -> io::Result<()> {
        self.write_line(event.time, describe_derived(event))
    }
}

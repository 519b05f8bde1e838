// End-to-end race scenarios: log text in, results table out
use biathlon_core::{
    ClockTime, DerivedEvent, DerivedKind, EventReader, EventSink, NullSink, RaceConfig,
    RaceConfigFile, RaceError, RaceEvent, RaceSession, Status,
};
use chrono::Duration;
use std::io;

const SAMPLE_CONFIG: &str = include_str!("../../data/config.json");
const SAMPLE_EVENTS: &str = include_str!("../../data/events");

#[derive(Default)]
struct DerivedLog {
    derived: Vec<DerivedEvent>,
    events: usize,
}

impl EventSink for DerivedLog {
    fn on_event(&mut self, _event: &RaceEvent) -> io::Result<()> {
        self.events += 1;
        Ok(())
    }

    fn on_derived(&mut self, event: &DerivedEvent) -> io::Result<()> {
        self.derived.push(event.clone());
        Ok(())
    }
}

fn run(config: RaceConfig, log: &str) -> (RaceSession, DerivedLog) {
    let mut session = RaceSession::new(config);
    let mut sink = DerivedLog::default();
    session
        .process(EventReader::new(log.as_bytes()), &mut sink)
        .unwrap();
    (session, sink)
}

fn time(value: &str) -> ClockTime {
    biathlon_core::timefmt::parse_clock_time(value).unwrap()
}

#[test]
fn test_sample_race_results_table() {
    let file: RaceConfigFile = serde_json::from_str(SAMPLE_CONFIG).unwrap();
    let (session, sink) = run(file.validate().unwrap(), SAMPLE_EVENTS);

    let table: Vec<String> = session.results().iter().map(|row| row.to_string()).collect();
    assert_eq!(
        table,
        vec![
            "00:40:00.000 3 [{00:19:00.000, 3.203}, {00:21:00.000, 2.898}] {00:01:40.000, 1.000} 8/10",
            "[NotFinished] 1 [{00:29:03.872, 2.094}, {,}] {00:01:52.476, 0.445} 4/5",
            "[NotStarted] 2 [{,}, {,}] {,} 0/0",
        ]
    );

    let derived: Vec<(u32, DerivedKind, &str)> = sink
        .derived
        .iter()
        .map(|e| (e.competitor_id, e.kind, e.extra.as_str()))
        .collect();
    assert_eq!(
        derived,
        vec![
            (2, DerivedKind::Disqualified, "missed the start time"),
            (1, DerivedKind::Disqualified, "Lost in the forest"),
            (3, DerivedKind::Finished, ""),
        ]
    );
    assert_eq!(sink.events, SAMPLE_EVENTS.lines().count());
}

#[test]
fn test_two_lap_finish() {
    let log = "\
[10:00:00.000] 1 1
[10:00:01.000] 2 1 10:00:00.000
[10:00:04.000] 4 1
[10:05:00.000] 10 1
[10:10:00.000] 10 1
";
    let config = RaceConfig::new(2, 1500, 150, Duration::seconds(5));
    let (session, sink) = run(config, log);

    let competitor = session.store().get(1).unwrap();
    assert_eq!(competitor.status, Status::Finished);
    assert_eq!(competitor.laps, vec![Duration::minutes(5), Duration::minutes(5)]);
    assert_eq!(competitor.finish, Some(time("10:10:00.000")));
    assert_eq!(
        sink.derived,
        vec![DerivedEvent::finished(time("10:10:00.000"), 1)]
    );

    let rows = session.results();
    assert_eq!(rows[0].standing.elapsed(), Some(Duration::minutes(10)));
    assert!(rows[0].to_string().starts_with("00:10:00.000 1 [{00:05:00.000, 5.000}"));
}

#[test]
fn test_late_start_disqualifies() {
    let log = "\
[09:00:00.000] 1 2
[09:00:01.000] 2 2 10:00:00.000
[10:00:10.000] 4 2
";
    let config = RaceConfig::new(2, 1500, 150, Duration::seconds(5));
    let (session, sink) = run(config, log);

    assert_eq!(session.store().get(2).unwrap().status, Status::Disqualified);
    assert_eq!(
        sink.derived,
        vec![DerivedEvent::disqualified(time("10:00:10.000"), 2, "missed the start time")]
    );
}

#[test]
fn test_penalty_laps_owed_after_first_stage() {
    let log = "\
[09:00:00.000] 1 3
[09:00:01.000] 2 3 10:00:00.000
[10:00:01.000] 4 3
[10:10:00.000] 5 3 1
[10:10:01.000] 6 3 1
[10:10:02.000] 6 3 2
[10:10:03.000] 6 3 3
[10:10:04.000] 7 3
";
    let config = RaceConfig::new(2, 1500, 150, Duration::seconds(5));
    let (session, _) = run(config, log);

    let competitor = session.store().get(3).unwrap();
    assert!(competitor.laps.is_empty());
    assert_eq!(competitor.penalty_laps, 2);
}

#[test]
fn test_finishers_sorted_by_elapsed_time() {
    let log = "\
[09:00:00.000] 1 1
[09:00:00.000] 1 2
[09:00:00.000] 1 3
[09:00:01.000] 2 1 10:00:00.000
[09:00:01.000] 2 2 10:01:00.000
[09:00:01.000] 2 3 10:02:00.000
[10:00:00.000] 4 1
[10:01:00.000] 4 2
[10:02:00.000] 4 3
[10:20:00.000] 10 2
[10:21:00.000] 10 1
[10:30:00.000] 11 3 Broken ski
";
    let config = RaceConfig::new(1, 1500, 150, Duration::seconds(5));
    let (session, _) = run(config, log);

    let rows = session.results();
    let ids: Vec<_> = rows.iter().map(|r| r.competitor_id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    let elapsed: Vec<_> = rows.iter().filter_map(|r| r.standing.elapsed()).collect();
    assert!(elapsed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(session.store().get(3).unwrap().extra, "Broken ski");
}

#[test]
fn test_unregistered_competitor_aborts_run() {
    let log = "\
[09:00:00.000] 1 1
[09:00:01.000] 2 9 10:00:00.000
";
    let config = RaceConfig::new(1, 1500, 150, Duration::seconds(5));
    let mut session = RaceSession::new(config);
    let err = session
        .process(EventReader::new(log.as_bytes()), &mut NullSink)
        .unwrap_err();

    assert!(matches!(err, RaceError::UnknownCompetitor { competitor_id: 9, .. }));
}

#[test]
fn test_malformed_line_aborts_run() {
    let log = "\
[09:00:00.000] 1 1
09:00:01.000 2 1 10:00:00.000
";
    let config = RaceConfig::new(1, 1500, 150, Duration::seconds(5));
    let mut session = RaceSession::new(config);
    let err = session
        .process(EventReader::new(log.as_bytes()), &mut NullSink)
        .unwrap_err();

    assert!(matches!(err, RaceError::MalformedEvent { line: 2, .. }));
    assert_eq!(session.store().len(), 1);
}

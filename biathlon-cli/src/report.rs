//! Results table output
//!
//! Text mode mirrors the narrated log's plain style; JSON mode is meant for
//! other tools.

use anyhow::Result;
use biathlon_core::ResultRow;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write the results table in the requested format
pub fn write_results<W: Write>(writer: &mut W, rows: &[ResultRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(writer)?;
            writeln!(writer, "Resulting Table")?;
            for row in rows {
                writeln!(writer, "{}", row)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, rows)?;
            writeln!(writer)?;
        }
    }
    log::debug!("Wrote {} result rows as {:?}", rows.len(), format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biathlon_core::{EventReader, NullSink, RaceConfig, RaceSession};
    use chrono::Duration;

    fn rows() -> Vec<ResultRow> {
        let log = "\
[09:00:00.000] 1 1
[09:00:00.000] 1 2
[09:00:01.000] 2 1 10:00:00.000
[10:00:02.000] 4 1
[10:04:00.000] 10 1
";
        let mut session = RaceSession::new(RaceConfig::new(1, 2400, 150, Duration::seconds(5)));
        session
            .process(EventReader::new(log.as_bytes()), &mut NullSink)
            .unwrap();
        session.results()
    }

    #[test]
    fn test_text_table() {
        let mut out = Vec::new();
        write_results(&mut out, &rows(), OutputFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nResulting Table\n\
             00:04:00.000 1 [{00:04:00.000, 10.000}] {,} 0/5\n\
             [NotFinished] 2 [{,}] {,} 0/0\n"
        );
    }

    #[test]
    fn test_json_table() {
        let mut out = Vec::new();
        write_results(&mut out, &rows(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["competitor_id"], 1);
        assert_eq!(rows[0]["standing"]["elapsed"], "00:04:00.000");
        assert_eq!(rows[0]["laps"][0]["speed"], 10.0);
        assert_eq!(rows[1]["standing"]["status"], "NotFinished");
    }
}

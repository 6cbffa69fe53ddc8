//! Event Feed - canonical trade records from a replay log
//!
//! Reads the external normalizer's output format: one JSON `TradeEvent`
//! per line, sorted by timestamp. The feed is the stand-in boundary for
//! the normalizer: unparsable lines are counted and skipped here, so the
//! core never sees malformed input.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use argus_core::{TimestampMs, TradeEvent, to_datetime};

use crate::error::FeedError;

/// A fully loaded, ordered event sequence ready for replay
pub struct EventFeed {
    events: Vec<TradeEvent>,
    skipped_lines: u64,
    dropped_at_cutoff: u64,
}

impl EventFeed {
    /// Load events from a log file. An unreadable path is fatal.
    pub fn from_path(
        path: impl AsRef<Path>,
        session_cutoff: Option<TimestampMs>,
    ) -> Result<Self, FeedError> {
        let file = File::open(path.as_ref())?;
        log::info!("[feed] reading {}", path.as_ref().display());
        Self::from_reader(file, session_cutoff)
    }

    /// Load events from any reader (file, stdin, in-memory buffer)
    pub fn from_reader(
        reader: impl Read,
        session_cutoff: Option<TimestampMs>,
    ) -> Result<Self, FeedError> {
        let mut events = Vec::new();
        let mut skipped_lines = 0u64;
        let mut dropped_at_cutoff = 0u64;
        let mut cutoff_logged = false;

        for line in BufReader::new(reader).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let event: TradeEvent = match serde_json::from_str(line) {
                Ok(event) => event,
                Err(err) => {
                    skipped_lines += 1;
                    log::debug!("[feed] skipping malformed line: {}", err);
                    continue;
                }
            };

            if let Some(cutoff) = session_cutoff {
                if event.timestamp >= cutoff {
                    if !cutoff_logged {
                        log::info!(
                            "[feed] reached session cutoff {} at event time {}, dropping remainder",
                            to_datetime(cutoff),
                            to_datetime(event.timestamp)
                        );
                        cutoff_logged = true;
                    }
                    dropped_at_cutoff += 1;
                    continue;
                }
            }

            events.push(event);
        }

        if skipped_lines > 0 {
            log::warn!("[feed] skipped {} malformed lines", skipped_lines);
        }
        log::info!(
            "[feed] loaded {} events ({} dropped at cutoff)",
            events.len(),
            dropped_at_cutoff
        );

        Ok(Self {
            events,
            skipped_lines,
            dropped_at_cutoff,
        })
    }

    pub fn events(&self) -> &[TradeEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TradeEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    pub fn dropped_at_cutoff(&self) -> u64 {
        self.dropped_at_cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::Side;
    use std::io::Cursor;

    const LINES: &str = r#"
{"symbol":"HPG","volume":1000,"price":"24150","side":"buy","timestamp":1000}
not json at all
{"symbol":"VNM","volume":500,"price":"65.4","side":"sell","timestamp":2000}

{"symbol":"HPG","volume":1000,"price":"24200","side":"buy","timestamp":3000}
"#;

    #[test]
    fn test_reads_events_and_skips_malformed() {
        let feed = EventFeed::from_reader(Cursor::new(LINES), None).unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.skipped_lines(), 1);
        assert_eq!(feed.events()[0].symbol, "HPG");
        assert_eq!(feed.events()[1].side, Side::AggressorSell);
    }

    #[test]
    fn test_session_cutoff_drops_late_events() {
        let feed = EventFeed::from_reader(Cursor::new(LINES), Some(3000)).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.dropped_at_cutoff(), 1);
        assert!(feed.events().iter().all(|e| e.timestamp < 3000));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = EventFeed::from_path("/definitely/not/a/real/path.jsonl", None);
        assert!(matches!(result, Err(FeedError::Io(_))));
    }
}

//! Progress tracking for engine runs
//!
//! ffmpeg is started with `-progress pipe:1`, which writes blocks of
//! `key=value` lines to stdout, each block closed by a `progress=continue` or
//! `progress=end` line. [`ProgressParser`] folds those lines into
//! [`ProgressEvent`]s and [`ProgressTracker`] maps them onto a
//! [`PlaybackPosition`] for the callbacks.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::info;

use crate::domain::model::{ClockTime, PlaybackPosition};

/// Progress callback trait for UI integration
pub trait ProgressCallback: Send + Sync {
    /// Called when operation starts
    fn on_start(&self, position: &PlaybackPosition);

    /// Called during operation progress
    fn on_progress(&self, position: &PlaybackPosition);

    /// Called when the engine reports the end of its output
    fn on_complete(&self, position: &PlaybackPosition);
}

/// One completed progress block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    /// Output timestamp reached, in seconds
    pub out_time: f64,
    pub finished: bool,
}

/// Line-oriented parser for ffmpeg's `-progress` output
#[derive(Debug, Default)]
pub struct ProgressParser {
    out_time: f64,
}

impl ProgressParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns an event when the line closes a block
    pub fn feed(&mut self, line: &str) -> Option<ProgressEvent> {
        let (key, value) = line.trim().split_once('=')?;
        match key {
            // out_time_ms is in microseconds as well
            "out_time_us" | "out_time_ms" => {
                if let Ok(us) = value.trim().parse::<i64>() {
                    self.out_time = (us.max(0) as f64) / 1_000_000.0;
                }
                None
            }
            "out_time" => {
                if let Ok(time) = ClockTime::parse(value) {
                    self.out_time = time.as_seconds();
                }
                None
            }
            "progress" => Some(ProgressEvent {
                out_time: self.out_time,
                finished: value.trim() == "end",
            }),
            _ => None,
        }
    }
}

/// Maps progress events onto a playback position and notifies a callback
pub struct ProgressTracker {
    position: PlaybackPosition,
    callback: Arc<dyn ProgressCallback>,
}

impl ProgressTracker {
    pub fn new(expected_duration: f64, callback: Arc<dyn ProgressCallback>) -> Self {
        Self {
            position: PlaybackPosition::new(expected_duration),
            callback,
        }
    }

    pub fn start(&self) {
        self.callback.on_start(&self.position);
    }

    pub fn handle(&mut self, event: ProgressEvent) {
        self.position.update_time(event.out_time);
        if event.finished {
            self.callback.on_complete(&self.position);
        } else {
            self.callback.on_progress(&self.position);
        }
    }

    pub fn position(&self) -> &PlaybackPosition {
        &self.position
    }
}

/// Callback that writes progress to the log, at most once per interval
pub struct LoggingProgress {
    interval: Duration,
    last_report: Mutex<Option<Instant>>,
}

impl LoggingProgress {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_report: Mutex::new(None),
        }
    }

    fn due(&self) -> bool {
        let Ok(mut last) = self.last_report.lock() else {
            return false;
        };
        let now = Instant::now();
        match *last {
            Some(previous) if now.duration_since(previous) < self.interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

impl ProgressCallback for LoggingProgress {
    fn on_start(&self, position: &PlaybackPosition) {
        info!(duration = position.duration(), "Engine started");
    }

    fn on_progress(&self, position: &PlaybackPosition) {
        if self.due() {
            info!(
                percent = %format!("{:.1}", position.fraction() * 100.0),
                "Processing {}", position
            );
        }
    }

    fn on_complete(&self, position: &PlaybackPosition) {
        info!("Processing complete at {}", position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(String, f64)>>,
    }

    impl ProgressCallback for Recorder {
        fn on_start(&self, position: &PlaybackPosition) {
            self.events.lock().unwrap().push(("start".into(), position.current()));
        }
        fn on_progress(&self, position: &PlaybackPosition) {
            self.events.lock().unwrap().push(("progress".into(), position.current()));
        }
        fn on_complete(&self, position: &PlaybackPosition) {
            self.events.lock().unwrap().push(("complete".into(), position.current()));
        }
    }

    #[test]
    fn test_parser_emits_on_progress_line() {
        let mut parser = ProgressParser::new();
        assert_eq!(parser.feed("frame=120"), None);
        assert_eq!(parser.feed("out_time_us=4000000"), None);
        assert_eq!(
            parser.feed("progress=continue"),
            Some(ProgressEvent { out_time: 4.0, finished: false })
        );
        assert_eq!(parser.feed("out_time=00:00:06.500000"), None);
        assert_eq!(
            parser.feed("progress=end"),
            Some(ProgressEvent { out_time: 6.5, finished: true })
        );
    }

    #[test]
    fn test_parser_ignores_garbage_and_negative_times() {
        let mut parser = ProgressParser::new();
        assert_eq!(parser.feed("not a progress line"), None);
        parser.feed("out_time_us=-12345");
        parser.feed("out_time=N/A");
        assert_eq!(
            parser.feed("progress=continue"),
            Some(ProgressEvent { out_time: 0.0, finished: false })
        );
    }

    #[test]
    fn test_tracker_clamps_to_expected_duration() {
        let recorder = Arc::new(Recorder::default());
        let mut tracker = ProgressTracker::new(10.0, recorder.clone());
        tracker.start();
        tracker.handle(ProgressEvent { out_time: 5.0, finished: false });
        tracker.handle(ProgressEvent { out_time: 10.04, finished: true });

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                ("start".to_string(), 0.0),
                ("progress".to_string(), 5.0),
                ("complete".to_string(), 10.0),
            ]
        );
        assert_eq!(tracker.position().fraction(), 1.0);
    }

    #[test]
    fn test_logging_progress_throttles() {
        let progress = LoggingProgress::new(Duration::from_secs(3600));
        assert!(progress.due());
        assert!(!progress.due());
    }
}

//! Telemetry Module for DiaScreen
//!
//! Collects anonymous statistics about screening sessions for:
//! - Session reports at shutdown
//! - Performance monitoring
//!
//! Privacy-first: no raw measurements are stored, only scores and
//! outcomes

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::types::{Assessment, Classification};

/// Single telemetry event (anonymized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningEvent {
    /// Unix timestamp
    pub timestamp: u64,
    /// Outcome of the pass
    pub classification: Classification,
    /// Total band score
    pub score: u8,
    /// Scoring latency in milliseconds (includes the simulated pause)
    pub latency_ms: u64,
}

impl ScreeningEvent {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            timestamp: current_timestamp(),
            classification: assessment.classification,
            score: assessment.total,
            latency_ms: assessment.latency_ms,
        }
    }
}

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScreenerStats {
    /// Submissions that passed the gate and were scored
    pub total_assessed: u64,
    /// Submissions rejected at the input gate
    pub total_rejected: u64,
    /// Assessments classified diabetic
    pub flagged_diabetic: u64,
    /// Average scoring latency (ms)
    pub avg_latency_ms: f64,
    /// Period start timestamp
    pub period_start: u64,
    /// Period end timestamp
    pub period_end: u64,
}

impl ScreenerStats {
    /// Generate session summary
    pub fn session_summary(&self) -> String {
        let period_mins = (self.period_end.saturating_sub(self.period_start)) / 60;

        format!(
            r#"
╔══════════════════════════════════════════════════════════════════╗
║           🩺 DIASCREEN - SESSION REPORT                          ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║   📊 Session length: {} minutes                                  ║
║                                                                  ║
║   🔍 Assessments Completed:    {:>10}                           ║
║   ⛔ Submissions Rejected:     {:>10}                           ║
║   🔴 Flagged Diabetic:         {:>10}                           ║
║                                                                  ║
║   ⚡ Avg Scoring Latency:      {:>10.2}ms                        ║
║                                                                  ║
╠══════════════════════════════════════════════════════════════════╣
║   "Band-based threshold screening - not a medical diagnosis"     ║
╚══════════════════════════════════════════════════════════════════╝
"#,
            period_mins,
            self.total_assessed,
            self.total_rejected,
            self.flagged_diabetic,
            self.avg_latency_ms,
        )
    }

    /// Export as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Export as CSV row
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.2}\n",
            self.period_start,
            self.period_end,
            self.total_assessed,
            self.total_rejected,
            self.flagged_diabetic,
            self.avg_latency_ms,
        )
    }
}

/// Main telemetry collector
pub struct TelemetryCollector {
    /// Event buffer (in-memory)
    events: Arc<RwLock<Vec<ScreeningEvent>>>,
    /// Atomic counters for fast updates
    total_assessed: AtomicU64,
    total_rejected: AtomicU64,
    flagged_diabetic: AtomicU64,
    total_latency_ms: AtomicU64,
    /// Session start time
    session_start: u64,
    /// Export directory
    export_dir: PathBuf,
    /// Max events in memory before flush
    max_buffer_size: usize,
}

impl TelemetryCollector {
    /// Create new collector with default settings
    pub fn new() -> Self {
        Self::with_config(PathBuf::from(crate::utils::constants::DEFAULT_TELEMETRY_DIR), 1000)
    }

    /// Create collector with custom config
    pub fn with_config(export_dir: PathBuf, max_buffer_size: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::with_capacity(max_buffer_size))),
            total_assessed: AtomicU64::new(0),
            total_rejected: AtomicU64::new(0),
            flagged_diabetic: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            session_start: current_timestamp(),
            export_dir,
            max_buffer_size,
        }
    }

    /// Record a submission rejected at the input gate
    pub fn record_rejection(&self) {
        self.total_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed scoring pass
    pub fn record_assessment(&self, assessment: &Assessment) {
        self.total_assessed.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(assessment.latency_ms, Ordering::Relaxed);

        if assessment.classification == Classification::Diabetic {
            self.flagged_diabetic.fetch_add(1, Ordering::Relaxed);
        }

        // Buffer event
        if let Ok(mut events) = self.events.write() {
            events.push(ScreeningEvent::from_assessment(assessment));

            // Auto-flush if buffer full
            if events.len() >= self.max_buffer_size {
                let events_to_flush = std::mem::take(&mut *events);
                drop(events); // Release lock before I/O
                let _ = self.flush_events(&events_to_flush);
            }
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> ScreenerStats {
        let total_assessed = self.total_assessed.load(Ordering::Relaxed);
        let total_rejected = self.total_rejected.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);
        let flagged = self.flagged_diabetic.load(Ordering::Relaxed);

        let avg_latency = if total_assessed > 0 {
            total_latency as f64 / total_assessed as f64
        } else {
            0.0
        };

        ScreenerStats {
            total_assessed,
            total_rejected,
            flagged_diabetic: flagged,
            avg_latency_ms: avg_latency,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Export current stats to JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        self.ensure_export_dir()?;
        let stats = self.get_stats();
        let filename = format!("stats_{}.json", current_timestamp());
        let path = self.export_dir.join(filename);

        fs::write(&path, stats.to_json())?;

        Ok(path)
    }

    /// Export stats to CSV (append mode)
    pub fn export_stats_csv(&self) -> Result<PathBuf, std::io::Error> {
        self.ensure_export_dir()?;
        let stats = self.get_stats();
        let path = self.export_dir.join("telemetry_history.csv");

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        // Write header if new file
        if file.metadata()?.len() == 0 {
            writeln!(
                file,
                "period_start,period_end,total_assessed,total_rejected,flagged_diabetic,avg_latency_ms"
            )?;
        }

        write!(file, "{}", stats.to_csv_row())?;

        Ok(path)
    }

    /// Flush any buffered events to disk
    pub fn flush(&self) -> Result<(), std::io::Error> {
        let events_to_flush = self
            .events
            .write()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default();
        self.flush_events(&events_to_flush)
    }

    /// Flush buffered events to disk
    fn flush_events(&self, events: &[ScreeningEvent]) -> Result<(), std::io::Error> {
        if events.is_empty() {
            return Ok(());
        }

        self.ensure_export_dir()?;
        let filename = format!("events_{}.jsonl", current_timestamp());
        let path = self.export_dir.join(filename);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        for event in events {
            if let Ok(json) = serde_json::to_string(event) {
                writeln!(file, "{}", json)?;
            }
        }

        Ok(())
    }

    fn ensure_export_dir(&self) -> Result<(), std::io::Error> {
        if !Path::new(&self.export_dir).exists() {
            fs::create_dir_all(&self.export_dir)?;
        }
        Ok(())
    }

    /// Generate session report
    pub fn generate_session_report(&self) -> String {
        self.get_stats().session_summary()
    }

    /// Reset counters (for a new reporting period)
    #[allow(dead_code)]
    pub fn reset(&self) {
        self.total_assessed.store(0, Ordering::Relaxed);
        self.total_rejected.store(0, Ordering::Relaxed);
        self.flagged_diabetic.store(0, Ordering::Relaxed);
        self.total_latency_ms.store(0, Ordering::Relaxed);

        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::ScoreFactor;

    fn assessment(classification: Classification, score: u8, latency_ms: u64) -> Assessment {
        let mut a = Assessment::new(
            classification,
            score,
            vec![ScoreFactor {
                name: "glucose".to_string(),
                points: 3,
                reason: "test".to_string(),
            }],
        );
        a.latency_ms = latency_ms;
        a
    }

    #[test]
    fn test_event_from_assessment() {
        let event =
            ScreeningEvent::from_assessment(&assessment(Classification::Diabetic, 9, 25));

        assert_eq!(event.classification, Classification::Diabetic);
        assert_eq!(event.score, 9);
        assert_eq!(event.latency_ms, 25);
    }

    #[test]
    fn test_collector_basic() {
        let collector = TelemetryCollector::new();

        collector.record_assessment(&assessment(Classification::NotDiabetic, 2, 10));
        collector.record_assessment(&assessment(Classification::Diabetic, 9, 20));
        collector.record_rejection();

        let stats = collector.get_stats();
        assert_eq!(stats.total_assessed, 2);
        assert_eq!(stats.total_rejected, 1);
        assert_eq!(stats.flagged_diabetic, 1);
        assert!((stats.avg_latency_ms - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_stats_json_export() {
        let stats = ScreenerStats {
            total_assessed: 1000,
            total_rejected: 50,
            flagged_diabetic: 250,
            avg_latency_ms: 23.5,
            ..Default::default()
        };

        let json = stats.to_json();
        assert!(json.contains("1000"));
        assert!(json.contains("flagged_diabetic"));
    }

    #[test]
    fn test_session_summary() {
        let stats = ScreenerStats {
            total_assessed: 42,
            total_rejected: 5,
            flagged_diabetic: 12,
            avg_latency_ms: 1512.5,
            period_start: 1704067200,
            period_end: 1704070800, // one hour later
            ..Default::default()
        };

        let report = stats.session_summary();
        assert!(report.contains("42"));
        assert!(report.contains("12"));
        assert!(report.contains("60 minutes"));
    }
}

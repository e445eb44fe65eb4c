//! Rendering of recorded timing entries for logs, JSON payloads and response headers.

use common::{Entry, EntryType};
use serde::Deserialize;

/// Output selected by the host for a finished request.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    Log,
    Json,
    #[default]
    ServerTiming,
}

/// Emits one `info` event per entry.
pub fn log_entries(entries: &[&Entry]) {
    for entry in entries {
        tracing::info!(
            name = %entry.name,
            entry_type = %entry.entry_type,
            start_time = entry.start_time,
            duration_ms = entry.duration * 1000.0,
            "timing entry"
        );
    }
}

pub fn to_json(entries: &[&Entry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}

/// Renders measures as a `Server-Timing` header value (`name;dur=<ms>`). Marks are skipped.
pub fn server_timing(entries: &[&Entry]) -> String {
    entries
        .iter()
        .filter(|e| e.entry_type == EntryType::Measure)
        .map(|e| format!("{};dur={:.3}", metric_name(&e.name), e.duration * 1000.0))
        .collect::<Vec<_>>()
        .join(", ")
}

// Header metric names are non-empty HTTP tokens.
fn metric_name(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::mark("requestStart", 100.0),
            Entry::measure("db query", 100.0, 0.0125),
            Entry::mark("render", 100.5),
            Entry::measure("total", 100.0, 0.75),
        ]
    }

    #[test]
    fn test_server_timing_skips_marks() {
        let entries = sample();
        let refs: Vec<&Entry> = entries.iter().collect();
        assert_eq!(server_timing(&refs), "db_query;dur=12.500, total;dur=750.000");
    }

    #[test]
    fn test_server_timing_empty() {
        let entries = [Entry::mark("requestStart", 1.0)];
        let refs: Vec<&Entry> = entries.iter().collect();
        assert_eq!(server_timing(&refs), "");
    }

    #[test]
    fn test_server_timing_empty_name() {
        let entries = [Entry::measure("", 1.0, 0.001)];
        let refs: Vec<&Entry> = entries.iter().collect();
        assert_eq!(server_timing(&refs), "_;dur=1.000");
    }

    #[test]
    fn test_to_json_array() {
        let entries = sample();
        let refs: Vec<&Entry> = entries.iter().take(2).collect();
        let json = to_json(&refs).expect("serializable");
        let decoded: Vec<Entry> = serde_json::from_str(&json).expect("round trip");
        assert_eq!(decoded, entries[..2].to_vec());
    }

    #[test]
    fn test_report_format_names() {
        let format: ReportFormat = serde_json::from_str("\"server-timing\"").unwrap();
        assert_eq!(format, ReportFormat::ServerTiming);
        let format: ReportFormat = serde_json::from_str("\"log\"").unwrap();
        assert_eq!(format, ReportFormat::Log);
    }
}

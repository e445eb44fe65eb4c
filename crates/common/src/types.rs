use crate::error::TimingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a recorded entry (point in time or duration)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Mark,
    Measure,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Mark => "mark",
            EntryType::Measure => "measure",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mark" => Ok(EntryType::Mark),
            "measure" => Ok(EntryType::Measure),
            other => Err(TimingError::UnknownEntryType(other.to_string())),
        }
    }
}

/// One named timestamp or duration recorded during a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub entry_type: EntryType,
    /// Seconds since the Unix epoch.
    pub start_time: f64,
    /// Seconds. Always zero for marks; may be negative for measures whose end precedes their start.
    pub duration: f64,
}

impl Entry {
    pub fn mark(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Mark,
            start_time,
            duration: 0.0,
        }
    }

    pub fn measure(name: impl Into<String>, start_time: f64, duration: f64) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Measure,
            start_time,
            duration,
        }
    }

    pub fn is_mark(&self) -> bool {
        self.entry_type == EntryType::Mark
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let entry = Entry::measure("db", 1700000000.5, 0.25);

        let serialized = serde_json::to_string(&entry).expect("Failed to serialize");
        assert_eq!(
            serialized,
            r#"{"name":"db","entryType":"measure","startTime":1700000000.5,"duration":0.25}"#
        );

        let deserialized: Entry = serde_json::from_str(&serialized).expect("Failed to deserialize");
        assert_eq!(entry, deserialized);
    }

    #[test]
    fn test_entry_type_from_str() {
        assert_eq!("mark".parse::<EntryType>(), Ok(EntryType::Mark));
        assert_eq!("measure".parse::<EntryType>(), Ok(EntryType::Measure));
        assert_eq!(
            "Mark".parse::<EntryType>(),
            Err(TimingError::UnknownEntryType("Mark".to_string()))
        );
    }

    #[test]
    fn test_mark_has_zero_duration() {
        let entry = Entry::mark("boot", 12.5);
        assert!(entry.is_mark());
        assert_eq!(entry.duration, 0.0);
        assert_eq!(entry.end_time(), 12.5);
    }
}

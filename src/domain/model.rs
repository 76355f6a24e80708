use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of walking a file with a fixed sequence of seek + window loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub file_len: u64,
    pub offsets_probed: u64,
    pub chunk_loads: u64,
    pub bytes_loaded: u64,
    pub elapsed_ms: u64,
}

/// Result of reading a file as a stream of length-prefixed records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub file_len: u64,
    pub records: u64,
    pub payload_bytes: u64,
    pub largest_record: u64,
    pub first_time_ns: Option<u64>,
    pub last_time_ns: Option<u64>,
    pub trailing_bytes: u64,
    pub chunk_loads: u64,
    pub elapsed_ms: u64,
}

impl ScanReport {
    pub fn first_time(&self) -> Option<DateTime<Utc>> {
        self.first_time_ns.map(timestamp_from_nanos)
    }

    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.last_time_ns.map(timestamp_from_nanos)
    }

    /// Span between the first and last record timestamps.
    pub fn time_span_ns(&self) -> Option<u64> {
        match (self.first_time_ns, self.last_time_ns) {
            (Some(first), Some(last)) => Some(last.saturating_sub(first)),
            _ => None,
        }
    }
}

fn timestamp_from_nanos(ns: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(i64::try_from(ns).unwrap_or(i64::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Probe(ProbeReport),
    Scan(ScanReport),
}

impl ProcessOutcome {
    pub fn bytes_read(&self) -> u64 {
        match self {
            ProcessOutcome::Probe(r) => r.bytes_loaded,
            ProcessOutcome::Scan(r) => r.file_len - r.trailing_bytes,
        }
    }
}

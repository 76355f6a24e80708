use crate::core::cursor::{PartialLoadCursor, DEFAULT_CHUNK_SIZE};
use crate::domain::model::ScanReport;
use crate::domain::ports::ByteSource;
use crate::utils::error::{BigFileError, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub chunk_size: u64,
    /// Each record starts with a `u32 sec, u32 nsec` timestamp.
    pub timestamps: bool,
    pub skip_payloads: bool,
    /// Report a truncated final record instead of failing on it.
    pub allow_trailing: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            timestamps: false,
            skip_payloads: false,
            allow_trailing: false,
        }
    }
}

/// Walks a file of little-endian length-prefixed records.
///
/// A record that runs past the end of the file fails with `OutOfBounds`
/// carrying the record's start offset and the bytes it needs from there.
#[derive(Debug, Clone, Default)]
pub struct RecordScanner {
    options: ScanOptions,
}

impl RecordScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub async fn run<S: ByteSource>(&self, source: &S) -> Result<ScanReport> {
        let started = Instant::now();
        let mut cursor = PartialLoadCursor::with_chunk_size(source, self.options.chunk_size);
        let mut report = ScanReport {
            file_len: cursor.len(),
            ..Default::default()
        };

        while cursor.remaining() > 0 {
            let record_start = cursor.pos();
            match self.next_record(&mut cursor).await {
                Ok((time, len)) => {
                    report.records += 1;
                    report.payload_bytes += len;
                    report.largest_record = report.largest_record.max(len);
                    if let Some(t) = time {
                        report.first_time_ns.get_or_insert(t);
                        report.last_time_ns = Some(t);
                    }
                }
                Err(BigFileError::OutOfBounds { .. }) if self.options.allow_trailing => {
                    report.trailing_bytes = report.file_len - record_start;
                    tracing::warn!(
                        "{} ends with a truncated record at offset {} ({} bytes)",
                        source.name(),
                        record_start,
                        report.trailing_bytes
                    );
                    break;
                }
                Err(BigFileError::OutOfBounds { pos, requested, len }) => {
                    // report the truncated record from its first byte
                    let requested = pos + requested - record_start;
                    tracing::error!(
                        "Record at offset {} is truncated: needs {} bytes, {} remain",
                        record_start,
                        requested,
                        len - record_start
                    );
                    return Err(BigFileError::OutOfBounds {
                        pos: record_start,
                        requested,
                        len,
                    });
                }
                Err(e) => {
                    tracing::error!("Record at offset {} is unreadable: {}", record_start, e);
                    return Err(e);
                }
            }
        }

        report.chunk_loads = cursor.loads();
        report.elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            "Scanned {} records ({} payload bytes) in {}",
            report.records,
            report.payload_bytes,
            source.name()
        );
        Ok(report)
    }

    async fn next_record<S: ByteSource>(
        &self,
        cursor: &mut PartialLoadCursor<'_, S>,
    ) -> Result<(Option<u64>, u64)> {
        let time = if self.options.timestamps {
            Some(cursor.next_time().await?)
        } else {
            None
        };
        let len = if self.options.skip_payloads {
            cursor.skip_chunk().await?
        } else {
            cursor.next_chunk().await?.len() as u64
        };
        Ok((time, len))
    }
}

use crate::core::cursor::{PartialLoadCursor, DEFAULT_CHUNK_SIZE};
use crate::domain::model::ProbeReport;
use crate::domain::ports::ByteSource;
use crate::utils::error::Result;
use std::time::Instant;

pub const DEFAULT_PROBE_OFFSETS: u64 = 1000;

/// Seeks to each offset in `0..offsets` and loads a full window there.
///
/// This is a load test for the cursor: every step pays for a window read, so
/// it measures how the source copes with many overlapping large reads.
#[derive(Debug, Clone)]
pub struct BigFileProbe {
    offsets: u64,
    chunk_size: u64,
}

impl BigFileProbe {
    pub fn new(offsets: u64, chunk_size: u64) -> Self {
        Self {
            offsets,
            chunk_size,
        }
    }

    pub fn offsets(&self) -> u64 {
        self.offsets
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub async fn run<S: ByteSource>(&self, source: &S) -> Result<ProbeReport> {
        let started = Instant::now();
        let mut cursor = PartialLoadCursor::with_chunk_size(source, self.chunk_size);
        let mut probed = 0;

        for offset in 0..self.offsets {
            if offset > cursor.len() {
                tracing::warn!(
                    "Stopping probe at offset {}: {} is only {} bytes",
                    offset,
                    source.name(),
                    cursor.len()
                );
                break;
            }
            cursor.seek(offset)?;
            cursor.load_chunk().await?;
            probed += 1;
            tracing::debug!("Offset: {}", offset);
        }

        let report = ProbeReport {
            file_len: cursor.len(),
            offsets_probed: probed,
            chunk_loads: cursor.loads(),
            bytes_loaded: cursor.bytes_loaded(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        tracing::info!(
            "Probed {} offsets of {} ({} window loads, {} bytes)",
            report.offsets_probed,
            source.name(),
            report.chunk_loads,
            report.bytes_loaded
        );
        Ok(report)
    }
}

impl Default for BigFileProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_OFFSETS, DEFAULT_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemorySource;

    #[tokio::test]
    async fn test_probe_loads_one_window_per_offset() {
        let source = MemorySource::new("probe", vec![0u8; 100]);
        let report = BigFileProbe::new(10, 16).run(&source).await.unwrap();

        assert_eq!(report.file_len, 100);
        assert_eq!(report.offsets_probed, 10);
        assert_eq!(report.chunk_loads, 10);
        assert_eq!(report.bytes_loaded, 160);
    }

    #[tokio::test]
    async fn test_probe_windows_are_clamped_to_file_end() {
        let source = MemorySource::new("short", vec![0u8; 5]);
        let report = BigFileProbe::new(3, 4).run(&source).await.unwrap();

        // [0,4) + [1,5) + [2,5)
        assert_eq!(report.bytes_loaded, 4 + 4 + 3);
    }

    #[tokio::test]
    async fn test_probe_stops_past_end_of_file() {
        let source = MemorySource::new("tiny", vec![1, 2, 3]);
        let report = BigFileProbe::new(1000, 8).run(&source).await.unwrap();

        // offsets 0..=3 are valid seek targets
        assert_eq!(report.offsets_probed, 4);
    }

    #[test]
    fn test_default_probe() {
        let probe = BigFileProbe::default();
        assert_eq!(probe.offsets(), 1000);
        assert_eq!(probe.chunk_size(), 16 * 1024 * 1024);

        let source = MemorySource::new("empty", Vec::new());
        let report = tokio_test::block_on(probe.run(&source)).unwrap();
        assert_eq!(report.offsets_probed, 1);
        assert_eq!(report.bytes_loaded, 0);
    }
}

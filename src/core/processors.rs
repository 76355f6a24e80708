use crate::core::probe::BigFileProbe;
use crate::core::scan::RecordScanner;
use crate::domain::model::ProcessOutcome;
use crate::domain::ports::{ByteSource, Processor};
use crate::utils::error::{BigFileError, Result};
use async_trait::async_trait;

fn check_chunk_size(processor: &str, chunk_size: u64) -> Result<()> {
    if chunk_size == 0 {
        return Err(BigFileError::InitFailed {
            processor: processor.to_string(),
            message: "chunk size must be at least 1 byte".to_string(),
        });
    }
    Ok(())
}

pub struct ProbeProcessor {
    probe: BigFileProbe,
}

impl ProbeProcessor {
    pub fn new(probe: BigFileProbe) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl Processor for ProbeProcessor {
    fn name(&self) -> &str {
        "probe"
    }

    async fn init(&self) -> Result<()> {
        check_chunk_size(self.name(), self.probe.chunk_size())?;
        tracing::debug!(
            "Probe ready: {} offsets, {} byte windows",
            self.probe.offsets(),
            self.probe.chunk_size()
        );
        Ok(())
    }

    async fn process<S: ByteSource>(&self, source: &S) -> Result<ProcessOutcome> {
        Ok(ProcessOutcome::Probe(self.probe.run(source).await?))
    }
}

pub struct ScanProcessor {
    scanner: RecordScanner,
}

impl ScanProcessor {
    pub fn new(scanner: RecordScanner) -> Self {
        Self { scanner }
    }
}

#[async_trait]
impl Processor for ScanProcessor {
    fn name(&self) -> &str {
        "scan"
    }

    async fn init(&self) -> Result<()> {
        check_chunk_size(self.name(), self.scanner.options().chunk_size)?;
        tracing::debug!("Scanner ready: {:?}", self.scanner.options());
        Ok(())
    }

    async fn process<S: ByteSource>(&self, source: &S) -> Result<ProcessOutcome> {
        Ok(ProcessOutcome::Scan(self.scanner.run(source).await?))
    }
}

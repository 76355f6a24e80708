use crate::domain::model::ProcessOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A sized, random-access byte source: the file handle handed to a processor.
pub trait ByteSource: Send + Sync {
    fn name(&self) -> &str;

    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads `[start, end)`. Callers keep `start <= end <= len()`.
    fn read_range(
        &self,
        start: u64,
        end: u64,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// The module a session forwards selected files to.
#[async_trait]
pub trait Processor: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<()>;

    async fn process<S: ByteSource>(&self, source: &S) -> Result<ProcessOutcome>;
}

use crate::domain::model::ProcessOutcome;
use crate::domain::ports::{ByteSource, Processor};
use crate::utils::error::Result;
use tokio::sync::OnceCell;

/// Front end for a processor: initializes it once, then forwards each
/// selected file to it.
///
/// A failed initialization leaves the session uninitialized, so the next
/// call tries again.
pub struct Session<P: Processor> {
    processor: P,
    ready: OnceCell<()>,
}

impl<P: Processor> Session<P> {
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            ready: OnceCell::new(),
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn is_initialized(&self) -> bool {
        self.ready.initialized()
    }

    pub async fn init(&self) -> Result<()> {
        self.ready
            .get_or_try_init(|| async {
                tracing::info!("Initializing processor '{}'", self.processor.name());
                self.processor.init().await
            })
            .await?;
        Ok(())
    }

    /// Handles one selection event. An empty selection is ignored.
    pub async fn select<S: ByteSource>(&self, selection: Option<&S>) -> Result<Option<ProcessOutcome>> {
        let Some(source) = selection else {
            tracing::debug!("Empty selection, nothing to process");
            return Ok(None);
        };

        self.init().await?;
        tracing::info!(
            "Forwarding {} ({} bytes) to '{}'",
            source.name(),
            source.len(),
            self.processor.name()
        );

        match self.processor.process(source).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(e) => {
                tracing::error!("'{}' failed on {}: {}", self.processor.name(), source.name(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemorySource;
    use crate::domain::model::ProbeReport;
    use crate::utils::error::BigFileError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProcessor {
        init_calls: AtomicUsize,
        fail_first_init: bool,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Processor for RecordingProcessor {
        fn name(&self) -> &str {
            "recording"
        }

        async fn init(&self) -> Result<()> {
            let call = self.init_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail_first_init && call == 0 {
                return Err(BigFileError::InitFailed {
                    processor: "recording".to_string(),
                    message: "not yet".to_string(),
                });
            }
            Ok(())
        }

        async fn process<S: ByteSource>(&self, source: &S) -> Result<ProcessOutcome> {
            self.seen.lock().unwrap().push(source.name().to_string());
            Ok(ProcessOutcome::Probe(ProbeReport {
                file_len: source.len(),
                ..Default::default()
            }))
        }
    }

    #[tokio::test]
    async fn test_selection_is_processed_exactly_once() {
        let session = Session::new(RecordingProcessor::default());
        let file = MemorySource::new("a.bin", vec![0u8; 3]);

        let outcome = session.select(Some(&file)).await.unwrap();
        assert_eq!(
            outcome,
            Some(ProcessOutcome::Probe(ProbeReport {
                file_len: 3,
                ..Default::default()
            }))
        );
        assert_eq!(*session.processor().seen.lock().unwrap(), vec!["a.bin"]);
    }

    #[tokio::test]
    async fn test_init_runs_once_across_selections() {
        let session = Session::new(RecordingProcessor::default());
        let a = MemorySource::new("a", vec![1]);
        let b = MemorySource::new("b", vec![2]);

        session.init().await.unwrap();
        session.select(Some(&a)).await.unwrap();
        session.select(Some(&b)).await.unwrap();

        assert_eq!(session.processor().init_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*session.processor().seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_concurrent_init_runs_once() {
        let session = Session::new(RecordingProcessor::default());
        let (r1, r2, r3) = tokio::join!(session.init(), session.init(), session.init());
        assert!(r1.is_ok() && r2.is_ok() && r3.is_ok());
        assert_eq!(session.processor().init_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_selection_is_ignored() {
        let session = Session::new(RecordingProcessor::default());
        let outcome = session.select::<MemorySource>(None).await.unwrap();

        assert!(outcome.is_none());
        assert!(!session.is_initialized());
        assert!(session.processor().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_init_is_retried() {
        let session = Session::new(RecordingProcessor {
            fail_first_init: true,
            ..Default::default()
        });
        let file = MemorySource::new("a", vec![1]);

        assert!(session.select(Some(&file)).await.is_err());
        assert!(session.processor().seen.lock().unwrap().is_empty());

        assert!(session.select(Some(&file)).await.unwrap().is_some());
        assert_eq!(session.processor().init_calls.load(Ordering::SeqCst), 2);
    }
}

use crate::domain::ports::ByteSource;
use crate::utils::error::{BigFileError, Result};
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Mutex;

/// A file on local disk. Its length is captured when opened, like a browser
/// `File` snapshot.
#[derive(Debug)]
pub struct LocalFileSource {
    name: String,
    len: u64,
    file: Mutex<File>,
}

impl LocalFileSource {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(BigFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            )));
        }

        let name = path.display().to_string();
        tracing::debug!("Opened {} ({} bytes)", name, metadata.len());

        Ok(Self {
            name,
            len: metadata.len(),
            file: Mutex::new(file),
        })
    }
}

impl ByteSource for LocalFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }

    async fn read_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        if start > end || end > self.len {
            return Err(BigFileError::OutOfBounds {
                pos: start,
                requested: end.saturating_sub(start),
                len: self.len,
            });
        }

        let mut buf = vec![0u8; (end - start) as usize];
        let mut file = self.file.lock().await;
        file.seek(SeekFrom::Start(start))
            .await
            .map_err(|e| load_failed(start, end, e))?;
        file.read_exact(&mut buf)
            .await
            .map_err(|e| load_failed(start, end, e))?;
        Ok(buf)
    }
}

fn load_failed(start: u64, end: u64, e: std::io::Error) -> BigFileError {
    BigFileError::ChunkLoadFailed {
        start,
        end,
        reason: e.to_string(),
    }
}

/// Bytes held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

impl ByteSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    async fn read_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        if start > end || end > self.len() {
            return Err(BigFileError::OutOfBounds {
                pos: start,
                requested: end.saturating_sub(start),
                len: self.len(),
            });
        }
        Ok(self.data[start as usize..end as usize].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_local_file_read_range() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"0123456789").unwrap();

        let source = LocalFileSource::open(temp_file.path()).await.unwrap();
        assert_eq!(source.len(), 10);
        assert_eq!(source.read_range(2, 5).await.unwrap(), b"234");
        assert_eq!(source.read_range(0, 0).await.unwrap(), b"");
        assert!(source.read_range(8, 11).await.is_err());
    }

    #[tokio::test]
    async fn test_local_file_missing() {
        let err = LocalFileSource::open("/definitely/not/here.bin")
            .await
            .unwrap_err();
        assert!(matches!(err, BigFileError::IoError(_)));
    }

    #[tokio::test]
    async fn test_local_file_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFileSource::open(dir.path()).await.unwrap_err();
        assert!(matches!(
            &err,
            BigFileError::IoError(e) if e.kind() == std::io::ErrorKind::InvalidInput
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[tokio::test]
    async fn test_memory_source_bounds() {
        let source = MemorySource::new("mem", vec![1, 2, 3]);
        assert_eq!(source.read_range(1, 3).await.unwrap(), vec![2, 3]);
        assert!(matches!(
            source.read_range(2, 4).await,
            Err(BigFileError::OutOfBounds { .. })
        ));
        assert!(!source.is_empty());
    }
}

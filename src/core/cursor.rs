use crate::domain::ports::ByteSource;
use crate::utils::error::{BigFileError, Result};

/// 16 MiB
pub const DEFAULT_CHUNK_SIZE: u64 = 16 * 1024 * 1024;

/// Reads a large source through one bounded in-memory window.
///
/// Reads that fall inside the loaded window are served from memory; anything
/// else reloads the window starting at the current position. A read larger
/// than the window grows it to twice the read size.
pub struct PartialLoadCursor<'a, S: ByteSource> {
    source: &'a S,
    pos: u64,
    chunk: Option<Vec<u8>>,
    chunk_start: u64,
    chunk_size: u64,
    loads: u64,
    bytes_loaded: u64,
}

impl<'a, S: ByteSource> PartialLoadCursor<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(source: &'a S, chunk_size: u64) -> Self {
        Self {
            source,
            pos: 0,
            chunk: None,
            chunk_start: 0,
            chunk_size: chunk_size.max(1),
            loads: 0,
            bytes_loaded: 0,
        }
    }

    pub fn len(&self) -> u64 {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.pos)
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Number of window loads performed so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub fn bytes_loaded(&self) -> u64 {
        self.bytes_loaded
    }

    /// Loads `[pos, min(pos + chunk_size, len))` as the current window.
    pub async fn load_chunk(&mut self) -> Result<()> {
        let start = self.pos;
        let end = start.saturating_add(self.chunk_size).min(self.len());
        self.chunk_start = start;

        match self.source.read_range(start, end).await {
            Ok(bytes) => {
                tracing::debug!("Loaded window [{}, {}) from {}", start, end, self.source.name());
                self.loads += 1;
                self.bytes_loaded += bytes.len() as u64;
                self.chunk = Some(bytes);
                Ok(())
            }
            Err(e) => {
                self.chunk = None;
                Err(match e {
                    BigFileError::ChunkLoadFailed { .. } => e,
                    other => BigFileError::ChunkLoadFailed {
                        start,
                        end,
                        reason: other.to_string(),
                    },
                })
            }
        }
    }

    /// Moves the cursor without loading. `pos == len` is allowed.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.len() {
            return Err(BigFileError::OutOfBounds {
                pos,
                requested: 0,
                len: self.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    fn window_contains(&self, pos: u64, n: u64) -> bool {
        match &self.chunk {
            Some(chunk) => pos >= self.chunk_start && pos + n <= self.chunk_start + chunk.len() as u64,
            None => false,
        }
    }

    fn check_bounds(&self, n: u64) -> Result<()> {
        match self.pos.checked_add(n) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(BigFileError::OutOfBounds {
                pos: self.pos,
                requested: n,
                len: self.len(),
            }),
        }
    }

    pub async fn next_bytes(&mut self, n: u64) -> Result<&[u8]> {
        self.check_bounds(n)?;

        if n > self.chunk_size {
            self.chunk_size = n.saturating_mul(2);
            tracing::debug!("Growing window to {} bytes for a {} byte read", self.chunk_size, n);
        }
        if !self.window_contains(self.pos, n) {
            self.load_chunk().await?;
        }

        let start = (self.pos - self.chunk_start) as usize;
        let end = start + n as usize;
        self.pos += n;

        match self.chunk.as_deref() {
            Some(chunk) => Ok(&chunk[start..end]),
            None => Err(BigFileError::ChunkLoadFailed {
                start: self.chunk_start,
                end: self.chunk_start,
                reason: "no window loaded".to_string(),
            }),
        }
    }

    pub async fn next_u32(&mut self) -> Result<u32> {
        let bytes = self.next_bytes(4).await?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(buf))
    }

    /// Seconds then nanoseconds, both u32, as total nanoseconds.
    pub async fn next_time(&mut self) -> Result<u64> {
        let secs = self.next_u32().await? as u64;
        let nanos = self.next_u32().await? as u64;
        Ok(1_000_000_000 * secs + nanos)
    }

    /// A u32 length prefix followed by that many bytes.
    pub async fn next_chunk(&mut self) -> Result<&[u8]> {
        let n = self.next_u32().await? as u64;
        self.next_bytes(n).await
    }

    /// Like `next_chunk` but steps over the payload without reading it.
    /// Returns the payload length.
    pub async fn skip_chunk(&mut self) -> Result<u64> {
        let n = self.next_u32().await? as u64;
        self.check_bounds(n)?;
        self.pos += n;
        Ok(n)
    }
}

impl<S: ByteSource> Drop for PartialLoadCursor<'_, S> {
    fn drop(&mut self) {
        tracing::debug!(
            "Dropping cursor over {}: pos {}, chunk_start {}, chunk_size {}, loads {}",
            self.source.name(),
            self.pos,
            self.chunk_start,
            self.chunk_size,
            self.loads
        );
    }
}

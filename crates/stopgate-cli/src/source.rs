//! File and stdin payload sources.
//!
//! Both stop reading one byte past the configured limit, so an oversized
//! payload is never buffered whole and still fails as `PayloadTooLarge`.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use stopgate_core::ports::PayloadSource;
use stopgate_core::SourceError;

/// Read at most `limit + 1` bytes.
async fn read_capped<R: AsyncRead + Unpin>(reader: R, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .await?;
    Ok(buf)
}

pub struct FileSource {
    path: PathBuf,
    max_bytes: usize,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }
}

#[async_trait]
impl PayloadSource for FileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let read = async {
            let file = tokio::fs::File::open(&self.path).await?;
            read_capped(file, self.max_bytes).await
        };
        read.await.map_err(|e| {
            SourceError::with_source(format!("failed to read {}", self.path.display()), e)
        })
    }
}

pub struct StdinSource {
    max_bytes: usize,
}

impl StdinSource {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

#[async_trait]
impl PayloadSource for StdinSource {
    fn describe(&self) -> String {
        "stdin".to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        read_capped(tokio::io::stdin(), self.max_bytes)
            .await
            .map_err(|e| SourceError::with_source("failed to read stdin", e))
    }
}

//! StaticSource - メモリ上のペイロードを返す PayloadSource
//!
//! テストや、ペイロードをすでに手元に持っている呼び出し側向け。

use async_trait::async_trait;

use crate::domain::errors::SourceError;
use crate::ports::PayloadSource;

#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    payload: Vec<u8>,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl PayloadSource for StaticSource {
    fn describe(&self) -> String {
        format!("static:{}", self.label)
    }

    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.payload.clone())
    }
}

//! PayloadSource port - 生のペイロードを取得する外部コラボレータ
//!
//! モデル呼び出しやファイル読み込みなど、バイト列の入手方法はこの crate の関心外です。
//! trait はその境界に名前を付けるだけで、リトライやタイムアウトは実装側の責務です。

use async_trait::async_trait;

use crate::domain::errors::SourceError;

/// PayloadSource は 1 件のレスポンスペイロードを返す
///
/// # 使用例
/// ```ignore
/// struct ModelSource { client: Client }
///
/// #[async_trait]
/// impl PayloadSource for ModelSource {
///     fn describe(&self) -> String { "model:termination-check".into() }
///     async fn fetch(&self) -> Result<Vec<u8>, SourceError> { ... }
/// }
/// ```
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Short label used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;
}

//! Typed - 型付きレスポンス API
//!
//! モデルが返す JSON を型で受け取り、必須フィールドの欠落や型違いを
//! 境界で `DecisionError` として弾きます。
//!
//! # 構成
//! - **response**: `StructuredResponse` trait と wire フィールドテーブル
//! - **codec**: `PayloadCodec`（検証付きデコード / エンコード）
//! - **extract**: 自由文からの JSON オブジェクト抽出

pub mod response;
pub mod codec;
pub mod extract;

// 主要な trait/型 を再エクスポート
pub use self::response::{FieldKind, FieldSpec, StructuredResponse};
pub use self::codec::{DecodeOptions, Extraction, PayloadCodec, DEFAULT_MAX_PAYLOAD_BYTES};
pub use self::extract::extract_json_object;

//! StructuredResponse trait - モデル出力の型付き契約
//!
//! # ポイント
//! - Associated Constants (`const NAME`, `const FIELDS`)
//! - wire 上のキー名は `FIELDS` テーブルで明示し、Rust のフィールド名とは切り離す

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Primitive JSON type a required field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    String,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Bool => "boolean",
            FieldKind::String => "string",
        }
    }

    /// `null` never matches: a required field cannot be nulled out.
    pub fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            FieldKind::Bool => value.is_boolean(),
            FieldKind::String => value.is_string(),
        }
    }
}

/// One row of the wire mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub wire_name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(wire_name: &'static str, kind: FieldKind) -> Self {
        Self { wire_name, kind }
    }
}

/// StructuredResponse はモデルが返す JSON オブジェクトの形を宣言する
///
/// # 使用例
/// ```ignore
/// impl StructuredResponse for MyResponse {
///     const NAME: &'static str = "my_response";
///     const FIELDS: &'static [FieldSpec] = &[FieldSpec::new("done", FieldKind::Bool)];
/// }
/// ```
///
/// `FIELDS` に並んだフィールドはすべて必須。未知のキーは無視される。
pub trait StructuredResponse: Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAME: &'static str;

    const FIELDS: &'static [FieldSpec];
}

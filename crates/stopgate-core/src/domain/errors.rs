//! Errors - デコード失敗の分類
//!
//! 不正なペイロードはすべて `ErrorKind::MalformedTerminationPayload` に分類されます。
//! variant は「どのフィールドが、なぜ」を区別するためのもので、
//! 呼び出し側から見た振る舞い（失敗として返る）は変わりません。

use thiserror::Error;

/// ErrorKind はエラーの運用分類
///
/// - MalformedTerminationPayload: ペイロード自体が契約を満たしていない
/// - Source: ペイロードの取得に失敗した（外部コラボレータ側の問題）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedTerminationPayload,
    Source,
}

/// Failure reported by a `PayloadSource` while obtaining raw bytes.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SourceError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` must be a {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("payload source failed: {0}")]
    Source(#[from] SourceError),
}

impl DecisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecisionError::Source(_) => ErrorKind::Source,
            _ => ErrorKind::MalformedTerminationPayload,
        }
    }

    /// The wire key the failure refers to, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecisionError::MissingField { field } | DecisionError::WrongType { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::MalformedTerminationPayload
    }
}

/// Name of a JSON value's type as it appears in error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_errors_are_malformed_payloads() {
        let missing = DecisionError::MissingField {
            field: "should_terminate",
        };
        assert_eq!(missing.kind(), ErrorKind::MalformedTerminationPayload);
        assert_eq!(missing.field(), Some("should_terminate"));

        let wrong = DecisionError::WrongType {
            field: "termination_reason",
            expected: "string",
            found: "number",
        };
        assert!(wrong.is_malformed());
        assert_eq!(
            wrong.to_string(),
            "field `termination_reason` must be a string, found number"
        );
    }

    #[test]
    fn source_errors_are_not_malformed() {
        let err = DecisionError::from(SourceError::new("stdin closed"));
        assert_eq!(err.kind(), ErrorKind::Source);
        assert!(!err.is_malformed());
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("stdin closed"));
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}

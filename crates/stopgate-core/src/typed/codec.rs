//! PayloadCodec - モデル出力と StructuredResponse の相互変換
//!
//! # デコードフロー
//! 1. サイズ上限のチェック
//! 2. (Lenient のみ) 自由文から JSON オブジェクトを抽出
//! 3. serde_json で Value にパース
//! 4. `FIELDS` テーブルで必須フィールドと型を検証
//! 5. serde で T に変換
//!
//! 検証に通らない場合は部分的な値を返さず、必ず `DecisionError` を返します。

use serde_json::Value;

use super::extract::extract_json_object;
use super::response::StructuredResponse;
use crate::domain::errors::{DecisionError, json_type_name};

/// Default cap on raw payload size.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// How the payload text is located before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extraction {
    /// The payload must be exactly one JSON value.
    #[default]
    Strict,
    /// The payload may be model prose containing a JSON object.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub extraction: Extraction,
    pub max_payload_bytes: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            extraction: Extraction::Strict,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl DecodeOptions {
    pub fn lenient() -> Self {
        Self {
            extraction: Extraction::Lenient,
            ..Self::default()
        }
    }

    pub fn with_max_payload_bytes(mut self, limit: usize) -> Self {
        self.max_payload_bytes = limit;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayloadCodec {
    options: DecodeOptions,
}

impl PayloadCodec {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode_slice<T: StructuredResponse>(&self, bytes: &[u8]) -> Result<T, DecisionError> {
        self.check_size(bytes.len())?;
        let text = std::str::from_utf8(bytes)
            .map_err(|e| DecisionError::InvalidJson(format!("payload is not UTF-8: {e}")))?;
        self.decode_text(text)
    }

    pub fn decode_str<T: StructuredResponse>(&self, text: &str) -> Result<T, DecisionError> {
        self.check_size(text.len())?;
        self.decode_text(text)
    }

    /// Decode an already-parsed payload. Size and extraction options do not apply.
    pub fn decode_value<T: StructuredResponse>(&self, value: Value) -> Result<T, DecisionError> {
        validate_fields::<T>(&value)?;
        serde_json::from_value(value).map_err(|e| DecisionError::InvalidJson(e.to_string()))
    }

    /// Wire form of a response. Only the declared fields are emitted.
    pub fn encode<T: StructuredResponse>(&self, response: &T) -> serde_json::Result<String> {
        serde_json::to_string(response)
    }

    fn decode_text<T: StructuredResponse>(&self, text: &str) -> Result<T, DecisionError> {
        let json = match self.options.extraction {
            Extraction::Strict => text,
            Extraction::Lenient => extract_json_object(text).ok_or(DecisionError::NoJsonObject)?,
        };
        let value: Value =
            serde_json::from_str(json).map_err(|e| DecisionError::InvalidJson(e.to_string()))?;
        self.decode_value(value)
    }

    fn check_size(&self, size: usize) -> Result<(), DecisionError> {
        let limit = self.options.max_payload_bytes;
        if size > limit {
            return Err(DecisionError::PayloadTooLarge { size, limit });
        }
        Ok(())
    }
}

/// Check every declared field is present with the declared primitive type.
fn validate_fields<T: StructuredResponse>(value: &Value) -> Result<(), DecisionError> {
    let object = value.as_object().ok_or(DecisionError::NotAnObject {
        found: json_type_name(value),
    })?;

    for spec in T::FIELDS {
        let field = object
            .get(spec.wire_name)
            .ok_or(DecisionError::MissingField {
                field: spec.wire_name,
            })?;
        if !spec.kind.matches(field) {
            return Err(DecisionError::WrongType {
                field: spec.wire_name,
                expected: spec.kind.name(),
                found: json_type_name(field),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::TerminationDecision;
    use crate::domain::errors::ErrorKind;
    use rstest::rstest;
    use serde_json::json;

    fn strict() -> PayloadCodec {
        PayloadCodec::default()
    }

    #[rstest]
    #[case(r#"{"should_terminate": true, "termination_reason": "goal achieved"}"#, true, "goal achieved")]
    #[case(r#"{"should_terminate": false, "termination_reason": ""}"#, false, "")]
    #[case(r#"{"should_terminate": true, "termination_reason": "ok", "extra_field": 123}"#, true, "ok")]
    #[case(r#"{"termination_reason": "order does not matter", "should_terminate": false}"#, false, "order does not matter")]
    fn decodes_valid_payloads(#[case] input: &str, #[case] flag: bool, #[case] reason: &str) {
        let d: TerminationDecision = strict().decode_str(input).unwrap();
        assert_eq!(d.should_terminate(), flag);
        assert_eq!(d.termination_reason(), reason);
    }

    #[rstest]
    #[case(r#"{"termination_reason": "missing flag"}"#, "should_terminate")]
    #[case(r#"{"should_terminate": true}"#, "termination_reason")]
    #[case(r#"{"should_terminate": "yes", "termination_reason": "bad type"}"#, "should_terminate")]
    #[case(r#"{"should_terminate": "true", "termination_reason": "quoted bool"}"#, "should_terminate")]
    #[case(r#"{"should_terminate": true, "termination_reason": 42}"#, "termination_reason")]
    #[case(r#"{"should_terminate": true, "termination_reason": null}"#, "termination_reason")]
    #[case(r#"{"should_terminate": null, "termination_reason": "x"}"#, "should_terminate")]
    fn rejects_malformed_fields(#[case] input: &str, #[case] field: &str) {
        let err = strict().decode_str::<TerminationDecision>(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedTerminationPayload);
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn missing_and_wrong_type_are_distinguished() {
        let missing = strict()
            .decode_str::<TerminationDecision>(r#"{"termination_reason": "x"}"#)
            .unwrap_err();
        assert!(matches!(missing, DecisionError::MissingField { .. }));

        let wrong = strict()
            .decode_str::<TerminationDecision>(r#"{"should_terminate": 1, "termination_reason": "x"}"#)
            .unwrap_err();
        assert!(matches!(
            wrong,
            DecisionError::WrongType {
                expected: "boolean",
                found: "number",
                ..
            }
        ));
    }

    #[rstest]
    #[case("[true, \"x\"]", "array")]
    #[case("\"done\"", "string")]
    #[case("null", "null")]
    fn rejects_non_objects(#[case] input: &str, #[case] found: &str) {
        let err = strict().decode_str::<TerminationDecision>(input).unwrap_err();
        match err {
            DecisionError::NotAnObject { found: f } => assert_eq!(f, found),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_rejects_prose() {
        let input = "Sure! {\"should_terminate\": true, \"termination_reason\": \"x\"}";
        let err = strict().decode_str::<TerminationDecision>(input).unwrap_err();
        assert!(matches!(err, DecisionError::InvalidJson(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn lenient_reads_fenced_model_output() {
        let codec = PayloadCodec::new(DecodeOptions::lenient());
        let input = "Here is my verdict:\n```json\n{\"should_terminate\": true, \"termination_reason\": \"recipe approved\"}\n```";
        let d: TerminationDecision = codec.decode_str(input).unwrap();
        assert_eq!(d, TerminationDecision::terminate("recipe approved"));
    }

    #[test]
    fn lenient_ignores_prose_after_object() {
        let codec = PayloadCodec::new(DecodeOptions::lenient());
        let input = "{\"should_terminate\": true, \"termination_reason\": \"done\"}\nLet me know if you need anything else.";
        let d: TerminationDecision = codec.decode_str(input).unwrap();
        assert_eq!(d, TerminationDecision::terminate("done"));

        let err = strict().decode_str::<TerminationDecision>(input).unwrap_err();
        assert!(matches!(err, DecisionError::InvalidJson(_)));
    }

    #[test]
    fn lenient_without_object_fails() {
        let codec = PayloadCodec::new(DecodeOptions::lenient());
        let err = codec
            .decode_str::<TerminationDecision>("I cannot decide.")
            .unwrap_err();
        assert!(matches!(err, DecisionError::NoJsonObject));
        assert!(err.is_malformed());
    }

    #[test]
    fn oversized_payload_is_rejected_before_parsing() {
        let codec = PayloadCodec::new(DecodeOptions::default().with_max_payload_bytes(8));
        let err = codec
            .decode_slice::<TerminationDecision>(b"{\"should_terminate\": true}")
            .unwrap_err();
        assert!(matches!(err, DecisionError::PayloadTooLarge { limit: 8, .. }));
    }

    #[test]
    fn non_utf8_bytes_are_invalid_json() {
        let err = strict()
            .decode_slice::<TerminationDecision>(&[0x7b, 0xff, 0x7d])
            .unwrap_err();
        assert!(matches!(err, DecisionError::InvalidJson(_)));
    }

    #[test]
    fn decode_value_validates_fields() {
        let d: TerminationDecision = strict()
            .decode_value(json!({"should_terminate": false, "termination_reason": "keep going"}))
            .unwrap();
        assert_eq!(d, TerminationDecision::proceed("keep going"));

        let err = strict()
            .decode_value::<TerminationDecision>(json!({"should_terminate": false}))
            .unwrap_err();
        assert_eq!(err.field(), Some("termination_reason"));
    }

    #[test]
    fn encode_then_decode_preserves_fields() {
        let codec = strict();
        for original in [
            TerminationDecision::terminate("goal achieved"),
            TerminationDecision::proceed(""),
            TerminationDecision::terminate("quotes \" and unicode ✓"),
        ] {
            let wire = codec.encode(&original).unwrap();
            let back: TerminationDecision = codec.decode_str(&wire).unwrap();
            assert_eq!(back, original);
        }
    }

    #[test]
    fn encode_drops_unknown_fields() {
        let codec = strict();
        let d: TerminationDecision = codec
            .decode_str(r#"{"should_terminate": true, "termination_reason": "ok", "extra_field": 123}"#)
            .unwrap();
        let v: Value = serde_json::from_str(&codec.encode(&d).unwrap()).unwrap();
        assert!(v.get("extra_field").is_none());
    }
}

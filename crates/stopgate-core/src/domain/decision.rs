//! Termination decision: whether an agent's turn-taking loop should stop.
//!
//! The value is produced elsewhere (typically by a model-backed step) and
//! decoded at the boundary by `typed::PayloadCodec`. Once a
//! `TerminationDecision` exists, both fields are present and well-typed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DecisionError;
use crate::typed::{FieldKind, FieldSpec, PayloadCodec, StructuredResponse};

/// Wire key of the termination flag.
pub const SHOULD_TERMINATE: &str = "should_terminate";

/// Wire key of the human-readable reason.
pub const TERMINATION_REASON: &str = "termination_reason";

/// One termination judgment.
///
/// Fields are private and there are no mutators: a different reason means a
/// new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminationDecision {
    #[serde(rename = "should_terminate")]
    terminate: bool,

    #[serde(rename = "termination_reason")]
    reason: String,
}

impl TerminationDecision {
    pub fn new(should_terminate: bool, termination_reason: impl Into<String>) -> Self {
        Self {
            terminate: should_terminate,
            reason: termination_reason.into(),
        }
    }

    pub fn terminate(reason: impl Into<String>) -> Self {
        Self::new(true, reason)
    }

    pub fn proceed(reason: impl Into<String>) -> Self {
        Self::new(false, reason)
    }

    pub fn should_terminate(&self) -> bool {
        self.terminate
    }

    pub fn termination_reason(&self) -> &str {
        &self.reason
    }

    pub fn into_parts(self) -> (bool, String) {
        (self.terminate, self.reason)
    }
}

impl StructuredResponse for TerminationDecision {
    const NAME: &'static str = "termination_decision";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(SHOULD_TERMINATE, FieldKind::Bool),
        FieldSpec::new(TERMINATION_REASON, FieldKind::String),
    ];
}

/// Strict decode of a wire payload with default limits.
impl FromStr for TerminationDecision {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayloadCodec::default().decode_str(s)
    }
}

impl TryFrom<serde_json::Value> for TerminationDecision {
    type Error = DecisionError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        PayloadCodec::default().decode_value(value)
    }
}

impl fmt::Display for TerminationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.terminate { "terminate" } else { "continue" };
        if self.reason.is_empty() {
            write!(f, "{verdict}")
        } else {
            write!(f, "{verdict}: {}", self.reason)
        }
    }
}

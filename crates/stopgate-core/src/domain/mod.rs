//! Domain model: the termination decision and its errors.

pub mod decision;
pub mod errors;

pub use self::decision::{SHOULD_TERMINATE, TERMINATION_REASON, TerminationDecision};
pub use self::errors::{DecisionError, ErrorKind, SourceError};

//! stopgate-core
//!
//! Decoding and validation of agent termination decisions returned by a
//! model-backed step.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TerminationDecision, errors）
//! - **typed**: 型付きレスポンス API（StructuredResponse, PayloadCodec, extract）
//! - **ports**: 抽象化レイヤー（PayloadSource）
//! - **impls**: 実装（StaticSource）
//! - **app**: アプリケーションロジック（DecisionReader）

pub mod domain;
pub mod typed;
pub mod ports;
pub mod impls;
pub mod app;

pub use domain::{DecisionError, ErrorKind, SourceError, TerminationDecision};
pub use typed::{DecodeOptions, Extraction, PayloadCodec};

//! Ports - 抽象化レイヤー
//!
//! 外部システムとの境界を trait として定義します。

pub mod payload_source;

pub use self::payload_source::PayloadSource;

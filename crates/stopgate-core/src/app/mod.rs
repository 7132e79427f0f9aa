//! App - アプリケーション層
//!
//! ports と typed を組み合わせて、ペイロードの取得からデコードまでをまとめます。

pub mod reader;

pub use self::reader::DecisionReader;

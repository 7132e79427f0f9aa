//! Impls - ports の実装

pub mod static_source;

pub use self::static_source::StaticSource;

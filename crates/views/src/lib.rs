//! Sequence adapters emitting one top-N snapshot per consumed element.

pub mod scan;
pub mod stream;

pub use scan::{TopNScan, TopNScanExt, TryTopNScan};
pub use stream::TopNStream;

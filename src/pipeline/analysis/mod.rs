//! Value-analysis and medical-term-extraction engine.
//!
//! Pattern-driven entity extraction from cleaned report text plus
//! reference-range classification. Everything here is deterministic and
//! synchronous; the catalogues are built once and read-only afterwards.

pub mod catalogue;
pub mod classify;
pub mod gender;
pub mod ranges;
pub mod terms;
pub mod units;

pub use catalogue::*;
pub use classify::*;
pub use gender::*;
pub use ranges::*;
pub use terms::*;
pub use units::*;

//! Traits at the seams between crates.

pub mod clock;
pub mod storage;

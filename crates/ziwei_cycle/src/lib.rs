//! Sexagenary-cycle primitives for ZiWei charts.
//!
//! This crate provides:
//! - The 10 heavenly stems ([`Sky`]) and 12 earthly branches ([`Ground`])
//! - Lunar-year stem/branch pairs
//! - [`CyclicIndex`], a ring position with wrapping relative shifts

pub mod cyclic;
pub mod stem_branch;

pub use cyclic::CyclicIndex;
pub use stem_branch::{
    ALL_GROUNDS, ALL_SKIES, Ground, SEXAGENARY_EPOCH_YEAR, Sky, cycle_order, year_pair,
};

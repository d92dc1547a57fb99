//! Cyclical index with relative shifts.
//!
//! A chart's "start control" is a position on the 12-palace ring that is
//! walked forward or backward by whole steps. Shifts wrap in both
//! directions, so `shift(-1)` from 0 lands on `modulus - 1`.

use std::fmt::{Display, Formatter};

use crate::stem_branch::Ground;

/// Position on a ring of `modulus` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CyclicIndex {
    index: u8,
    modulus: u8,
}

impl CyclicIndex {
    /// Create an index, wrapping `index` into `0..modulus`.
    ///
    /// Returns `None` for a zero modulus.
    pub const fn new(index: u8, modulus: u8) -> Option<Self> {
        if modulus == 0 {
            return None;
        }
        Some(Self {
            index: index % modulus,
            modulus,
        })
    }

    /// Index on the 12-slot palace ring.
    pub const fn twelve(index: u8) -> Self {
        Self {
            index: index % 12,
            modulus: 12,
        }
    }

    pub const fn index(self) -> u8 {
        self.index
    }

    pub const fn modulus(self) -> u8 {
        self.modulus
    }

    /// Move `steps` positions around the ring (negative steps go backward).
    pub fn shift(self, steps: i32) -> Self {
        let modulus = i64::from(self.modulus);
        let index = (i64::from(self.index) + i64::from(steps)).rem_euclid(modulus) as u8;
        Self {
            index,
            modulus: self.modulus,
        }
    }

    /// Move `steps` positions forward. Unlike [`CyclicIndex::shift`] this
    /// accepts any `u32` without overflow.
    pub fn advance(self, steps: u32) -> Self {
        let steps = (steps % u32::from(self.modulus)) as u8;
        let index = ((u16::from(self.index) + u16::from(steps)) % u16::from(self.modulus)) as u8;
        Self {
            index,
            modulus: self.modulus,
        }
    }

    /// Branch at this position when the ring is the 12 branches.
    pub const fn ground(self) -> Option<Ground> {
        if self.modulus == 12 {
            Some(Ground::from_index(self.index))
        } else {
            None
        }
    }
}

impl Display for CyclicIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.index, self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_modulus_rejected() {
        assert!(CyclicIndex::new(3, 0).is_none());
    }

    #[test]
    fn new_wraps() {
        let c = CyclicIndex::new(14, 12).unwrap();
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn shift_forward_wraps() {
        let c = CyclicIndex::twelve(10).shift(5);
        assert_eq!(c.index(), 3);
        assert_eq!(c.modulus(), 12);
    }

    #[test]
    fn shift_backward_wraps() {
        assert_eq!(CyclicIndex::twelve(0).shift(-1).index(), 11);
        assert_eq!(CyclicIndex::twelve(2).shift(-27).index(), 11);
    }

    #[test]
    fn chained_shifts_compose() {
        let start = CyclicIndex::twelve(7);
        assert_eq!(start.shift(4).shift(2), start.shift(6));
    }

    #[test]
    fn advance_matches_shift() {
        let start = CyclicIndex::twelve(9);
        for steps in 0..30u32 {
            assert_eq!(start.advance(steps), start.shift(steps as i32));
        }
        assert_eq!(start.advance(u32::MAX).index(), (9 + u32::MAX % 12) as u8 % 12);
    }

    #[test]
    fn ground_only_on_twelve_ring() {
        assert_eq!(CyclicIndex::twelve(2).ground(), Some(Ground::Yin));
        assert_eq!(CyclicIndex::new(2, 10).unwrap().ground(), None);
    }

    #[test]
    fn display_format() {
        assert_eq!(CyclicIndex::twelve(5).to_string(), "5/12");
    }
}

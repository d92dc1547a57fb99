//! Fixed visual grid of the destiny board.
//!
//! The board is a 4×4 square. The 12 outer squares hold palace cells and the
//! 2×2 centre holds the summary panel:
//!
//! ```text
//! [ 5][ 6][ 7][ 8]
//! [ 4][ summary][ 9]
//! [ 3][        ][10]
//! [ 2][ 1][ 0][11]
//! ```
//!
//! The mapping is keyed by ring index only. Which palace a cell represents
//! never moves it.

use crate::chart::CELL_COUNT;

/// Region of the board a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridRegion {
    TopRow,
    LeftColumn,
    RightColumn,
    BottomRow,
}

impl GridRegion {
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopRow => "top-row",
            Self::LeftColumn => "left-col",
            Self::RightColumn => "right-col",
            Self::BottomRow => "bottom-row",
        }
    }
}

/// Visual position of a cell: region plus 0-based position inside it
/// (left to right for rows, top to bottom for columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSlot {
    pub region: GridRegion,
    pub position: u8,
}

impl GridSlot {
    const fn new(region: GridRegion, position: u8) -> Self {
        Self { region, position }
    }

    /// (row, column) on the 4×4 square.
    pub const fn coordinates(self) -> (u8, u8) {
        match self.region {
            GridRegion::TopRow => (0, self.position),
            GridRegion::LeftColumn => (1 + self.position, 0),
            GridRegion::RightColumn => (1 + self.position, 3),
            GridRegion::BottomRow => (3, self.position),
        }
    }
}

/// Cell indices along the top row, left to right.
pub const TOP_ROW: [u8; 4] = [5, 6, 7, 8];
/// Cell indices down the left column.
pub const LEFT_COLUMN: [u8; 2] = [4, 3];
/// Cell indices down the right column.
pub const RIGHT_COLUMN: [u8; 2] = [9, 10];
/// Cell indices along the bottom row, left to right.
pub const BOTTOM_ROW: [u8; 4] = [2, 1, 0, 11];

/// Grid slot of every cell, indexed by cell index.
pub const BOARD_LAYOUT: [GridSlot; CELL_COUNT] = [
    GridSlot::new(GridRegion::BottomRow, 2),
    GridSlot::new(GridRegion::BottomRow, 1),
    GridSlot::new(GridRegion::BottomRow, 0),
    GridSlot::new(GridRegion::LeftColumn, 1),
    GridSlot::new(GridRegion::LeftColumn, 0),
    GridSlot::new(GridRegion::TopRow, 0),
    GridSlot::new(GridRegion::TopRow, 1),
    GridSlot::new(GridRegion::TopRow, 2),
    GridSlot::new(GridRegion::TopRow, 3),
    GridSlot::new(GridRegion::RightColumn, 0),
    GridSlot::new(GridRegion::RightColumn, 1),
    GridSlot::new(GridRegion::BottomRow, 3),
];

/// Slot for a cell index, or `None` outside 0..=11.
pub fn slot_of(index: u8) -> Option<GridSlot> {
    BOARD_LAYOUT.get(usize::from(index)).copied()
}

/// Cell indices of a region in visual order.
pub const fn region_indices(region: GridRegion) -> &'static [u8] {
    match region {
        GridRegion::TopRow => &TOP_ROW,
        GridRegion::LeftColumn => &LEFT_COLUMN,
        GridRegion::RightColumn => &RIGHT_COLUMN,
        GridRegion::BottomRow => &BOTTOM_ROW,
    }
}

/// Cell index at a (row, column) of the 4×4 square; `None` for the centre.
pub fn index_at(row: u8, column: u8) -> Option<u8> {
    BOARD_LAYOUT
        .iter()
        .position(|slot| slot.coordinates() == (row, column))
        .map(|i| i as u8)
}

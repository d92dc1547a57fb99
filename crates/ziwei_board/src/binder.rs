//! Binding natal cells onto the board grid.
//!
//! Binding is positional: cell `i` of the chart goes to
//! [`BOARD_LAYOUT`]`[i]`. Each binding carries everything a cell renderer
//! needs: the cell, the whole chart for cross-cell lookups, the runtime
//! overlay (if any) and the display scope.

use crate::chart::{CELL_COUNT, Cell, DestinyChart, RuntimeContext};
use crate::error::LayoutError;
use crate::layout::{BOARD_LAYOUT, BOTTOM_ROW, GridSlot, LEFT_COLUMN, RIGHT_COLUMN, TOP_ROW};
use crate::selection::DEFAULT_SCOPE;
use crate::summary::SummaryPanel;

/// One cell as handed to a renderer.
#[derive(Debug)]
pub struct CellBinding<'a, B: ?Sized> {
    pub slot: GridSlot,
    pub cell: &'a Cell,
    pub chart: &'a B,
    /// `None` means natal-only rendering.
    pub runtime: Option<&'a RuntimeContext>,
    pub scope: u32,
}

// Manual impls: deriving would require `B: Clone`.
impl<B: ?Sized> Clone for CellBinding<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for CellBinding<'_, B> {}

/// Renderer seam for a single cell.
pub trait CellRenderer<B: ?Sized> {
    type Output;

    fn render(&self, binding: &CellBinding<'_, B>) -> Self::Output;
}

/// All 12 cell bindings plus the centre summary panel.
#[derive(Debug)]
pub struct BoardBinding<'a, B: ?Sized> {
    top: [CellBinding<'a, B>; 4],
    left: [CellBinding<'a, B>; 2],
    right: [CellBinding<'a, B>; 2],
    bottom: [CellBinding<'a, B>; 4],
    center: SummaryPanel,
}

impl<'a, B: ?Sized> BoardBinding<'a, B> {
    pub fn top(&self) -> &[CellBinding<'a, B>; 4] {
        &self.top
    }

    pub fn left(&self) -> &[CellBinding<'a, B>; 2] {
        &self.left
    }

    pub fn right(&self) -> &[CellBinding<'a, B>; 2] {
        &self.right
    }

    pub fn bottom(&self) -> &[CellBinding<'a, B>; 4] {
        &self.bottom
    }

    pub fn center(&self) -> &SummaryPanel {
        &self.center
    }

    /// All 12 bindings in reading order: top row, then the side columns row
    /// by row, then the bottom row.
    pub fn cells(&self) -> impl Iterator<Item = &CellBinding<'a, B>> {
        self.top
            .iter()
            .chain([&self.left[0], &self.right[0], &self.left[1], &self.right[1]])
            .chain(self.bottom.iter())
    }

    /// Binding of the cell with ring index `index`.
    pub fn binding(&self, index: u8) -> Option<&CellBinding<'a, B>> {
        self.cells().find(|b| b.cell.index == index)
    }

    pub fn slot_of(&self, index: u8) -> Option<GridSlot> {
        self.binding(index).map(|b| b.slot)
    }

    /// The 4×4 square, `None` in the four centre squares.
    pub fn grid(&self) -> [[Option<&CellBinding<'a, B>>; 4]; 4] {
        let mut grid = [[None; 4]; 4];
        for binding in self.cells() {
            let (row, col) = binding.slot.coordinates();
            grid[usize::from(row)][usize::from(col)] = Some(binding);
        }
        grid
    }

    /// Render every cell, in reading order.
    pub fn render_with<R: CellRenderer<B>>(&self, renderer: &R) -> Vec<(GridSlot, R::Output)> {
        self.cells()
            .map(|b| (b.slot, renderer.render(b)))
            .collect()
    }
}

/// Maps a chart's natal cells onto the fixed board grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardLayoutBinder;

impl BoardLayoutBinder {
    /// Bind the chart's own cells.
    pub fn bind<'a, B: DestinyChart + ?Sized>(
        chart: &'a B,
        runtime: Option<&'a RuntimeContext>,
        scope: Option<u32>,
    ) -> Result<BoardBinding<'a, B>, LayoutError> {
        Self::bind_cells(chart.cells(), chart, runtime, scope)
    }

    /// Bind an explicit cell sequence.
    ///
    /// `cells` must hold exactly 12 entries with `cells[i].index == i`.
    /// The runtime overlay is passed through unchecked.
    pub fn bind_cells<'a, B: DestinyChart + ?Sized>(
        cells: &'a [Cell],
        chart: &'a B,
        runtime: Option<&'a RuntimeContext>,
        scope: Option<u32>,
    ) -> Result<BoardBinding<'a, B>, LayoutError> {
        if cells.len() != CELL_COUNT {
            return Err(LayoutError::CellCount { found: cells.len() });
        }
        for (position, cell) in cells.iter().enumerate() {
            if usize::from(cell.index) != position {
                return Err(LayoutError::CellOrder {
                    position,
                    index: cell.index,
                });
            }
        }

        let scope = scope.unwrap_or(DEFAULT_SCOPE);
        let bind_one = move |index: u8| CellBinding {
            slot: BOARD_LAYOUT[usize::from(index)],
            cell: &cells[usize::from(index)],
            chart,
            runtime,
            scope,
        };

        Ok(BoardBinding {
            top: TOP_ROW.map(bind_one),
            left: LEFT_COLUMN.map(bind_one),
            right: RIGHT_COLUMN.map(bind_one),
            bottom: BOTTOM_ROW.map(bind_one),
            center: SummaryPanel::compose(chart),
        })
    }
}

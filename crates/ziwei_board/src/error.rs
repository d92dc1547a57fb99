//! Error types for chart handling and layout binding.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ziwei_calendar::CalendarError;

/// Errors reported by a chart engine or chart handle.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// The natal configuration is rejected before chart construction.
    InvalidConfig(&'static str),
    /// The engine cannot produce data for the requested input.
    Unsupported(String),
    /// A chart snapshot could not be read or parsed.
    Snapshot(String),
    /// Calendar lookup failed inside the engine.
    Calendar(CalendarError),
    /// The chart's cells cannot be bound onto the board.
    Layout(LayoutError),
    /// Any other engine failure.
    Internal(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
            Self::Snapshot(msg) => write!(f, "snapshot error: {msg}"),
            Self::Calendar(e) => write!(f, "calendar error: {e}"),
            Self::Layout(e) => write!(f, "layout error: {e}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl Error for ChartError {}

impl From<CalendarError> for ChartError {
    fn from(e: CalendarError) -> Self {
        Self::Calendar(e)
    }
}

impl From<LayoutError> for ChartError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        Self::Snapshot(e.to_string())
    }
}

impl From<std::io::Error> for ChartError {
    fn from(e: std::io::Error) -> Self {
        Self::Snapshot(e.to_string())
    }
}

/// Errors from binding cells onto the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    /// The chart did not supply exactly 12 cells.
    CellCount { found: usize },
    /// Cell at `position` carries a different `index`.
    CellOrder { position: usize, index: u8 },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CellCount { found } => write!(f, "expected 12 cells, found {found}"),
            Self::CellOrder { position, index } => {
                write!(f, "cell at position {position} has index {index}")
            }
        }
    }
}

impl Error for LayoutError {}

//! Destiny board assembly for ZiWei charts.
//!
//! This crate provides:
//! - [`RuntimeContextResolver`]: turns a solar or lunar date selection into
//!   the transiting overlay of a chart, or a typed "unavailable" outcome
//! - [`BoardLayoutBinder`]: places the 12 natal cells on the fixed 4×4 grid
//!   and composes the centre [`SummaryPanel`]
//! - [`BoardSession`]: memoizes the chart and the overlay between renders
//! - [`ChartSnapshot`]: JSON-backed charts for engines computed elsewhere
//!
//! Chart construction itself sits behind the [`ChartEngine`] and
//! [`DestinyChart`] traits.

pub mod binder;
pub mod chart;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod summary;

pub use binder::{BoardBinding, BoardLayoutBinder, CellBinding, CellRenderer};
pub use chart::{CELL_COUNT, Cell, ChartEngine, DestinyChart, RuntimeContext};
pub use config::{ALL_CONFIG_TYPES, ConfigType, DestinyConfig, Gender};
pub use diagnostics::{Diagnostic, DiagnosticSink, LOG_TARGET, LogSink, NullSink, RecordingSink};
pub use error::{ChartError, LayoutError};
pub use layout::{
    BOARD_LAYOUT, BOTTOM_ROW, GridRegion, GridSlot, LEFT_COLUMN, RIGHT_COLUMN, TOP_ROW, index_at,
    region_indices, slot_of,
};
pub use runtime::{RuntimeContextResolver, Unavailable, UnavailableReason, transit_start_index};
pub use selection::{CalendarType, DEFAULT_SCOPE, DateDescriptor, DateSelection};
pub use session::{BoardSession, BoardView, SessionStats};
pub use snapshot::{ChartSnapshot, SnapshotChart, SnapshotEngine};
pub use summary::{LEAP_MARKER, SummaryPanel};

//! Diagnostic events emitted during runtime resolution.
//!
//! Resolution is otherwise a pure function, so anything worth telling an
//! operator goes through an injected [`DiagnosticSink`]. [`LogSink`]
//! forwards to the `log` facade; [`RecordingSink`] keeps events in memory.

use std::cell::RefCell;

use ziwei_calendar::LunarDate;
use ziwei_cycle::{CyclicIndex, Ground};

use crate::runtime::UnavailableReason;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "ziwei_board::runtime";

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A runtime overlay was produced.
    RuntimeResolved {
        lunar: LunarDate,
        year_ground: Ground,
        /// Start control shifted by the year branch and then by `month - 1`.
        transit_start_index: CyclicIndex,
    },
    /// Resolution gave up.
    Unavailable {
        reason: UnavailableReason,
        detail: String,
    },
}

/// Receiver for diagnostic events.
pub trait DiagnosticSink {
    fn record(&self, event: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, event: &Diagnostic) {
        (**self).record(event)
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _event: &Diagnostic) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: &Diagnostic) {
        match event {
            Diagnostic::RuntimeResolved {
                lunar,
                year_ground,
                transit_start_index,
            } => log::debug!(
                target: LOG_TARGET,
                "runtime context resolved: lunar={lunar} year_ground={} transit_start_index={}",
                year_ground.display_name(),
                transit_start_index.index()
            ),
            Diagnostic::Unavailable { reason, detail } => log::warn!(
                target: LOG_TARGET,
                "runtime context unavailable: reason={reason} detail={detail}"
            ),
        }
    }
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Remove and return the recorded events.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &Diagnostic) {
        self.events.borrow_mut().push(event.clone());
    }
}

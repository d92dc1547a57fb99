//! Runtime (transiting) context resolution.
//!
//! Turns a user's date selection into the overlay a chart shows on top of
//! its natal cells. The selection is normalised to a lunar date, checked for
//! completeness, and handed to the chart handle. Every failure becomes an
//! [`Unavailable`] value; nothing escapes as a panic or a foreign error type,
//! so a board can always fall back to natal-only rendering.

use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{self, AssertUnwindSafe};

use ziwei_calendar::{LunarCalendar, LunarDate};
use ziwei_cycle::{CyclicIndex, Ground};

use crate::chart::{DestinyChart, RuntimeContext};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::selection::DateDescriptor;

/// Why no runtime context could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnavailableReason {
    /// The selection is missing a year, month, day or leap flag.
    MissingFields,
    /// The calendar rejected the solar date.
    ConversionError,
    /// The chart handle failed to produce overlay data.
    EngineError,
}

impl UnavailableReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::ConversionError => "conversion_error",
            Self::EngineError => "engine_error",
        }
    }
}

impl Display for UnavailableReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Resolution outcome when no overlay is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    pub reason: UnavailableReason,
    /// Operator-facing description of the underlying failure.
    pub detail: String,
}

impl Unavailable {
    pub fn new(reason: UnavailableReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }

    fn missing(fields: &[&str]) -> Self {
        Self::new(
            UnavailableReason::MissingFields,
            format!("missing {}", fields.join(", ")),
        )
    }
}

impl Display for Unavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "runtime context unavailable ({}): {}", self.reason, self.detail)
    }
}

impl Error for Unavailable {}

/// Start control walked forward by the transiting year branch, then by
/// `lunar_month - 1`.
pub fn transit_start_index(
    start: CyclicIndex,
    year_ground: Ground,
    lunar_month: u32,
) -> CyclicIndex {
    start
        .shift(i32::from(year_ground.index()))
        .advance(lunar_month.saturating_sub(1))
}

/// Resolves date selections into runtime contexts for a chart.
#[derive(Debug, Clone)]
pub struct RuntimeContextResolver<C, S> {
    calendar: C,
    sink: S,
}

impl<C: LunarCalendar, S: DiagnosticSink> RuntimeContextResolver<C, S> {
    pub fn new(calendar: C, sink: S) -> Self {
        Self { calendar, sink }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Resolve the overlay for `date` on `chart`.
    ///
    /// The outcome is also reported to the diagnostics sink.
    pub fn resolve<B: DestinyChart + ?Sized>(
        &self,
        chart: &B,
        date: &DateDescriptor,
    ) -> Result<RuntimeContext, Unavailable> {
        let outcome = self.normalize(date).and_then(|lunar| {
            guarded(UnavailableReason::EngineError, || {
                let ctx = chart.runtime_context(&lunar).map_err(|e| {
                    Unavailable::new(UnavailableReason::EngineError, e.to_string())
                })?;
                let index =
                    transit_start_index(chart.start_control(), ctx.year_ground, lunar.month);
                Ok((lunar, ctx, index))
            })
        });

        match outcome {
            Ok((lunar, ctx, index)) => {
                self.sink.record(&Diagnostic::RuntimeResolved {
                    lunar,
                    year_ground: ctx.year_ground,
                    transit_start_index: index,
                });
                Ok(ctx)
            }
            Err(unavailable) => {
                self.sink.record(&Diagnostic::Unavailable {
                    reason: unavailable.reason,
                    detail: unavailable.detail.clone(),
                });
                Err(unavailable)
            }
        }
    }

    /// Normalise a descriptor to a complete lunar date.
    ///
    /// Solar dates go through the calendar only when year, month and day are
    /// all present and non-zero. Does not report to the sink.
    pub fn normalize(&self, date: &DateDescriptor) -> Result<LunarDate, Unavailable> {
        match *date {
            DateDescriptor::Solar {
                year: Some(year),
                month: Some(month),
                day: Some(day),
            } if year != 0 && month != 0 && day != 0 => {
                let lunar = guarded(UnavailableReason::ConversionError, || {
                    self.calendar
                        .solar_to_lunar(year, month, day)
                        .map_err(|e| {
                            Unavailable::new(UnavailableReason::ConversionError, e.to_string())
                        })
                })?;
                complete_lunar(
                    Some(lunar.year),
                    Some(lunar.month),
                    Some(lunar.day),
                    Some(lunar.is_leap_month),
                )
            }
            DateDescriptor::Solar { year, month, day } => {
                let mut missing = Vec::new();
                if year.unwrap_or(0) == 0 {
                    missing.push("solar year");
                }
                if month.unwrap_or(0) == 0 {
                    missing.push("solar month");
                }
                if day.unwrap_or(0) == 0 {
                    missing.push("solar day");
                }
                Err(Unavailable::missing(&missing))
            }
            DateDescriptor::Lunar {
                year,
                month,
                day,
                leap,
            } => complete_lunar(year, month, day, leap),
        }
    }
}

/// Run a collaborator call, turning a panic into `reason`.
fn guarded<T>(
    reason: UnavailableReason,
    call: impl FnOnce() -> Result<T, Unavailable>,
) -> Result<T, Unavailable> {
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        Err(Unavailable::new(
            reason,
            format!("panicked: {}", panic_message(payload.as_ref())),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// Zero counts as missing for year, month and day; the leap flag only has
/// to be present.
fn complete_lunar(
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    leap: Option<bool>,
) -> Result<LunarDate, Unavailable> {
    match (year, month, day, leap) {
        (Some(year), Some(month), Some(day), Some(leap)) if year != 0 && month != 0 && day != 0 => {
            Ok(LunarDate::new(year, month, day, leap))
        }
        _ => {
            let mut missing = Vec::new();
            if year.unwrap_or(0) == 0 {
                missing.push("lunar year");
            }
            if month.unwrap_or(0) == 0 {
                missing.push("lunar month");
            }
            if day.unwrap_or(0) == 0 {
                missing.push("lunar day");
            }
            if leap.is_none() {
                missing.push("leap flag");
            }
            Err(Unavailable::missing(&missing))
        }
    }
}

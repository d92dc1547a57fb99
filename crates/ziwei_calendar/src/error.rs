//! Error types for calendar conversion.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from solar/lunar date conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalendarError {
    /// The solar date does not exist (e.g. April 31st).
    InvalidSolarDate { year: i32, month: u32, day: u32 },
    /// The lunar date does not exist in that lunar year.
    InvalidLunarDate {
        year: i32,
        month: u32,
        day: u32,
        is_leap_month: bool,
    },
    /// The date falls outside the years covered by the month table.
    OutOfRange { year: i32 },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSolarDate { year, month, day } => {
                write!(f, "invalid solar date: {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidLunarDate {
                year,
                month,
                day,
                is_leap_month,
            } => {
                let leap = if *is_leap_month { " (leap)" } else { "" };
                write!(f, "invalid lunar date: {year}/{month}{leap}/{day}")
            }
            Self::OutOfRange { year } => write!(f, "year {year} outside calendar table range"),
        }
    }
}

impl Error for CalendarError {}

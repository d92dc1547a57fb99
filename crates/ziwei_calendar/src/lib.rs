//! Solar ↔ lunar calendar conversion for ZiWei charts.
//!
//! This crate provides:
//! - [`SolarDate`] and [`LunarDate`] value types
//! - The [`LunarCalendar`] conversion seam consumed by runtime resolution
//! - [`TableCalendar`], a packed month-table implementation for 1900–2100

pub mod date;
pub mod error;
pub mod table;

pub use date::{LunarDate, SolarDate, days_in_month, is_leap_year};
pub use error::CalendarError;
pub use table::{FIRST_YEAR, LAST_YEAR, TableCalendar};

/// Solar → lunar conversion seam.
///
/// Implementations must reject dates that do not exist in the Gregorian
/// calendar with an error rather than normalising them.
pub trait LunarCalendar {
    fn solar_to_lunar(&self, year: i32, month: u32, day: u32) -> Result<LunarDate, CalendarError>;
}

impl<C: LunarCalendar + ?Sized> LunarCalendar for &C {
    fn solar_to_lunar(&self, year: i32, month: u32, day: u32) -> Result<LunarDate, CalendarError> {
        (**self).solar_to_lunar(year, month, day)
    }
}

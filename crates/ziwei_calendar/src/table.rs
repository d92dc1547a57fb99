//! Table-driven Chinese lunisolar calendar, 1900 through 2100.
//!
//! Each year is packed into one integer:
//! - bits 0..4: leap month number (0 = no leap month)
//! - bits 4..16: month lengths for months 1..12, month 1 in bit 15
//!   (set = 30 days, clear = 29 days)
//! - bit 16: leap month length (set = 30 days)
//!
//! Lunar day 1900/1/1 falls on solar 1900-01-31.

use crate::date::{LunarDate, SolarDate};
use crate::error::CalendarError;
use crate::LunarCalendar;

/// First lunar year covered by the month table.
pub const FIRST_YEAR: i32 = 1900;
/// Last lunar year covered by the month table.
pub const LAST_YEAR: i32 = 2100;

/// Solar date of lunar 1900/1/1, as days since 1970-01-01.
const EPOCH_DAYS: i64 = -25_537;

/// Last solar day the table can convert.
const LAST_SOLAR: SolarDate = SolarDate {
    year: 2100,
    month: 12,
    day: 31,
};

#[rustfmt::skip]
const YEAR_TABLE: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2,
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977,
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970,
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950,
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557,
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0,
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0,
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6,
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570,
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0,
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5,
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930,
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530,
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45,
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0,
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0,
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4,
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0,
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160,
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252,
    0x0d520,
];

fn entry(year: i32) -> Result<u32, CalendarError> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return Err(CalendarError::OutOfRange { year });
    }
    Ok(YEAR_TABLE[(year - FIRST_YEAR) as usize])
}

/// Calendar backed by the packed 1900–2100 month table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCalendar;

impl TableCalendar {
    pub fn new() -> Self {
        Self
    }

    /// Leap month number of a lunar year, or `None` if it has none.
    pub fn leap_month(&self, year: i32) -> Result<Option<u32>, CalendarError> {
        let leap = entry(year)? & 0xf;
        Ok(if leap == 0 { None } else { Some(leap) })
    }

    /// Length of a month in days (29 or 30).
    pub fn month_days(
        &self,
        year: i32,
        month: u32,
        is_leap_month: bool,
    ) -> Result<u32, CalendarError> {
        let bits = entry(year)?;
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidLunarDate {
                year,
                month,
                day: 1,
                is_leap_month,
            });
        }
        if is_leap_month {
            if bits & 0xf != month {
                return Err(CalendarError::InvalidLunarDate {
                    year,
                    month,
                    day: 1,
                    is_leap_month,
                });
            }
            return Ok(if bits & 0x10000 != 0 { 30 } else { 29 });
        }
        Ok(if bits & (0x10000 >> month) != 0 { 30 } else { 29 })
    }

    /// Total days in a lunar year, leap month included.
    pub fn year_days(&self, year: i32) -> Result<u32, CalendarError> {
        let bits = entry(year)?;
        let long_months = (bits & 0xfff0).count_ones();
        let mut days = 12 * 29 + long_months;
        if bits & 0xf != 0 {
            days += if bits & 0x10000 != 0 { 30 } else { 29 };
        }
        Ok(days)
    }

    /// Convert a lunar date back to its solar date.
    pub fn lunar_to_solar(&self, date: &LunarDate) -> Result<SolarDate, CalendarError> {
        let invalid = CalendarError::InvalidLunarDate {
            year: date.year,
            month: date.month,
            day: date.day,
            is_leap_month: date.is_leap_month,
        };
        let length = match self.month_days(date.year, date.month, date.is_leap_month) {
            Ok(days) => days,
            Err(e @ CalendarError::OutOfRange { .. }) => return Err(e),
            Err(_) => return Err(invalid),
        };
        if date.day == 0 || date.day > length {
            return Err(invalid);
        }

        let mut offset = 0i64;
        for year in FIRST_YEAR..date.year {
            offset += i64::from(self.year_days(year)?);
        }
        let leap = self.leap_month(date.year)?;
        for month in 1..date.month {
            offset += i64::from(self.month_days(date.year, month, false)?);
            if leap == Some(month) {
                offset += i64::from(self.month_days(date.year, month, true)?);
            }
        }
        if date.is_leap_month {
            offset += i64::from(self.month_days(date.year, date.month, false)?);
        }
        offset += i64::from(date.day) - 1;

        let solar = SolarDate::from_days_since_epoch(EPOCH_DAYS + offset);
        if solar > LAST_SOLAR {
            return Err(CalendarError::OutOfRange { year: solar.year });
        }
        Ok(solar)
    }
}

impl LunarCalendar for TableCalendar {
    fn solar_to_lunar(&self, year: i32, month: u32, day: u32) -> Result<LunarDate, CalendarError> {
        let solar = SolarDate::new(year, month, day);
        solar.validate()?;
        let mut offset = solar.days_since_epoch() - EPOCH_DAYS;
        if offset < 0 || solar > LAST_SOLAR {
            return Err(CalendarError::OutOfRange { year });
        }

        let mut lunar_year = FIRST_YEAR;
        loop {
            let days = i64::from(self.year_days(lunar_year)?);
            if offset < days {
                break;
            }
            offset -= days;
            lunar_year += 1;
        }

        let leap = self.leap_month(lunar_year)?;
        let mut lunar_month = 1;
        let mut in_leap = false;
        loop {
            let days = i64::from(self.month_days(lunar_year, lunar_month, in_leap)?);
            if offset < days {
                break;
            }
            offset -= days;
            if !in_leap && leap == Some(lunar_month) {
                in_leap = true;
            } else {
                in_leap = false;
                lunar_month += 1;
            }
        }

        Ok(LunarDate {
            year: lunar_year,
            month: lunar_month,
            day: offset as u32 + 1,
            is_leap_month: in_leap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_201_years() {
        assert_eq!(YEAR_TABLE.len() as i32, LAST_YEAR - FIRST_YEAR + 1);
    }

    #[test]
    fn leap_months() {
        let cal = TableCalendar::new();
        assert_eq!(cal.leap_month(2023).unwrap(), Some(2));
        assert_eq!(cal.leap_month(2020).unwrap(), Some(4));
        assert_eq!(cal.leap_month(2025).unwrap(), Some(6));
        assert_eq!(cal.leap_month(2024).unwrap(), None);
    }

    #[test]
    fn year_lengths() {
        let cal = TableCalendar::new();
        assert_eq!(cal.year_days(2023).unwrap(), 384);
        assert_eq!(cal.year_days(2024).unwrap(), 354);
    }

    #[test]
    fn month_lengths_2024() {
        let cal = TableCalendar::new();
        let days: Vec<u32> = (1..=12)
            .map(|m| cal.month_days(2024, m, false).unwrap())
            .collect();
        assert_eq!(days, vec![29, 30, 29, 29, 30, 29, 30, 30, 29, 30, 30, 29]);
    }

    #[test]
    fn leap_month_length_requires_matching_month() {
        let cal = TableCalendar::new();
        assert_eq!(cal.month_days(2023, 2, true).unwrap(), 29);
        assert!(cal.month_days(2023, 3, true).is_err());
    }

    #[test]
    fn epoch_day() {
        let lunar = TableCalendar.solar_to_lunar(1900, 1, 31).unwrap();
        assert_eq!(lunar, LunarDate::new(1900, 1, 1, false));
    }

    #[test]
    fn before_epoch_out_of_range() {
        assert_eq!(
            TableCalendar.solar_to_lunar(1900, 1, 30),
            Err(CalendarError::OutOfRange { year: 1900 })
        );
    }

    #[test]
    fn after_table_out_of_range() {
        assert!(matches!(
            TableCalendar.solar_to_lunar(2101, 1, 1),
            Err(CalendarError::OutOfRange { .. })
        ));
    }

    #[test]
    fn last_supported_day() {
        let lunar = TableCalendar.solar_to_lunar(2100, 12, 31).unwrap();
        assert_eq!(lunar, LunarDate::new(2100, 12, 1, false));
    }

    #[test]
    fn invalid_solar_rejected() {
        assert!(matches!(
            TableCalendar.solar_to_lunar(2023, 4, 31),
            Err(CalendarError::InvalidSolarDate { .. })
        ));
    }

    #[test]
    fn lunar_to_solar_leap_month() {
        let solar = TableCalendar
            .lunar_to_solar(&LunarDate::new(2023, 2, 1, true))
            .unwrap();
        assert_eq!(solar, SolarDate::new(2023, 3, 22));
    }

    #[test]
    fn lunar_to_solar_rejects_day_30_of_short_month() {
        // 2023 leap 2nd month has 29 days
        assert!(TableCalendar
            .lunar_to_solar(&LunarDate::new(2023, 2, 30, true))
            .is_err());
    }

    #[test]
    fn lunar_to_solar_rejects_missing_leap() {
        assert!(TableCalendar
            .lunar_to_solar(&LunarDate::new(2024, 5, 1, true))
            .is_err());
    }
}

//! Solar (Gregorian) and lunar calendar date values.
//!
//! Day arithmetic goes through a proleptic-Gregorian day count relative to
//! 1970-01-01, which keeps every conversion in integers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use ziwei_cycle::{Ground, Sky, year_pair};

use crate::error::CalendarError;

/// Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Check that the date exists in the Gregorian calendar.
    pub fn validate(&self) -> Result<(), CalendarError> {
        let valid = (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month);
        if valid {
            Ok(())
        } else {
            Err(CalendarError::InvalidSolarDate {
                year: self.year,
                month: self.month,
                day: self.day,
            })
        }
    }

    /// Days since 1970-01-01 (negative before).
    pub fn days_since_epoch(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Inverse of [`SolarDate::days_since_epoch`].
    pub fn from_days_since_epoch(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }
}

impl Display for SolarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::str::FromStr for SolarDate {
    type Err = String;

    /// Parse `YYYY-MM-DD`. Range checks are left to [`SolarDate::validate`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(format!("expected YYYY-MM-DD, got {s}"));
        }
        let year: i32 = parts[0].parse().map_err(|e| format!("{e}"))?;
        let month: u32 = parts[1].parse().map_err(|e| format!("{e}"))?;
        let day: u32 = parts[2].parse().map_err(|e| format!("{e}"))?;
        Ok(Self { year, month, day })
    }
}

/// Chinese lunisolar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    /// Month number 1..=12; a leap month repeats the number of the month before it.
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    /// Stem and branch of this lunar year.
    pub fn year_pair(&self) -> (Sky, Ground) {
        year_pair(self.year)
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let leap = if self.is_leap_month { "閏" } else { "" };
        write!(f, "{}年{}{}月{}日", self.year, leap, self.month, self.day)
    }
}

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a Gregorian month (0 for an invalid month).
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Days from 1970-01-01 to the given proleptic-Gregorian date.
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic-Gregorian date for a day count from 1970-01-01.
pub fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn table_epoch_offset() {
        assert_eq!(days_from_civil(1900, 1, 31), -25_537);
    }

    #[test]
    fn civil_round_trip_across_leap_day() {
        for days in [-25_537_i64, -1, 0, 11_016, 19_782, 47_482] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days);
        }
        assert_eq!(civil_from_days(days_from_civil(2024, 2, 29) + 1), (2024, 3, 1));
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn validate_rejects_april_31() {
        assert!(SolarDate::new(2023, 4, 31).validate().is_err());
        assert!(SolarDate::new(2023, 4, 30).validate().is_ok());
    }

    #[test]
    fn validate_rejects_feb_29_non_leap() {
        assert!(SolarDate::new(2023, 2, 29).validate().is_err());
        assert!(SolarDate::new(2024, 2, 29).validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_fields() {
        assert!(SolarDate::new(2023, 0, 1).validate().is_err());
        assert!(SolarDate::new(2023, 1, 0).validate().is_err());
        assert!(SolarDate::new(2023, 13, 1).validate().is_err());
    }

    #[test]
    fn parse_solar() {
        let d: SolarDate = "2024-03-20".parse().unwrap();
        assert_eq!(d, SolarDate::new(2024, 3, 20));
        assert!("2024/03/20".parse::<SolarDate>().is_err());
        assert!("2024-xx-20".parse::<SolarDate>().is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(SolarDate::new(987, 3, 5).to_string(), "0987-03-05");
        assert_eq!(LunarDate::new(2023, 2, 1, true).to_string(), "2023年閏2月1日");
        assert_eq!(LunarDate::new(2024, 1, 15, false).to_string(), "2024年1月15日");
    }

    #[test]
    fn lunar_year_pair() {
        let (sky, ground) = LunarDate::new(2024, 1, 1, false).year_pair();
        assert_eq!(sky, Sky::Jia);
        assert_eq!(ground, Ground::Chen);
    }
}

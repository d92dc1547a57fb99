//! Natal chart configuration.
//!
//! A [`DestinyConfig`] is the caller-owned birth record a chart is built
//! from. It is compared and hashed as a whole so a session can tell when the
//! chart has to be rebuilt.

use serde::{Deserialize, Serialize};
use ziwei_cycle::{Ground, Sky, year_pair};

use crate::error::ChartError;

/// Gender of the chart subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// One-character marker used on the summary panel.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Male => "男",
            Self::Female => "女",
        }
    }
}

/// Which of the three boards the chart is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfigType {
    #[default]
    Ground,
    Sky,
    Human,
}

/// All 3 board types, in display order.
pub const ALL_CONFIG_TYPES: [ConfigType; 3] =
    [ConfigType::Ground, ConfigType::Sky, ConfigType::Human];

impl ConfigType {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ground => "地盤",
            Self::Sky => "天盤",
            Self::Human => "人盤",
        }
    }

    /// Upper-case code as used in serialized charts.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ground => "GROUND",
            Self::Sky => "SKY",
            Self::Human => "HUMAN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ALL_CONFIG_TYPES
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }
}

/// Birth data a natal chart is constructed from. Dates are lunar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinyConfig {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub is_leap_month: bool,
    pub gender: Gender,
    #[serde(default)]
    pub config_type: ConfigType,
    pub born_time_ground: Ground,
}

impl DestinyConfig {
    pub fn year_sky(&self) -> Sky {
        year_pair(self.year).0
    }

    pub fn year_ground(&self) -> Ground {
        year_pair(self.year).1
    }

    /// Reject birth dates no lunar calendar can hold.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !(1..=12).contains(&self.month) {
            return Err(ChartError::InvalidConfig("month must be in 1..=12"));
        }
        if !(1..=30).contains(&self.day) {
            return Err(ChartError::InvalidConfig("day must be in 1..=30"));
        }
        Ok(())
    }
}

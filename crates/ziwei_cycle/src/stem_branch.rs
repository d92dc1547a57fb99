//! Heavenly stems (sky) and earthly branches (ground).
//!
//! The 10 stems and 12 branches pair up into the 60-year sexagenary cycle.
//! The epoch is CE 4 = 甲子 (Jia-Zi), so 1984 and 2044 are 甲子 years too.

use serde::{Deserialize, Serialize};

/// The 10 heavenly stems, 甲 (Jia) through 癸 (Gui).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sky {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in order (index 0 = 甲).
pub const ALL_SKIES: [Sky; 10] = [
    Sky::Jia,
    Sky::Yi,
    Sky::Bing,
    Sky::Ding,
    Sky::Wu,
    Sky::Ji,
    Sky::Geng,
    Sky::Xin,
    Sky::Ren,
    Sky::Gui,
];

impl Sky {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Jia => 0,
            Self::Yi => 1,
            Self::Bing => 2,
            Self::Ding => 3,
            Self::Wu => 4,
            Self::Ji => 5,
            Self::Geng => 6,
            Self::Xin => 7,
            Self::Ren => 8,
            Self::Gui => 9,
        }
    }

    /// Stem for an index, wrapping modulo 10.
    pub const fn from_index(index: u8) -> Self {
        ALL_SKIES[(index % 10) as usize]
    }

    /// Single-character Chinese name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Jia => "甲",
            Self::Yi => "乙",
            Self::Bing => "丙",
            Self::Ding => "丁",
            Self::Wu => "戊",
            Self::Ji => "己",
            Self::Geng => "庚",
            Self::Xin => "辛",
            Self::Ren => "壬",
            Self::Gui => "癸",
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jia => "Jia",
            Self::Yi => "Yi",
            Self::Bing => "Bing",
            Self::Ding => "Ding",
            Self::Wu => "Wu",
            Self::Ji => "Ji",
            Self::Geng => "Geng",
            Self::Xin => "Xin",
            Self::Ren => "Ren",
            Self::Gui => "Gui",
        }
    }

    /// Odd-indexed stems are yin.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn all() -> &'static [Sky; 10] {
        &ALL_SKIES
    }
}

/// The 12 earthly branches, 子 (Zi) through 亥 (Hai).
///
/// Branches double as the 12 two-hour periods of the day, which is how a
/// birth hour is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ground {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (index 0 = 子).
pub const ALL_GROUNDS: [Ground; 12] = [
    Ground::Zi,
    Ground::Chou,
    Ground::Yin,
    Ground::Mao,
    Ground::Chen,
    Ground::Si,
    Ground::Wu,
    Ground::Wei,
    Ground::Shen,
    Ground::You,
    Ground::Xu,
    Ground::Hai,
];

impl Ground {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Branch for an index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_GROUNDS[(index % 12) as usize]
    }

    /// Single-character Chinese name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "Zi",
            Self::Chou => "Chou",
            Self::Yin => "Yin",
            Self::Mao => "Mao",
            Self::Chen => "Chen",
            Self::Si => "Si",
            Self::Wu => "Wu",
            Self::Wei => "Wei",
            Self::Shen => "Shen",
            Self::You => "You",
            Self::Xu => "Xu",
            Self::Hai => "Hai",
        }
    }

    /// Branch governing a clock hour (0..=23). 23:00 already belongs to 子.
    pub const fn from_hour(hour: u8) -> Self {
        Self::from_index(((hour as u16 + 1) / 2 % 12) as u8)
    }

    pub const fn all() -> &'static [Ground; 12] {
        &ALL_GROUNDS
    }
}

/// Reference epoch: CE 4 = 甲子 (sky index 0, ground index 0).
pub const SEXAGENARY_EPOCH_YEAR: i32 = 4;

/// Stem and branch of a lunar year.
///
/// The pair only advances at the lunar new year, so callers must pass the
/// lunar year number, not the Gregorian one.
pub fn year_pair(lunar_year: i32) -> (Sky, Ground) {
    let offset = lunar_year - SEXAGENARY_EPOCH_YEAR;
    let sky = ALL_SKIES[offset.rem_euclid(10) as usize];
    let ground = ALL_GROUNDS[offset.rem_euclid(12) as usize];
    (sky, ground)
}

/// 1-based position of a year in the 60-year cycle (甲子 = 1).
pub fn cycle_order(lunar_year: i32) -> u8 {
    (lunar_year - SEXAGENARY_EPOCH_YEAR).rem_euclid(60) as u8 + 1
}

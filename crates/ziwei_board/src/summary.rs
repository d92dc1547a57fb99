//! Centre summary panel.
//!
//! Pure formatting of natal fields; nothing here depends on the runtime
//! overlay.

use std::fmt::{Display, Formatter};

use crate::chart::DestinyChart;

/// Leap-month marker placed before the birth month.
///
/// The standard `閏`, shared with `LunarDate`'s display. The homophone `潤`
/// seen in some chart UIs is deliberately not used.
pub const LEAP_MARKER: &str = "閏";

/// Text shown in the centre of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPanel {
    /// Birth line: year with stem-branch, month/day, hour, board type,
    /// polarity and gender.
    pub config_text: String,
    /// Five-element bureau label.
    pub element: String,
    /// `命主` line.
    pub destiny_master: String,
    /// `身主` line.
    pub body_master: String,
}

impl SummaryPanel {
    pub fn compose<B: DestinyChart + ?Sized>(chart: &B) -> Self {
        let config = chart.config();
        let leap = if config.is_leap_month { LEAP_MARKER } else { "" };
        let config_text = format!(
            "{}({}{})年 {}{}月{}日 {} {} {}{}",
            config.year,
            config.year_sky().display_name(),
            config.year_ground().display_name(),
            leap,
            config.month,
            config.day,
            config.born_time_ground.display_name(),
            config.config_type.display_name(),
            chart.shadow_light(),
            config.gender.display_name(),
        );
        Self {
            config_text,
            element: chart.element().to_string(),
            destiny_master: format!("命主{}", chart.destiny_master()),
            body_master: format!("身主{}", chart.body_master()),
        }
    }

    /// The two display lines: birth line with element, then the masters.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("{} {}", self.config_text, self.element),
            format!("{} {}", self.destiny_master, self.body_master),
        ]
    }
}

impl Display for SummaryPanel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [first, second] = self.lines();
        write!(f, "{first}\n{second}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ziwei_calendar::LunarDate;

    #[test]
    fn leap_marker_matches_lunar_display() {
        let text = LunarDate::new(2023, 2, 1, true).to_string();
        assert!(text.contains(LEAP_MARKER), "{text}");
        assert!(!text.contains('潤'));
    }
}

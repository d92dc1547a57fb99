//! Observation-date selection.
//!
//! A selection comes straight from user input and may be incomplete, so
//! every date field is optional. Completeness is checked by the resolver,
//! not here.

use serde::{Deserialize, Serialize};

/// Calendar a descriptor is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalendarType {
    Solar,
    Lunar,
}

/// Observation date, solar or lunar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "calendar_type", rename_all = "UPPERCASE")]
pub enum DateDescriptor {
    Solar {
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    },
    Lunar {
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
        leap: Option<bool>,
    },
}

impl DateDescriptor {
    pub fn solar(year: i32, month: u32, day: u32) -> Self {
        Self::Solar {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    pub fn lunar(year: i32, month: u32, day: u32, leap: bool) -> Self {
        Self::Lunar {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            leap: Some(leap),
        }
    }

    pub fn calendar_type(&self) -> CalendarType {
        match self {
            Self::Solar { .. } => CalendarType::Solar,
            Self::Lunar { .. } => CalendarType::Lunar,
        }
    }
}

impl Default for DateDescriptor {
    /// Nothing selected yet.
    fn default() -> Self {
        Self::Lunar {
            year: None,
            month: None,
            day: None,
            leap: None,
        }
    }
}

/// Scope used when a selection leaves it unset.
pub const DEFAULT_SCOPE: u32 = 0;

/// A date descriptor plus the display scope the board is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateSelection {
    pub date: DateDescriptor,
    /// Renderer detail level; `None` renders at [`DEFAULT_SCOPE`].
    #[serde(default)]
    pub scope: Option<u32>,
}

impl DateSelection {
    pub fn new(date: DateDescriptor) -> Self {
        Self { date, scope: None }
    }

    pub fn with_scope(self, scope: u32) -> Self {
        Self {
            scope: Some(scope),
            ..self
        }
    }

    pub fn scope_or_default(&self) -> u32 {
        self.scope.unwrap_or(DEFAULT_SCOPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_lunar() {
        let d = DateDescriptor::default();
        assert_eq!(d.calendar_type(), CalendarType::Lunar);
        assert_eq!(
            d,
            DateDescriptor::Lunar {
                year: None,
                month: None,
                day: None,
                leap: None
            }
        );
    }

    #[test]
    fn scope_defaults_to_zero() {
        let s = DateSelection::new(DateDescriptor::solar(2024, 3, 20));
        assert_eq!(s.scope, None);
        assert_eq!(s.scope_or_default(), 0);
        assert_eq!(s.with_scope(2).scope_or_default(), 2);
    }

    #[test]
    fn serde_tagged_by_calendar_type() {
        let json = r#"{"date":{"calendar_type":"SOLAR","year":2024,"month":3,"day":20}}"#;
        let s: DateSelection = serde_json::from_str(json).unwrap();
        assert_eq!(s.date, DateDescriptor::solar(2024, 3, 20));
        assert_eq!(s.scope, None);
    }

    #[test]
    fn serde_partial_lunar() {
        let json = r#"{"calendar_type":"LUNAR","year":2024,"month":3,"day":null,"leap":false}"#;
        let d: DateDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            d,
            DateDescriptor::Lunar {
                year: Some(2024),
                month: Some(3),
                day: None,
                leap: Some(false)
            }
        );
    }
}

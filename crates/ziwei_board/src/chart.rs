//! Chart-engine collaborator seams.
//!
//! Palace placement, star assignment and five-element derivation live in an
//! external engine. This module only names what the board needs from it:
//! [`ChartEngine`] builds a chart once per [`DestinyConfig`], and the
//! resulting [`DestinyChart`] handle exposes the 12 natal cells, the summary
//! labels and the runtime overlay lookup.

use serde::{Deserialize, Serialize};
use ziwei_calendar::LunarDate;
use ziwei_cycle::{CyclicIndex, Ground, Sky};

use crate::config::DestinyConfig;
use crate::error::ChartError;

/// Number of palaces on the ring.
pub const CELL_COUNT: usize = 12;

/// One natal palace. `index` is the ring position (0..=11) and is the only
/// key the layout binder looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub index: u8,
    /// Palace display name, e.g. 命宮.
    pub palace: String,
    pub sky: Sky,
    pub ground: Ground,
    #[serde(default)]
    pub major_stars: Vec<String>,
    #[serde(default)]
    pub minor_stars: Vec<String>,
}

/// Transiting overlay resolved for one lunar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeContext {
    /// Lunar date the overlay was resolved for.
    pub lunar: LunarDate,
    pub year_sky: Sky,
    pub year_ground: Ground,
    /// Further engine-specific transiting labels, in engine order.
    pub extras: Vec<(String, String)>,
}

impl RuntimeContext {
    /// Overlay carrying only the transiting year pair.
    pub fn for_lunar(lunar: LunarDate) -> Self {
        let (year_sky, year_ground) = lunar.year_pair();
        Self {
            lunar,
            year_sky,
            year_ground,
            extras: Vec::new(),
        }
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A constructed natal chart.
///
/// Handles are immutable: a new configuration means a new chart.
pub trait DestinyChart {
    fn config(&self) -> &DestinyConfig;

    /// The 12 natal cells in ring order.
    fn cells(&self) -> &[Cell];

    /// Five-element bureau label, e.g. 水二局.
    fn element(&self) -> &str;

    fn destiny_master(&self) -> &str;

    fn body_master(&self) -> &str;

    /// Yin/yang polarity label of the subject, e.g. 陽.
    fn shadow_light(&self) -> &str;

    /// Ring position the transiting walk starts from.
    fn start_control(&self) -> CyclicIndex;

    /// Overlay data for a validated lunar date.
    fn runtime_context(&self, lunar: &LunarDate) -> Result<RuntimeContext, ChartError>;
}

/// Builds charts from natal configurations.
pub trait ChartEngine {
    type Chart: DestinyChart;

    fn build(&self, config: &DestinyConfig) -> Result<Self::Chart, ChartError>;
}

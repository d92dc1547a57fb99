//! In-memory chart engine shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell as Counter;

use ziwei_board::{
    Cell, ChartEngine, ChartError, ConfigType, DestinyChart, DestinyConfig, Gender,
    RuntimeContext,
};
use ziwei_calendar::LunarDate;
use ziwei_cycle::{CyclicIndex, Ground, Sky};

pub const PALACES: [&str; 12] = [
    "命宮", "父母", "福德", "田宅", "官祿", "交友",
    "遷移", "疾厄", "財帛", "子女", "夫妻", "兄弟",
];

pub fn config() -> DestinyConfig {
    DestinyConfig {
        year: 1990,
        month: 4,
        day: 21,
        is_leap_month: false,
        gender: Gender::Female,
        config_type: ConfigType::Sky,
        born_time_ground: Ground::Chen,
    }
}

pub fn cells() -> Vec<Cell> {
    (0..12u8)
        .map(|i| Cell {
            index: i,
            palace: PALACES[usize::from(i)].to_string(),
            sky: Sky::from_index(i),
            ground: Ground::from_index(i),
            major_stars: Vec::new(),
            minor_stars: Vec::new(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct FakeChart {
    pub config: DestinyConfig,
    pub cells: Vec<Cell>,
    pub fail_runtime: bool,
    pub panic_runtime: bool,
}

impl FakeChart {
    pub fn new(config: DestinyConfig) -> Self {
        Self {
            config,
            cells: cells(),
            fail_runtime: false,
            panic_runtime: false,
        }
    }
}

impl DestinyChart for FakeChart {
    fn config(&self) -> &DestinyConfig {
        &self.config
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn element(&self) -> &str {
        "土五局"
    }

    fn destiny_master(&self) -> &str {
        "廉貞"
    }

    fn body_master(&self) -> &str {
        "火星"
    }

    fn shadow_light(&self) -> &str {
        "陽"
    }

    fn start_control(&self) -> CyclicIndex {
        CyclicIndex::twelve(2)
    }

    fn runtime_context(&self, lunar: &LunarDate) -> Result<RuntimeContext, ChartError> {
        if self.fail_runtime {
            return Err(ChartError::Internal("star table missing".to_string()));
        }
        if self.panic_runtime {
            let table: Vec<u8> = Vec::new();
            let _ = table[lunar.month as usize];
        }
        let mut ctx = RuntimeContext::for_lunar(*lunar);
        ctx.extras.push(("流月".to_string(), lunar.month.to_string()));
        Ok(ctx)
    }
}

/// Counts builds so cache behaviour can be observed from outside.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub builds: Counter<u32>,
    pub fail_runtime: bool,
}

impl ChartEngine for FakeEngine {
    type Chart = FakeChart;

    fn build(&self, config: &DestinyConfig) -> Result<FakeChart, ChartError> {
        self.builds.set(self.builds.get() + 1);
        let mut chart = FakeChart::new(config.clone());
        chart.fail_runtime = self.fail_runtime;
        Ok(chart)
    }
}

//! Pre-computed charts stored as JSON.
//!
//! A snapshot is everything a board needs from an engine, captured once.
//! Transiting labels beyond the year pair are looked up per lunar year in the
//! optional `transits` table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ziwei_calendar::LunarDate;
use ziwei_cycle::CyclicIndex;

use crate::chart::{CELL_COUNT, Cell, ChartEngine, DestinyChart, RuntimeContext};
use crate::config::DestinyConfig;
use crate::error::{ChartError, LayoutError};

/// Serialized chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub config: DestinyConfig,
    pub cells: Vec<Cell>,
    pub element: String,
    pub destiny_master: String,
    pub body_master: String,
    pub shadow_light: String,
    /// Ring index of the start control, 0..=11.
    pub start_control: u8,
    /// Extra transiting labels keyed by lunar year.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub transits: BTreeMap<i32, BTreeMap<String, String>>,
}

impl ChartSnapshot {
    pub fn from_json(text: &str) -> Result<Self, ChartError> {
        let snapshot: Self = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self, ChartError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Snapshot(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the config and the cell ring.
    pub fn validate(&self) -> Result<(), ChartError> {
        self.config.validate()?;
        if self.cells.len() != CELL_COUNT {
            return Err(LayoutError::CellCount {
                found: self.cells.len(),
            }
            .into());
        }
        for (position, cell) in self.cells.iter().enumerate() {
            if usize::from(cell.index) != position {
                return Err(LayoutError::CellOrder {
                    position,
                    index: cell.index,
                }
                .into());
            }
        }
        if usize::from(self.start_control) >= CELL_COUNT {
            return Err(ChartError::Snapshot(format!(
                "start_control {} outside 0..=11",
                self.start_control
            )));
        }
        Ok(())
    }
}

/// [`DestinyChart`] backed by a validated snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotChart {
    snapshot: ChartSnapshot,
    start_control: CyclicIndex,
}

impl SnapshotChart {
    pub fn new(snapshot: ChartSnapshot) -> Result<Self, ChartError> {
        snapshot.validate()?;
        let start_control = CyclicIndex::twelve(snapshot.start_control);
        Ok(Self {
            snapshot,
            start_control,
        })
    }

    pub fn snapshot(&self) -> &ChartSnapshot {
        &self.snapshot
    }
}

impl DestinyChart for SnapshotChart {
    fn config(&self) -> &DestinyConfig {
        &self.snapshot.config
    }

    fn cells(&self) -> &[Cell] {
        &self.snapshot.cells
    }

    fn element(&self) -> &str {
        &self.snapshot.element
    }

    fn destiny_master(&self) -> &str {
        &self.snapshot.destiny_master
    }

    fn body_master(&self) -> &str {
        &self.snapshot.body_master
    }

    fn shadow_light(&self) -> &str {
        &self.snapshot.shadow_light
    }

    fn start_control(&self) -> CyclicIndex {
        self.start_control
    }

    fn runtime_context(&self, lunar: &LunarDate) -> Result<RuntimeContext, ChartError> {
        let mut ctx = RuntimeContext::for_lunar(*lunar);
        if let Some(labels) = self.snapshot.transits.get(&lunar.year) {
            ctx.extras = labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
        }
        Ok(ctx)
    }
}

/// Engine that serves one fixed snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotEngine {
    snapshot: ChartSnapshot,
}

impl SnapshotEngine {
    pub fn new(snapshot: ChartSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &ChartSnapshot {
        &self.snapshot
    }
}

impl ChartEngine for SnapshotEngine {
    type Chart = SnapshotChart;

    fn build(&self, config: &DestinyConfig) -> Result<SnapshotChart, ChartError> {
        if *config != self.snapshot.config {
            return Err(ChartError::Unsupported(format!(
                "snapshot holds the chart for lunar {}/{}/{}, not {}/{}/{}",
                self.snapshot.config.year,
                self.snapshot.config.month,
                self.snapshot.config.day,
                config.year,
                config.month,
                config.day,
            )));
        }
        SnapshotChart::new(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "config": {
            "year": 1990, "month": 4, "day": 21,
            "gender": "F", "born_time_ground": "Chen"
        },
        "cells": [
            {"index": 0, "palace": "命宮", "sky": "Wu", "ground": "Yin"},
            {"index": 1, "palace": "父母", "sky": "Ji", "ground": "Mao"},
            {"index": 2, "palace": "福德", "sky": "Geng", "ground": "Chen"},
            {"index": 3, "palace": "田宅", "sky": "Xin", "ground": "Si"},
            {"index": 4, "palace": "官祿", "sky": "Ren", "ground": "Wu"},
            {"index": 5, "palace": "交友", "sky": "Gui", "ground": "Wei"},
            {"index": 6, "palace": "遷移", "sky": "Jia", "ground": "Shen"},
            {"index": 7, "palace": "疾厄", "sky": "Yi", "ground": "You"},
            {"index": 8, "palace": "財帛", "sky": "Bing", "ground": "Xu"},
            {"index": 9, "palace": "子女", "sky": "Ding", "ground": "Hai"},
            {"index": 10, "palace": "夫妻", "sky": "Wu", "ground": "Zi"},
            {"index": 11, "palace": "兄弟", "sky": "Ji", "ground": "Chou"}
        ],
        "element": "土五局",
        "destiny_master": "廉貞",
        "body_master": "火星",
        "shadow_light": "陽",
        "start_control": 2,
        "transits": {"2024": {"大限": "官祿"}}
    }"#;

    #[test]
    fn parse_minimal() {
        let snap = ChartSnapshot::from_json(MINIMAL).unwrap();
        assert_eq!(snap.cells.len(), CELL_COUNT);
        assert_eq!(snap.config.config_type, crate::config::ConfigType::Ground);
        assert!(!snap.config.is_leap_month);
        assert_eq!(snap.transits[&2024]["大限"], "官祿");
    }

    #[test]
    fn transits_copied_into_extras() {
        let chart = SnapshotChart::new(ChartSnapshot::from_json(MINIMAL).unwrap()).unwrap();
        let ctx = chart
            .runtime_context(&LunarDate::new(2024, 2, 11, false))
            .unwrap();
        assert_eq!(ctx.extra("大限"), Some("官祿"));

        let ctx = chart
            .runtime_context(&LunarDate::new(2025, 1, 1, false))
            .unwrap();
        assert!(ctx.extras.is_empty());
    }

    #[test]
    fn bad_start_control_rejected() {
        let mut snap = ChartSnapshot::from_json(MINIMAL).unwrap();
        snap.start_control = 12;
        assert!(matches!(snap.validate(), Err(ChartError::Snapshot(_))));
    }

    #[test]
    fn shuffled_cells_rejected() {
        let mut snap = ChartSnapshot::from_json(MINIMAL).unwrap();
        snap.cells.swap(0, 1);
        assert!(matches!(
            snap.validate(),
            Err(ChartError::Layout(LayoutError::CellOrder { position: 0, index: 1 }))
        ));
    }

    #[test]
    fn malformed_json_is_snapshot_error() {
        assert!(matches!(
            ChartSnapshot::from_json("{"),
            Err(ChartError::Snapshot(_))
        ));
    }

    #[test]
    fn engine_rejects_other_config() {
        let snap = ChartSnapshot::from_json(MINIMAL).unwrap();
        let engine = SnapshotEngine::new(snap.clone());
        assert!(engine.build(&snap.config).is_ok());

        let other = DestinyConfig {
            day: 22,
            ..snap.config
        };
        assert!(matches!(
            engine.build(&other),
            Err(ChartError::Unsupported(_))
        ));
    }

    #[test]
    fn json_survives_rewrite() {
        let snap = ChartSnapshot::from_json(MINIMAL).unwrap();
        let again = ChartSnapshot::from_json(&snap.to_json().unwrap()).unwrap();
        assert_eq!(snap, again);
    }
}

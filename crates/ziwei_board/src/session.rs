//! Memoizing board session.
//!
//! A session owns the engine, calendar and diagnostics sink, and keeps the
//! last chart and the last runtime resolution. Each slot is keyed by a hash
//! of its inputs plus an equality check, so repeated renders with the same
//! configuration and selection do no work. A new configuration rebuilds the
//! chart and drops the runtime slot with it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ziwei_calendar::LunarCalendar;

use crate::binder::{BoardBinding, BoardLayoutBinder};
use crate::chart::{ChartEngine, RuntimeContext};
use crate::config::DestinyConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::ChartError;
use crate::runtime::{RuntimeContextResolver, Unavailable, UnavailableReason};
use crate::selection::{DateDescriptor, DateSelection};

/// Counters for cache behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub chart_builds: u32,
    pub runtime_resolutions: u32,
    pub cache_hits: u32,
}

struct CachedChart<T> {
    key: u64,
    config: DestinyConfig,
    chart: T,
}

struct CachedRuntime {
    key: u64,
    config: DestinyConfig,
    date: DateDescriptor,
    result: Result<RuntimeContext, Unavailable>,
}

/// A bound board plus the reason the overlay is missing, if it is.
#[derive(Debug)]
pub struct BoardView<'a, T: ?Sized> {
    pub binding: BoardBinding<'a, T>,
    pub unavailable: Option<Unavailable>,
}

fn key_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Caches one chart and one runtime resolution.
pub struct BoardSession<E: ChartEngine, C, S> {
    engine: E,
    resolver: RuntimeContextResolver<C, S>,
    chart: Option<CachedChart<E::Chart>>,
    runtime: Option<CachedRuntime>,
    stats: SessionStats,
}

impl<E: ChartEngine, C, S> std::fmt::Debug for BoardSession<E, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardSession")
            .field("chart_cached", &self.chart.is_some())
            .field("runtime_cached", &self.runtime.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<E: ChartEngine, C: LunarCalendar, S: DiagnosticSink> BoardSession<E, C, S> {
    pub fn new(engine: E, calendar: C, sink: S) -> Self {
        Self {
            engine,
            resolver: RuntimeContextResolver::new(calendar, sink),
            chart: None,
            runtime: None,
            stats: SessionStats::default(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn resolver(&self) -> &RuntimeContextResolver<C, S> {
        &self.resolver
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Drop both cached slots.
    pub fn invalidate(&mut self) {
        self.chart = None;
        self.runtime = None;
    }

    /// Chart for `config`, built only if the config changed.
    pub fn chart(&mut self, config: &DestinyConfig) -> Result<&E::Chart, ChartError> {
        let key = key_hash(config);
        let hit = matches!(&self.chart, Some(c) if c.key == key && c.config == *config);
        if hit {
            self.stats.cache_hits += 1;
        } else {
            config.validate()?;
            let chart = self.engine.build(config)?;
            self.stats.chart_builds += 1;
            self.chart = Some(CachedChart {
                key,
                config: config.clone(),
                chart,
            });
            self.runtime = None;
        }
        self.chart
            .as_ref()
            .map(|c| &c.chart)
            .ok_or_else(|| ChartError::Internal("chart slot empty after build".to_string()))
    }

    /// Runtime context for `(config, date)`, resolved only if either changed.
    ///
    /// A chart that fails to build is reported as an engine error.
    pub fn runtime(
        &mut self,
        config: &DestinyConfig,
        date: &DateDescriptor,
    ) -> Result<RuntimeContext, Unavailable> {
        self.ensure_runtime(config, date);
        match &self.runtime {
            Some(cached) => cached.result.clone(),
            None => Err(Unavailable::new(
                UnavailableReason::EngineError,
                "runtime slot empty after resolution",
            )),
        }
    }

    /// Chart, overlay and grid binding for one render.
    pub fn board(
        &mut self,
        config: &DestinyConfig,
        selection: &DateSelection,
    ) -> Result<BoardView<'_, E::Chart>, ChartError> {
        self.chart(config)?;
        self.ensure_runtime(config, &selection.date);

        let chart = self
            .chart
            .as_ref()
            .map(|c| &c.chart)
            .ok_or_else(|| ChartError::Internal("chart slot empty after build".to_string()))?;
        let (runtime, unavailable) = match self.runtime.as_ref().map(|c| &c.result) {
            Some(Ok(ctx)) => (Some(ctx), None),
            Some(Err(u)) => (None, Some(u.clone())),
            None => (None, None),
        };

        let binding = BoardLayoutBinder::bind(chart, runtime, selection.scope)?;
        Ok(BoardView {
            binding,
            unavailable,
        })
    }

    fn ensure_runtime(&mut self, config: &DestinyConfig, date: &DateDescriptor) {
        let key = key_hash(&(config, date));
        let hit = matches!(
            &self.runtime,
            Some(c) if c.key == key && c.config == *config && c.date == *date
        );
        if hit {
            self.stats.cache_hits += 1;
            return;
        }

        let built = self.chart(config).map(|_| ());
        let result = match (built, self.chart.as_ref()) {
            (Ok(()), Some(cached)) => self.resolver.resolve(&cached.chart, date),
            (Ok(()), None) => Err(Unavailable::new(
                UnavailableReason::EngineError,
                "chart slot empty after build",
            )),
            (Err(e), _) => Err(Unavailable::new(UnavailableReason::EngineError, e.to_string())),
        };
        self.stats.runtime_resolutions += 1;
        self.runtime = Some(CachedRuntime {
            key,
            config: config.clone(),
            date: *date,
            result,
        });
    }
}

use std::collections::BTreeMap;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ziwei_board::{
    BoardLayoutBinder, BoardSession, Cell, ChartSnapshot, ConfigType, DateDescriptor,
    DateSelection, DestinyConfig, Gender, NullSink, RuntimeContextResolver, SnapshotChart,
    SnapshotEngine,
};
use ziwei_calendar::TableCalendar;
use ziwei_cycle::{Ground, Sky};

fn snapshot() -> ChartSnapshot {
    let config = DestinyConfig {
        year: 1990,
        month: 4,
        day: 21,
        is_leap_month: false,
        gender: Gender::Female,
        config_type: ConfigType::Ground,
        born_time_ground: Ground::Chen,
    };
    let cells = (0..12u8)
        .map(|i| Cell {
            index: i,
            palace: format!("P{i}"),
            sky: Sky::from_index(i),
            ground: Ground::from_index(i),
            major_stars: Vec::new(),
            minor_stars: Vec::new(),
        })
        .collect();
    ChartSnapshot {
        config,
        cells,
        element: "土五局".to_string(),
        destiny_master: "廉貞".to_string(),
        body_master: "火星".to_string(),
        shadow_light: "陽".to_string(),
        start_control: 2,
        transits: BTreeMap::new(),
    }
}

fn resolve_bench(c: &mut Criterion) {
    let chart = SnapshotChart::new(snapshot()).expect("valid snapshot");
    let resolver = RuntimeContextResolver::new(TableCalendar::new(), NullSink);

    let mut group = c.benchmark_group("resolve");
    group.bench_function("solar", |b| {
        let date = DateDescriptor::solar(2024, 3, 20);
        b.iter(|| resolver.resolve(&chart, black_box(&date)))
    });
    group.bench_function("lunar", |b| {
        let date = DateDescriptor::lunar(2024, 2, 11, false);
        b.iter(|| resolver.resolve(&chart, black_box(&date)))
    });
    group.bench_function("missing_fields", |b| {
        let date = DateDescriptor::default();
        b.iter(|| resolver.resolve(&chart, black_box(&date)))
    });
    group.finish();
}

fn bind_bench(c: &mut Criterion) {
    let snap = snapshot();
    let config = snap.config.clone();
    let chart = SnapshotChart::new(snap.clone()).expect("valid snapshot");

    let mut group = c.benchmark_group("board");
    group.bench_function("bind", |b| {
        b.iter(|| BoardLayoutBinder::bind(black_box(&chart), None, None))
    });
    group.bench_function("session_cached", |b| {
        let mut session =
            BoardSession::new(SnapshotEngine::new(snap.clone()), TableCalendar::new(), NullSink);
        let selection = DateSelection::new(DateDescriptor::solar(2024, 3, 20));
        b.iter(|| {
            session
                .board(black_box(&config), black_box(&selection))
                .map(|view| view.binding.cells().count())
        })
    });
    group.finish();
}

criterion_group!(benches, resolve_bench, bind_bench);
criterion_main!(benches);

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ziwei_calendar::{LunarCalendar, LunarDate, TableCalendar};

fn conversion_bench(c: &mut Criterion) {
    let cal = TableCalendar::new();

    let mut group = c.benchmark_group("conversion");
    group.bench_function("solar_to_lunar_1901", |b| {
        b.iter(|| cal.solar_to_lunar(black_box(1901), black_box(3), black_box(1)))
    });
    group.bench_function("solar_to_lunar_2099", |b| {
        b.iter(|| cal.solar_to_lunar(black_box(2099), black_box(11), black_box(30)))
    });
    group.bench_function("lunar_to_solar_leap", |b| {
        let date = LunarDate::new(2023, 2, 15, true);
        b.iter(|| cal.lunar_to_solar(black_box(&date)))
    });
    group.finish();
}

criterion_group!(benches, conversion_bench);
criterion_main!(benches);

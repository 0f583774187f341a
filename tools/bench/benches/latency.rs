//! CONTEXT: Latency benchmark suite
//! INTENT: Per-call cost of the battery statistics client entry points
//! IDL (target): get_app_power_value, get_app_power_percent, get_hardware_unit_power_*, get_battery_stats
//! DEPS: criterion (benchmarking), bench (seeded host backend), tokio (async driver)
//! READINESS: Benchmark suite; host backend only
//! TESTS: Criterion statistics complement the smoke thresholds in `tests/`
use batterystats::{BatteryStatsClient, ConsumptionType};
use bench::suite::sample_backend;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const APP_UID: i32 = 111;

fn sync_queries(c: &mut Criterion) {
    let stats = sample_backend().expect("seed backend");
    c.bench_function("get_app_power_value", |b| {
        b.iter(|| stats.get_app_power_value(black_box(APP_UID)))
    });
    c.bench_function("get_app_power_percent", |b| {
        b.iter(|| stats.get_app_power_percent(black_box(APP_UID)))
    });
    c.bench_function("get_hardware_unit_power_value", |b| {
        b.iter(|| stats.get_hardware_unit_power_value(black_box(ConsumptionType::Idle)))
    });
    c.bench_function("get_hardware_unit_power_percent", |b| {
        b.iter(|| stats.get_hardware_unit_power_percent(black_box(ConsumptionType::Idle)))
    });
}

fn aggregate_query(c: &mut Criterion) {
    let stats = sample_backend().expect("seed backend");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");
    c.bench_function("get_battery_stats", |b| {
        b.iter(|| runtime.block_on(stats.get_battery_stats()))
    });
}

criterion_group!(benches, sync_queries, aggregate_query);
criterion_main!(benches);

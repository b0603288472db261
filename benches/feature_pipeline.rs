//! Benchmarks for regressor construction, assembly and alignment.

use chrono::{Duration, TimeZone};
use chrono_tz::Tz;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loadcast::core::{Forecast, TimeSeries, WideTable};
use loadcast::features::{hourly_exog, ExogenousFeatureSet, PriceProjector};
use loadcast::horizon::hourly_horizon;
use loadcast::models::{BoxedForecaster, ForecastAssembler, Forecaster, ModelRegistry, ModelSpec};
use loadcast::submission::align;

struct Flat;

impl Forecaster for Flat {
    fn predict(&self, steps: usize, _exog: &ExogenousFeatureSet) -> loadcast::Result<Forecast> {
        Ok(Forecast::from_values(vec![1.0; steps]))
    }

    fn name(&self) -> &str {
        "Flat"
    }
}

fn history(days: i64, groups: usize) -> (WideTable, TimeSeries) {
    let start = Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let index: Vec<_> = (0..days * 24).map(|h| start + Duration::hours(h)).collect();
    let n = index.len();
    let names: Vec<String> = (0..groups).map(|g| g.to_string()).collect();
    let values = (0..groups)
        .map(|g| (0..n).map(|i| (i % 24) as f64 + g as f64).collect())
        .collect();
    let prices = (0..n)
        .map(|i| if i % 17 == 0 { f64::NAN } else { 40.0 + (i % 24) as f64 })
        .collect();
    (
        WideTable::new(index.clone(), names, values).unwrap(),
        TimeSeries::new(index, prices).unwrap(),
    )
}

fn bench_hourly_exog(c: &mut Criterion) {
    let mut group = c.benchmark_group("hourly_exog");

    for days in [30, 365].iter() {
        let (table, prices) = history(*days, 1);
        let horizon = hourly_horizon(&table).unwrap();
        let train_end = table.end().unwrap();

        group.bench_with_input(BenchmarkId::new("price_history_days", days), days, |b, _| {
            b.iter(|| {
                hourly_exog(
                    black_box(&horizon),
                    black_box(&prices),
                    train_end,
                    PriceProjector::default(),
                )
            })
        });
    }

    group.finish();
}

fn bench_assemble_and_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_and_align");

    for groups in [10, 100].iter() {
        let (table, prices) = history(30, *groups);
        let horizon = hourly_horizon(&table).unwrap();
        let exog = hourly_exog(&horizon, &prices, table.end().unwrap(), PriceProjector::default())
            .unwrap();
        let template = WideTable::empty(horizon.clone(), table.columns().to_vec()).unwrap();

        let mut registry = ModelRegistry::new();
        for name in table.columns().iter().step_by(2) {
            registry.register(ModelSpec::new(name.clone(), || Ok(Box::new(Flat) as BoxedForecaster)));
        }

        group.bench_with_input(BenchmarkId::new("groups", groups), groups, |b, _| {
            b.iter(|| {
                let assembly = ForecastAssembler::new(&registry)
                    .assemble_hourly(table.columns(), &horizon, &exog, &table)
                    .unwrap();
                align(black_box(&assembly.forecast), &template)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hourly_exog, bench_assemble_and_align);
criterion_main!(benches);

use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use intervals_strain_mcp::domains::aggregate::aggregate;
use intervals_strain_mcp::domains::pmc::{TimeConstants, compute_pmc, pmc_trajectory};
use intervals_strain_mcp::domains::strain::{PerSystem, StrainRecord};
use std::hint::black_box;

fn season_of_records() -> (Vec<StrainRecord>, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    // two sessions on most days, every seventh day off
    let records = (0..365u64)
        .filter(|i| i % 7 != 6)
        .flat_map(|i| {
            let date = start + Days::new(i);
            let base = 30.0 + (i % 11) as f64 * 4.0;
            [
                StrainRecord::new(date, PerSystem::new(base, 2.0, 0.4)),
                StrainRecord::new(date, PerSystem::new(base / 3.0, 4.5, 1.1)),
            ]
        })
        .collect();
    (records, start + Days::new(364))
}

fn bench_strain_pmc(c: &mut Criterion) {
    let (records, as_of) = season_of_records();
    let constants = TimeConstants::default();

    c.bench_function("aggregate_and_compute_pmc_one_season", |b| {
        b.iter(|| {
            let series = aggregate(black_box(&records), as_of).expect("aggregate");
            compute_pmc(&series, as_of, constants).expect("pmc")
        })
    });

    let series = aggregate(&records, as_of).expect("aggregate");
    c.bench_function("pmc_trajectory_one_season", |b| {
        b.iter(|| pmc_trajectory(black_box(&series), as_of, constants).expect("trajectory"))
    });
}

criterion_group!(benches, bench_strain_pmc);
criterion_main!(benches);

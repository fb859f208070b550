use chrono::{FixedOffset, TimeZone};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ganji_base::Jieqi;
use ganji_search::{LocatorConfig, SolarTermTable, TableConfig, locate, sun_longitude_at};

fn locator_bench(c: &mut Criterion) {
    let config = LocatorConfig::default();
    let when = FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 2, 4, 16, 0, 0)
        .unwrap();

    let mut group = c.benchmark_group("search_locator");
    group.bench_function("sun_longitude_at", |b| {
        b.iter(|| sun_longitude_at(black_box(&when)))
    });
    group.bench_function("locate_lichun", |b| {
        b.iter(|| {
            locate(black_box(2024), black_box(Jieqi::Lichun), &config)
                .expect("search should succeed")
        })
    });
    group.finish();
}

fn table_bench(c: &mut Criterion) {
    let config = TableConfig::default();
    let table = SolarTermTable::build(2000..=2030, &config).expect("table should build");
    let when = FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2015, 8, 1, 9, 30, 0)
        .unwrap();

    let mut group = c.benchmark_group("search_table");
    group.sample_size(10);
    group.bench_function("build_decade", |b| {
        b.iter(|| SolarTermTable::build(black_box(2010..=2019), &config).expect("table should build"))
    });
    group.bench_function("term_at_or_before", |b| {
        b.iter(|| {
            table
                .term_at_or_before(black_box(&when))
                .expect("lookup should succeed")
                .term
        })
    });
    group.finish();
}

criterion_group!(benches, locator_bench, table_bench);
criterion_main!(benches);

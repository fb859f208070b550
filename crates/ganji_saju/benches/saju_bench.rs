use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ganji_saju::{BirthMoment, PillarCalculator, SajuConfig};
use ganji_search::{SolarTermTable, TableConfig};

fn pillars_bench(c: &mut Criterion) {
    let table = SolarTermTable::build(1989..=1991, &TableConfig::default())
        .expect("table should build");
    let calc = PillarCalculator::new(&table, SajuConfig::default()).expect("valid config");
    let birth = BirthMoment::parse("1990-03-15T14:30+09:00", "male").expect("valid birth");

    let mut group = c.benchmark_group("saju");
    group.bench_function("four_pillars", |b| {
        b.iter(|| calc.four_pillars(black_box(&birth)).expect("pillars"))
    });
    group.bench_function("fortune_cycle", |b| {
        b.iter(|| calc.fortune_cycle(black_box(&birth)).expect("cycle"))
    });
    group.finish();
}

criterion_group!(benches, pillars_bench);
criterion_main!(benches);

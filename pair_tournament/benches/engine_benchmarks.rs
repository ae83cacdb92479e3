use chrono::{NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pair_tournament::{
    BracketConfig, Match, Pair, ScheduleConfig, SetScore, Zone, ZoneStandings, build_bracket,
    calculate_all, form_zones, round_robin_all, schedule_matches,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Helper to register N pairs, form zones and generate their fixtures
fn setup_group_stage(n_pairs: i64) -> (Vec<Pair>, Vec<Zone>, Vec<Match>) {
    let pairs: Vec<Pair> = (1..=n_pairs)
        .map(|i| Pair::new(i, format!("Pair {i}")))
        .collect();
    let formation = form_zones(&pairs).unwrap();
    let fixtures = round_robin_all(&formation.zones, 1);
    (formation.pairs, formation.zones, fixtures)
}

/// Helper to play every fixture, lower id winning in three sets
fn play_all(fixtures: &mut [Match]) {
    for m in fixtures.iter_mut() {
        let (a, b) = m.pairs().unwrap();
        let sets = vec![
            SetScore::new(6, 4),
            SetScore::new(3, 6),
            SetScore::new(7, 5),
        ];
        m.complete(sets, a.min(b)).unwrap();
    }
}

fn setup_tables(n_pairs: i64) -> Vec<ZoneStandings> {
    let (_, zones, mut fixtures) = setup_group_stage(n_pairs);
    play_all(&mut fixtures);
    calculate_all(&zones, &fixtures)
}

/// Benchmark zone formation with different field sizes
fn bench_form_zones(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_zones");

    for n_pairs in [12i64, 48, 96].iter() {
        let pairs: Vec<Pair> = (1..=*n_pairs)
            .map(|i| Pair::new(i, format!("Pair {i}")))
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_pairs", n_pairs)),
            &pairs,
            |b, pairs| {
                b.iter(|| form_zones(pairs));
            },
        );
    }

    group.finish();
}

/// Benchmark standings for a whole group stage
fn bench_standings(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings");

    for n_pairs in [12i64, 48, 96].iter() {
        let (_, zones, mut fixtures) = setup_group_stage(*n_pairs);
        play_all(&mut fixtures);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_pairs", n_pairs)),
            &(zones, fixtures),
            |b, (zones, fixtures)| {
                b.iter(|| calculate_all(zones, fixtures));
            },
        );
    }

    group.finish();
}

/// Benchmark the draw of a 16-pair bracket
fn bench_build_bracket(c: &mut Criterion) {
    let tables = setup_tables(24);
    let config = BracketConfig::default();

    c.bench_function("build_bracket_16", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| build_bracket(&tables, &config, &mut rng));
    });
}

/// Benchmark scheduling a full group stage onto four courts
fn bench_schedule(c: &mut Criterion) {
    let (pairs, _, fixtures) = setup_group_stage(48);
    let config = ScheduleConfig::new(
        NaiveDate::from_ymd_opt(2025, 5, 3).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        4,
    );

    c.bench_function("schedule_48_pairs", |b| {
        b.iter(|| schedule_matches(&fixtures, &pairs, &config));
    });
}

criterion_group!(
    group_stage,
    bench_form_zones,
    bench_standings,
);

criterion_group!(
    knockout,
    bench_build_bracket,
    bench_schedule,
);

criterion_main!(group_stage, knockout);

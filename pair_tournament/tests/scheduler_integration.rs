//! Integration tests for court and time scheduling

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use pair_tournament::{
    BracketConfig, Match, MatchId, Pair, PairId, ScheduleConfig, build_bracket, fair_order,
    form_zones, round_robin_all, schedule_matches,
};
use pair_tournament::standings::{Standing, ZoneStandings};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn weekend(courts: u32) -> ScheduleConfig {
    ScheduleConfig::new(
        NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(),
        NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        courts,
    )
}

fn group_fixtures(n: i64) -> (Vec<Pair>, Vec<Match>) {
    let pairs: Vec<Pair> = (1..=n).map(|i| Pair::new(i, format!("Pair {i}"))).collect();
    let formation = form_zones(&pairs).unwrap();
    let fixtures = round_robin_all(&formation.zones, 1);
    (formation.pairs, fixtures)
}

#[test]
fn test_group_stage_fits_a_weekend() {
    let (pairs, fixtures) = group_fixtures(12);
    let outcome = schedule_matches(&fixtures, &pairs, &weekend(2)).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.scheduled.len(), fixtures.len());
}

#[test]
fn test_no_court_is_double_booked() {
    let (pairs, fixtures) = group_fixtures(16);
    let outcome = schedule_matches(&fixtures, &pairs, &weekend(3)).unwrap();

    let mut seen = HashSet::new();
    for s in &outcome.scheduled {
        assert!(seen.insert((s.start, s.court)), "{:?} booked twice", s);
        assert!((1..=3).contains(&s.court));
    }
}

#[test]
fn test_every_pair_gets_its_rest() {
    let (pairs, fixtures) = group_fixtures(13);
    let config = weekend(4);
    let outcome = schedule_matches(&fixtures, &pairs, &config).unwrap();

    let by_id: HashMap<MatchId, &Match> = fixtures.iter().map(|m| (m.id, m)).collect();
    let mut per_pair: HashMap<PairId, Vec<_>> = HashMap::new();
    for s in &outcome.scheduled {
        let m = by_id[&s.match_id];
        for pair in [m.pair1_id, m.pair2_id].into_iter().flatten() {
            per_pair.entry(pair).or_default().push((s.start, s.end));
        }
    }

    for (pair, mut slots) in per_pair {
        slots.sort();
        for window in slots.windows(2) {
            assert!(
                window[1].0 - window[0].1 >= TimeDelta::minutes(60),
                "pair {pair} rests less than an hour"
            );
        }
    }
}

#[test]
fn test_overfull_weekend_reports_failures() {
    let (pairs, fixtures) = group_fixtures(30);
    // One court, one day of 3 slots
    let config = ScheduleConfig {
        end_date: NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(),
        day_end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        ..weekend(1)
    };
    let outcome = schedule_matches(&fixtures, &pairs, &config).unwrap();
    assert_eq!(outcome.scheduled.len(), 3);
    assert_eq!(
        outcome.scheduled.len() + outcome.failures.len(),
        fixtures.len()
    );
}

#[test]
fn test_group_stage_then_bracket_in_one_pass() {
    let (pairs, mut fixtures) = group_fixtures(6);

    let table = |zone_id, ids: [PairId; 3]| ZoneStandings {
        zone_id,
        rows: ids
            .iter()
            .enumerate()
            .map(|(i, &id)| Standing {
                position: i as u32 + 1,
                ..Standing::new(id)
            })
            .collect(),
        decided_matches: 3,
        complete: true,
    };
    let tables = vec![table(1, [1, 4, 5]), table(2, [2, 3, 6])];
    let config = BracketConfig {
        first_match_id: 50,
        ..BracketConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let bracket = build_bracket(&tables, &config, &mut rng).unwrap();

    fixtures.extend(bracket.matches.iter().rev().cloned());
    fair_order(&mut fixtures);
    let outcome = schedule_matches(&fixtures, &pairs, &weekend(2)).unwrap();
    assert!(outcome.is_complete());

    let last_group_end = fixtures
        .iter()
        .filter(|m| m.zone_id.is_some())
        .map(|m| outcome.get(m.id).unwrap().end)
        .max()
        .unwrap();
    let final_match = bracket.final_match().unwrap();
    let final_start = outcome.get(final_match.id).unwrap().start;
    for semi in bracket.matches.iter().filter(|m| m.id != final_match.id) {
        assert!(final_start >= outcome.get(semi.id).unwrap().end + TimeDelta::minutes(60));
    }
    assert!(final_start > last_group_end);
}

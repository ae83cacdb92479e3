/// Property-based tests for bracket generation and advancement
///
/// These tests verify bracket shape, zone separation in the first round and
/// that playing any bracket to the end crowns exactly one qualifier.
use pair_tournament::bracket::{BracketConfig, build_bracket, destination};
use pair_tournament::entities::{MatchStatus, PairId, Round, SetScore, Slot, ZoneId};
use pair_tournament::Advancement;
use pair_tournament::standings::{Standing, ZoneStandings};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn tables(zones: usize) -> Vec<ZoneStandings> {
    (1..=zones as ZoneId)
        .map(|zone_id| ZoneStandings {
            zone_id,
            rows: (1..=3)
                .map(|pos| Standing {
                    position: pos,
                    ..Standing::new(zone_id * 10 + i64::from(pos))
                })
                .collect(),
            decided_matches: 3,
            complete: true,
        })
        .collect()
}

fn zone_of(pair: PairId) -> ZoneId {
    pair / 10
}

// Zone counts that give a power-of-two field with two qualifiers each
fn power_of_two_zones() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![1usize, 2, 4, 8, 16])
}

proptest! {
    #[test]
    fn test_bracket_shape(zones in power_of_two_zones(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bracket = build_bracket(&tables(zones), &BracketConfig::default(), &mut rng).unwrap();
        let size = zones * 2;

        prop_assert_eq!(bracket.matches.len(), size - 1);
        prop_assert_eq!(bracket.rounds.last(), Some(&Round::Final));

        let first = bracket.first_round().unwrap();
        let opening = bracket.round_matches(first);
        prop_assert_eq!(opening.len(), size / 2);

        let mut entrants = HashSet::new();
        for m in &opening {
            let (a, b) = m.pairs().unwrap();
            prop_assert!(entrants.insert(a));
            prop_assert!(entrants.insert(b));
        }
        prop_assert_eq!(entrants.len(), size);

        for round in &bracket.rounds[1..] {
            for m in bracket.round_matches(*round) {
                prop_assert!(m.pair1_id.is_none() && m.pair2_id.is_none());
            }
        }
    }

    #[test]
    fn test_first_round_keeps_zone_mates_apart(
        zones in prop::sample::select(vec![2usize, 4, 8, 16]),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bracket = build_bracket(&tables(zones), &BracketConfig::default(), &mut rng).unwrap();
        let first = bracket.first_round().unwrap();

        for m in bracket.round_matches(first) {
            let (a, b) = m.pairs().unwrap();
            prop_assert_ne!(zone_of(a), zone_of(b), "zone mates meet in match {}", m.id);
        }
    }

    #[test]
    fn test_byes_fill_any_field(zones in 1usize..=16, seed in any::<u64>()) {
        let config = BracketConfig { fill_byes: true, ..BracketConfig::default() };
        let mut rng = StdRng::seed_from_u64(seed);
        let bracket = build_bracket(&tables(zones), &config, &mut rng).unwrap();

        let qualifiers = zones * 2;
        let size = qualifiers.next_power_of_two();
        prop_assert_eq!(bracket.matches.len(), size - 1);

        let first = bracket.first_round().unwrap();
        let byes = bracket
            .round_matches(first)
            .iter()
            .filter(|m| m.status == MatchStatus::Walkover)
            .count();
        prop_assert_eq!(byes, size - qualifiers);
    }

    #[test]
    fn test_playing_out_crowns_one_qualifier(zones in 1usize..=16, seed in any::<u64>()) {
        let config = BracketConfig { fill_byes: true, ..BracketConfig::default() };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bracket = build_bracket(&tables(zones), &config, &mut rng).unwrap();
        let qualifiers: HashSet<PairId> = tables(zones)
            .iter()
            .flat_map(|t| t.top(2).iter().map(|row| row.pair_id))
            .collect();

        let mut champions = Vec::new();
        for round in bracket.rounds.clone() {
            let open: Vec<i64> = bracket
                .round_matches(round)
                .iter()
                .filter(|m| m.status == MatchStatus::Scheduled)
                .map(|m| m.id)
                .collect();
            for id in open {
                let (a, b) = bracket.get(id).unwrap().pairs().unwrap();
                let winner = if rng.random_bool(0.5) { a } else { b };
                let sets = vec![SetScore::new(6, 2), SetScore::new(6, 2)];
                let advancement = bracket.record_result(id, sets, winner).unwrap();
                if let Advancement::Champion { pair_id } = advancement {
                    champions.push(pair_id);
                }
            }
        }

        prop_assert_eq!(champions.len(), 1);
        prop_assert!(qualifiers.contains(&champions[0]));
        prop_assert_eq!(bracket.champion(), Some(champions[0]));
    }

    #[test]
    fn test_destination_is_consistent(round_idx in 0usize..4, position in 1u32..=16) {
        let round = [
            Round::RoundOf32,
            Round::RoundOf16,
            Round::Quarterfinal,
            Round::Semifinal,
        ][round_idx];
        prop_assume!(position <= round.match_count());

        let dest = destination(round, position).unwrap();
        prop_assert_eq!(Some(dest.round), round.next());
        prop_assert!(dest.position <= dest.round.match_count());

        // Two feeders share a destination and take different slots
        let sibling = if position % 2 == 1 { position + 1 } else { position - 1 };
        let other = destination(round, sibling).unwrap();
        prop_assert_eq!(other.position, dest.position);
        prop_assert_ne!(other.slot, dest.slot);
        let expected = if position % 2 == 1 { Slot::Top } else { Slot::Bottom };
        prop_assert_eq!(dest.slot, expected);
    }
}

#[test]
fn test_zone_count_above_limit_is_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let config = BracketConfig { fill_byes: true, ..BracketConfig::default() };
    let err = build_bracket(&tables(17), &config, &mut rng).unwrap_err();
    assert!(err.to_string().contains("32"));
}

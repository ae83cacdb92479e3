//! Full Tournament Example
//!
//! Runs a 12-pair tournament from zone formation to the champion, printing
//! each stage along the way.

use chrono::{NaiveDate, NaiveTime};
use pair_tournament::{
    Advancement, BracketConfig, Pair, ScheduleConfig, SetScore, build_bracket, calculate_all,
    fair_order, form_zones, round_robin_all, schedule_matches,
};
use rand::Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Pair Tournament Example ===\n");

    let mut rng = rand::rng();

    // Example 1: Form zones from a registration list
    println!("Example 1: Forming zones");
    let pairs: Vec<Pair> = (1..=12)
        .map(|i| {
            let pair = Pair::new(i, format!("Pair {i}"));
            if i <= 4 { pair.with_seed(i as u32) } else { pair }
        })
        .collect();
    let formation = form_zones(&pairs)?;
    for zone in &formation.zones {
        println!("{}: {:?}", zone.name, zone.pairs);
    }
    println!();

    // Example 2: Play the group stage
    println!("Example 2: Group stage");
    let mut fixtures = round_robin_all(&formation.zones, 1);
    for m in fixtures.iter_mut() {
        let Some((a, b)) = m.pairs() else { continue };
        let winner = if rng.random_bool(0.5) { a } else { b };
        let sets = if winner == a {
            vec![SetScore::new(6, 3), SetScore::new(6, 4)]
        } else {
            vec![SetScore::new(3, 6), SetScore::new(4, 6)]
        };
        m.complete(sets, winner)?;
    }

    let tables = calculate_all(&formation.zones, &fixtures);
    for table in &tables {
        println!("Zone {}:", table.zone_id);
        for row in &table.rows {
            println!(
                "  {}. Pair {:>2}  {} pts  sets {:+}  games {:+}",
                row.position,
                row.pair_id,
                row.points,
                row.set_difference(),
                row.game_difference()
            );
        }
    }
    println!();

    // Example 3: Draw and play the bracket
    println!("Example 3: Elimination bracket");
    let config = BracketConfig {
        first_match_id: fixtures.len() as i64 + 1,
        ..BracketConfig::default()
    };
    let mut bracket = build_bracket(&tables, &config, &mut rng)?;

    for round in bracket.rounds.clone() {
        let ids: Vec<i64> = bracket.round_matches(round).iter().map(|m| m.id).collect();
        for id in ids {
            let Some((a, b)) = bracket.get(id).and_then(|m| m.pairs()) else {
                continue;
            };
            let winner = if rng.random_bool(0.5) { a } else { b };
            println!("{round}: Pair {a} vs Pair {b} -> Pair {winner}");
            let advancement =
                bracket.record_result(id, vec![SetScore::new(6, 4), SetScore::new(6, 4)], winner)?;
            if let Advancement::Champion { pair_id } = advancement {
                println!("\nChampion: Pair {pair_id}\n");
            }
        }
    }

    // Example 4: Schedule everything over a weekend
    println!("Example 4: Schedule");
    let mut all_matches = round_robin_all(&formation.zones, 1);
    all_matches.extend(build_bracket(&tables, &config, &mut rng)?.matches);
    fair_order(&mut all_matches);

    let schedule = ScheduleConfig::new(
        NaiveDate::from_ymd_opt(2025, 7, 5).ok_or("invalid date")?,
        NaiveDate::from_ymd_opt(2025, 7, 6).ok_or("invalid date")?,
        NaiveTime::from_hms_opt(9, 0, 0).ok_or("invalid time")?,
        NaiveTime::from_hms_opt(20, 0, 0).ok_or("invalid time")?,
        2,
    );
    let outcome = schedule_matches(&all_matches, &formation.pairs, &schedule)?;
    for slot in &outcome.scheduled {
        println!(
            "Match {:>2}: {} on court {}",
            slot.match_id, slot.start, slot.court
        );
    }
    if !outcome.is_complete() {
        println!("{} match(es) did not fit", outcome.failures.len());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

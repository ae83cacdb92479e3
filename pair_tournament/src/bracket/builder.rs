//! Elimination bracket generation from zone tables.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::entities::{Match, MatchId, MatchStatus, Round};
use crate::errors::{EngineError, EngineResult};
use crate::standings::ZoneStandings;

use super::advancer::advance_winner;
use super::models::{Bracket, BracketConfig, Qualifier};

/// Take the top `per_zone` rows of every table, in zone order.
pub fn select_qualifiers(tables: &[ZoneStandings], per_zone: usize) -> Vec<Qualifier> {
    tables
        .iter()
        .flat_map(|table| {
            table.top(per_zone).iter().map(move |row| Qualifier {
                pair_id: row.pair_id,
                zone_id: table.zone_id,
                zone_position: row.position,
            })
        })
        .collect()
}

/// Bracket size for `qualifiers` entrants, or an error when the field cannot
/// be laid out.
fn bracket_size(qualifiers: usize, fill_byes: bool) -> EngineResult<usize> {
    if qualifiers < 2 {
        return Err(EngineError::InvalidInput(format!(
            "Need at least 2 qualifiers for a bracket, got {qualifiers}"
        )));
    }

    let size = if qualifiers.is_power_of_two() {
        qualifiers
    } else if fill_byes {
        qualifiers.next_power_of_two()
    } else {
        return Err(EngineError::InvalidInput(format!(
            "Qualifier count {qualifiers} is not a power of two; pad with byes first"
        )));
    };

    if size > Round::MAX_BRACKET_SIZE {
        return Err(EngineError::InvalidInput(format!(
            "Bracket of {size} exceeds the maximum of {}",
            Round::MAX_BRACKET_SIZE
        )));
    }
    Ok(size)
}

/// Order in which first-round positions are handed out, so that the first
/// two pairings can only meet in the Final, the first four only from the
/// semifinals on, and so on. `order[i]` is the position of pairing `i`.
fn placement_order(matches: usize) -> Vec<u32> {
    let mut seeds: Vec<u32> = vec![1];
    while seeds.len() < matches {
        let span = seeds.len() as u32 * 2 + 1;
        seeds = seeds.iter().flat_map(|&s| [s, span - s]).collect();
    }

    let mut order = vec![0u32; matches];
    for (idx, &seed) in seeds.iter().enumerate() {
        order[seed as usize - 1] = idx as u32 + 1;
    }
    order
}

/// Pair each `top` qualifier with one from `bottom`, avoiding opponents from
/// the same zone whenever the field allows it.
fn pair_avoiding_zones(
    top: &[Qualifier],
    mut bottom: Vec<Qualifier>,
) -> Vec<(Qualifier, Qualifier)> {
    let mut pairings = Vec::with_capacity(top.len());
    for &q in top {
        let idx = bottom
            .iter()
            .position(|b| b.zone_id != q.zone_id)
            .unwrap_or(0);
        pairings.push((q, bottom.remove(idx)));
    }

    // The greedy pass can leave the last pairings stuck with a zone mate
    for i in 0..pairings.len() {
        if pairings[i].0.zone_id != pairings[i].1.zone_id {
            continue;
        }
        let swap = (0..pairings.len()).find(|&j| {
            j != i
                && pairings[i].0.zone_id != pairings[j].1.zone_id
                && pairings[j].0.zone_id != pairings[i].1.zone_id
        });
        if let Some(j) = swap {
            let taken = pairings[i].1;
            pairings[i].1 = pairings[j].1;
            pairings[j].1 = taken;
        }
    }

    pairings
}

/// Build the whole elimination bracket from the zone tables.
///
/// Qualifiers are grouped by finishing position (zone winners, runners-up,
/// ...), each group shuffled with `rng`, and the upper half of that list is
/// paired against the lower half. Byes, when enabled, go to the upper half
/// first. Every later round is generated as empty placeholders so results can
/// be advanced into them.
///
/// Pass `rand::rng()` for a fresh draw or a seeded `StdRng` to reproduce one.
///
/// # Errors
///
/// Returns `InvalidConfig` for a bad config and `InvalidInput` when the
/// qualifier count is below 2, above 32, or not a power of two without
/// `fill_byes`.
pub fn build_bracket<R: Rng + ?Sized>(
    tables: &[ZoneStandings],
    config: &BracketConfig,
    rng: &mut R,
) -> EngineResult<Bracket> {
    config.validate()?;

    let qualifiers = select_qualifiers(tables, config.qualifiers_per_zone);
    let size = bracket_size(qualifiers.len(), config.fill_byes)?;
    let rounds = Round::sequence_for(size).ok_or_else(|| {
        EngineError::InvalidInput(format!("No round layout for a bracket of {size}"))
    })?;

    let mut tiers: BTreeMap<u32, Vec<Qualifier>> = BTreeMap::new();
    for q in &qualifiers {
        tiers.entry(q.zone_position).or_default().push(*q);
    }
    let mut seeded = Vec::with_capacity(qualifiers.len());
    for tier in tiers.values_mut() {
        tier.shuffle(rng);
        seeded.extend(tier.iter().copied());
    }

    let half = size / 2;
    let byes = size - qualifiers.len();
    let (top, bottom) = seeded.split_at(half);

    let mut pairings: Vec<(Qualifier, Option<Qualifier>)> =
        top[..byes].iter().map(|&q| (q, None)).collect();
    pairings.extend(
        pair_avoiding_zones(&top[byes..], bottom.to_vec())
            .into_iter()
            .map(|(a, b)| (a, Some(b))),
    );

    let first_round = rounds[0];
    let placement = placement_order(half);
    let mut first: Vec<Match> = pairings
        .iter()
        .zip(&placement)
        .map(|((q, opponent), &position)| {
            Match::elimination(
                0,
                first_round,
                position,
                Some(q.pair_id),
                opponent.map(|o| o.pair_id),
            )
        })
        .collect();
    first.sort_by_key(|m| m.bracket_position);

    let mut next_id: MatchId = config.first_match_id;
    let mut matches = Vec::with_capacity(size - 1);
    for mut m in first {
        m.id = next_id;
        next_id += 1;
        if m.pair2_id.is_none() {
            m.winner_id = m.pair1_id;
            m.status = MatchStatus::Walkover;
        }
        matches.push(m);
    }

    let mut positions: BTreeSet<u32> = (1..=half as u32).collect();
    for &round in &rounds[1..] {
        positions = positions.iter().map(|p| p.div_ceil(2)).collect();
        for &position in &positions {
            matches.push(Match::elimination(next_id, round, position, None, None));
            next_id += 1;
        }
    }

    let byes_matches: Vec<Match> = matches
        .iter()
        .filter(|m| m.round == Some(first_round) && m.status == MatchStatus::Walkover)
        .cloned()
        .collect();
    for bye in &byes_matches {
        advance_winner(&mut matches, bye)?;
    }

    log::info!(
        "Bracket built: {} qualifiers, {} slots, {} bye(s), {} matches from {}",
        qualifiers.len(),
        size,
        byes,
        matches.len(),
        first_round
    );

    Ok(Bracket { rounds, matches })
}

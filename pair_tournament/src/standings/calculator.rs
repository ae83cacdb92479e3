//! Zone table computation.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::entities::{Match, MatchStatus, PairId, Phase, Zone};
use crate::zone::round_robin_match_count;

use super::models::{LOSS_POINTS, Standing, WALKOVER_LOSS_POINTS, WIN_POINTS, ZoneStandings};

/// Winner of the decided meeting between two pairs, keyed by (low id, high id).
/// `None` when they met more than once with different winners.
type HeadToHead = HashMap<(PairId, PairId), Option<PairId>>;

fn meeting_key(a: PairId, b: PairId) -> (PairId, PairId) {
    (a.min(b), a.max(b))
}

/// Compute the ranked table of one zone.
///
/// The table is rebuilt from `matches` on every call. Only decided group
/// matches that reference this zone and have both entrants among its members
/// count; anything else is skipped so a partially loaded match list still
/// yields a table.
///
/// Ranking, each step only consulted on a tie in the previous one:
/// 1. points
/// 2. the winner of the two pairs' own meeting
/// 3. set difference
/// 4. game difference
/// 5. games won
/// 6. member order of the zone
pub fn calculate_standings(zone: &Zone, matches: &[Match]) -> ZoneStandings {
    let mut rows: Vec<Standing> = zone.pairs.iter().map(|&id| Standing::new(id)).collect();
    let index: HashMap<PairId, usize> = zone
        .pairs
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    let mut head_to_head = HeadToHead::new();
    let mut decided = 0usize;
    let mut skipped = 0usize;

    for m in matches {
        if m.phase != Phase::Group || m.zone_id != Some(zone.id) || !m.is_decided() {
            continue;
        }

        let Some((top, bottom)) = m.pairs() else {
            skipped += 1;
            continue;
        };
        let (Some(&top_idx), Some(&bottom_idx)) = (index.get(&top), index.get(&bottom)) else {
            log::debug!(
                "Zone {}: skipping match {} with a pair outside the zone",
                zone.id,
                m.id
            );
            skipped += 1;
            continue;
        };
        let (Some(winner), Some(loser)) = (m.winner_id, m.loser()) else {
            skipped += 1;
            continue;
        };

        let (sets_top, sets_bottom) = m.set_tally();
        let (games_top, games_bottom) = m.game_tally();
        for (idx, sets_for, sets_against, games_for, games_against) in [
            (top_idx, sets_top, sets_bottom, games_top, games_bottom),
            (bottom_idx, sets_bottom, sets_top, games_bottom, games_top),
        ] {
            let row = &mut rows[idx];
            row.played += 1;
            row.sets_won += sets_for;
            row.sets_lost += sets_against;
            row.games_won += games_for;
            row.games_lost += games_against;
        }

        let loss_points = if m.status == MatchStatus::Walkover {
            WALKOVER_LOSS_POINTS
        } else {
            LOSS_POINTS
        };
        let winner_row = &mut rows[index[&winner]];
        winner_row.won += 1;
        winner_row.points += WIN_POINTS;
        let loser_row = &mut rows[index[&loser]];
        loser_row.lost += 1;
        loser_row.points += loss_points;

        head_to_head
            .entry(meeting_key(top, bottom))
            .and_modify(|w| {
                if *w != Some(winner) {
                    *w = None;
                }
            })
            .or_insert(Some(winner));
        decided += 1;
    }

    if skipped > 0 {
        log::debug!("Zone {}: {} match(es) ignored", zone.id, skipped);
    }

    rank(&mut rows, &head_to_head);

    ZoneStandings {
        zone_id: zone.id,
        rows,
        decided_matches: decided,
        complete: decided >= round_robin_match_count(zone.len()),
    }
}

/// Compute tables for every zone.
pub fn calculate_all(zones: &[Zone], matches: &[Match]) -> Vec<ZoneStandings> {
    zones
        .iter()
        .map(|zone| calculate_standings(zone, matches))
        .collect()
}

/// True once every zone's round robin is fully decided.
pub fn group_stage_complete(tables: &[ZoneStandings]) -> bool {
    tables.iter().all(|table| table.complete)
}

fn compare(a: &Standing, b: &Standing, head_to_head: &HeadToHead) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| {
            match head_to_head
                .get(&meeting_key(a.pair_id, b.pair_id))
                .copied()
                .flatten()
            {
                Some(winner) if winner == a.pair_id => Ordering::Less,
                Some(winner) if winner == b.pair_id => Ordering::Greater,
                _ => Ordering::Equal,
            }
        })
        .then_with(|| b.set_difference().cmp(&a.set_difference()))
        .then_with(|| b.game_difference().cmp(&a.game_difference()))
        .then_with(|| b.games_won.cmp(&a.games_won))
}

/// Stable insertion sort with the pairwise comparator.
///
/// The head-to-head step is not transitive (A beat B, B beat C, C beat A), so
/// the comparator is not a total order and `slice::sort_by` may panic on it.
/// Insertion sort only moves a row past a neighbour that strictly ranks below
/// it, which keeps member order for everything the cascade cannot separate.
fn rank(rows: &mut [Standing], head_to_head: &HeadToHead) {
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0 && compare(&rows[j - 1], &rows[j], head_to_head) == Ordering::Greater {
            rows.swap(j - 1, j);
            j -= 1;
        }
    }

    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = idx as u32 + 1;
    }
}

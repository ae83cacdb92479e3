//! Round-robin fixture generation.

use crate::entities::{Match, MatchId, PairId, Zone};

/// Matches a zone of `size` pairs plays: every pair meets every other once.
pub fn round_robin_match_count(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// Generate the group-phase matches of one zone.
///
/// Uses the circle method: the first pair stays fixed while the others rotate,
/// one round per rotation. An odd zone gets a phantom entrant whose opponent
/// sits the round out. Matches come out round by round, so feeding them to the
/// scheduler in this order spreads each pair's matches apart.
///
/// Match ids are assigned sequentially starting at `first_match_id`.
pub fn round_robin(zone: &Zone, first_match_id: MatchId) -> Vec<Match> {
    let mut rotation: Vec<Option<PairId>> = zone.pairs.iter().copied().map(Some).collect();
    if rotation.len() % 2 == 1 {
        rotation.push(None);
    }

    let n = rotation.len();
    let mut matches = Vec::with_capacity(round_robin_match_count(zone.len()));
    let mut next_id = first_match_id;

    for round in 0..n.saturating_sub(1) {
        for i in 0..n / 2 {
            let (home, away) = (rotation[i], rotation[n - 1 - i]);
            let (Some(home), Some(away)) = (home, away) else {
                continue;
            };
            // Alternate the fixed pair's slot so it is not always on top
            let (pair1, pair2) = if i == 0 && round % 2 == 1 {
                (away, home)
            } else {
                (home, away)
            };
            matches.push(Match::group(next_id, zone.id, pair1, pair2));
            next_id += 1;
        }
        rotation[1..].rotate_right(1);
    }

    matches
}

/// Generate fixtures for several zones, with ids running on across zones.
pub fn round_robin_all(zones: &[Zone], first_match_id: MatchId) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut next_id = first_match_id;
    for zone in zones {
        let zone_matches = round_robin(zone, next_id);
        next_id += zone_matches.len() as MatchId;
        matches.extend(zone_matches);
    }
    matches
}

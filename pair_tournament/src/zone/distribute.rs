//! Serpentine distribution of pairs into zones.

use std::collections::HashSet;

use crate::entities::{Pair, PairId, Zone, ZoneId};
use crate::errors::{EngineError, EngineResult};

use super::partition::partition_zone_sizes;

/// Zones formed from a registration list, plus the pairs with their zone set
#[derive(Debug, Clone)]
pub struct ZoneFormation {
    pub zones: Vec<Zone>,
    pub pairs: Vec<Pair>,
}

/// Order pairs for distribution: seeded pairs by ascending seed, then
/// unseeded pairs in registration order.
pub fn seeding_order(pairs: &[Pair]) -> Vec<PairId> {
    let mut ordered: Vec<&Pair> = pairs.iter().collect();
    ordered.sort_by_key(|p| (p.seed.is_none(), p.seed.unwrap_or(u32::MAX)));
    ordered.into_iter().map(|p| p.id).collect()
}

/// Assign pairs to zones in snake order.
///
/// Even passes walk the zones left to right, odd passes right to left; a zone
/// that reached its target size is skipped. With a strength-ordered input the
/// strongest pairs end up spread over different zones.
///
/// # Errors
///
/// Returns `InvalidInput` when the pair count differs from the summed zone
/// sizes, a zone size is below 2, or a pair appears twice.
pub fn distribute(entrants: &[PairId], sizes: &[usize]) -> EngineResult<Vec<Vec<PairId>>> {
    let capacity: usize = sizes.iter().sum();
    if capacity != entrants.len() {
        return Err(EngineError::InvalidInput(format!(
            "Zone sizes hold {capacity} pairs but {} were given",
            entrants.len()
        )));
    }

    if let Some(size) = sizes.iter().find(|&&s| s < 2) {
        return Err(EngineError::InvalidInput(format!(
            "Zone size must be at least 2, got {size}"
        )));
    }

    let mut seen = HashSet::with_capacity(entrants.len());
    if let Some(dup) = entrants.iter().find(|&&id| !seen.insert(id)) {
        return Err(EngineError::InvalidInput(format!(
            "Pair {dup} listed more than once"
        )));
    }

    let mut zones: Vec<Vec<PairId>> = sizes.iter().map(|&s| Vec::with_capacity(s)).collect();
    let mut remaining = entrants.iter().copied().peekable();
    let mut pass = 0usize;

    while remaining.peek().is_some() {
        let order: Vec<usize> = if pass % 2 == 0 {
            (0..zones.len()).collect()
        } else {
            (0..zones.len()).rev().collect()
        };

        for idx in order {
            if zones[idx].len() >= sizes[idx] {
                continue;
            }
            match remaining.next() {
                Some(pair_id) => zones[idx].push(pair_id),
                None => break,
            }
        }
        pass += 1;
    }

    Ok(zones)
}

/// Display name for the zone at `index` (0 → "Zone A", 26 → "Zone AA").
pub fn zone_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("Zone {}", String::from_utf8_lossy(&letters))
}

/// Partition, order and distribute a registration list in one step.
///
/// Zones are numbered from 1 in distribution order. Returned pairs keep the
/// input order and carry their new `zone_id`.
pub fn form_zones(pairs: &[Pair]) -> EngineResult<ZoneFormation> {
    let sizes = partition_zone_sizes(pairs.len())?;
    let order = seeding_order(pairs);
    let members = distribute(&order, &sizes)?;

    let zones: Vec<Zone> = members
        .into_iter()
        .enumerate()
        .map(|(idx, pairs)| Zone {
            id: idx as ZoneId + 1,
            name: zone_name(idx),
            pairs,
        })
        .collect();

    let pairs: Vec<Pair> = pairs
        .iter()
        .map(|pair| {
            let mut pair = pair.clone();
            pair.zone_id = zones.iter().find(|z| z.contains(pair.id)).map(|z| z.id);
            pair
        })
        .collect();

    log::info!(
        "Formed {} zone(s) from {} pairs: sizes {:?}",
        zones.len(),
        pairs.len(),
        sizes
    );

    Ok(ZoneFormation { zones, pairs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serpentine_pattern() {
        let entrants: Vec<PairId> = (1..=9).collect();
        let zones = distribute(&entrants, &[3, 3, 3]).unwrap();
        assert_eq!(zones[0], vec![1, 6, 7]);
        assert_eq!(zones[1], vec![2, 5, 8]);
        assert_eq!(zones[2], vec![3, 4, 9]);
    }

    #[test]
    fn test_full_zones_are_skipped() {
        // Sizes from seven pairs: [4, 3]
        let entrants: Vec<PairId> = (1..=7).collect();
        let zones = distribute(&entrants, &[4, 3]).unwrap();
        assert_eq!(zones[0], vec![1, 4, 5, 7]);
        assert_eq!(zones[1], vec![2, 3, 6]);
    }

    #[test]
    fn test_mismatched_capacity_rejected() {
        let entrants: Vec<PairId> = (1..=6).collect();
        assert!(distribute(&entrants, &[3, 4]).is_err());
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let err = distribute(&[1, 2, 3, 1], &[4]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_undersized_zone_rejected() {
        assert!(distribute(&[1, 2, 3, 4], &[3, 1]).is_err());
    }

    #[test]
    fn test_seeding_order_puts_seeds_first() {
        let pairs = vec![
            Pair::new(1, "a"),
            Pair::new(2, "b").with_seed(2),
            Pair::new(3, "c"),
            Pair::new(4, "d").with_seed(1),
        ];
        assert_eq!(seeding_order(&pairs), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_zone_names() {
        assert_eq!(zone_name(0), "Zone A");
        assert_eq!(zone_name(25), "Zone Z");
        assert_eq!(zone_name(26), "Zone AA");
        assert_eq!(zone_name(27), "Zone AB");
    }

    #[test]
    fn test_form_zones_assigns_every_pair() {
        let pairs: Vec<Pair> = (1..=7).map(|i| Pair::new(i, format!("p{i}"))).collect();
        let formation = form_zones(&pairs).unwrap();

        assert_eq!(formation.zones.len(), 2);
        assert_eq!(formation.zones[0].name, "Zone A");
        assert_eq!(formation.zones[0].len(), 4);
        assert_eq!(formation.zones[1].len(), 3);
        assert!(formation.pairs.iter().all(|p| p.zone_id.is_some()));
        assert_eq!(formation.pairs[0].id, 1);
    }
}

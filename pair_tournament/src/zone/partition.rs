//! Zone sizing policy.

use crate::errors::{EngineError, EngineResult};

/// Fewest registered pairs the group stage can be formed with
pub const MIN_ENTRANTS: usize = 4;

/// Preferred zone size
pub const TARGET_ZONE_SIZE: usize = 3;

/// Decide how many zones to form and how large each one is.
///
/// The policy is fixed: zones of 3, with a remainder of one or two pairs
/// absorbed by growing one or two zones to 4. Four pairs form a single zone of
/// 4 and five pairs form a zone of 2 next to a zone of 3.
///
/// # Errors
///
/// Returns `InvalidInput` for fewer than [`MIN_ENTRANTS`] pairs.
pub fn partition_zone_sizes(entrants: usize) -> EngineResult<Vec<usize>> {
    if entrants < MIN_ENTRANTS {
        return Err(EngineError::InvalidInput(format!(
            "Need at least {MIN_ENTRANTS} pairs to form zones, got {entrants}"
        )));
    }

    let sizes = match entrants {
        4 => vec![4],
        5 => vec![2, 3],
        _ => {
            let zones = entrants / TARGET_ZONE_SIZE;
            let enlarged = entrants % TARGET_ZONE_SIZE;
            (0..zones)
                .map(|i| {
                    if i < enlarged {
                        TARGET_ZONE_SIZE + 1
                    } else {
                        TARGET_ZONE_SIZE
                    }
                })
                .collect()
        }
    };

    Ok(sizes)
}

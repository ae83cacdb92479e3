//! Standings table rows.

use serde::{Deserialize, Serialize};

use crate::entities::{PairId, ZoneId};

/// Points for winning a match
pub const WIN_POINTS: u32 = 2;

/// Points for losing a played match
pub const LOSS_POINTS: u32 = 1;

/// Points for losing by walkover
pub const WALKOVER_LOSS_POINTS: u32 = 0;

/// One pair's row in a zone table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub pair_id: PairId,
    /// Final rank inside the zone (1-indexed)
    pub position: u32,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl Standing {
    /// Empty row for a pair that has not played yet
    pub fn new(pair_id: PairId) -> Self {
        Self {
            pair_id,
            position: 0,
            played: 0,
            won: 0,
            lost: 0,
            points: 0,
            sets_won: 0,
            sets_lost: 0,
            games_won: 0,
            games_lost: 0,
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }

    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }
}

/// Ranked table of one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStandings {
    pub zone_id: ZoneId,
    /// Rows ordered by position
    pub rows: Vec<Standing>,
    /// Decided matches that counted towards the table
    pub decided_matches: usize,
    /// Every round-robin match of the zone has been decided
    pub complete: bool,
}

impl ZoneStandings {
    /// The first `count` rows (fewer if the zone is smaller)
    pub fn top(&self, count: usize) -> &[Standing] {
        &self.rows[..count.min(self.rows.len())]
    }

    /// Row of a pair, if it is a member of the zone
    pub fn get(&self, pair_id: PairId) -> Option<&Standing> {
        self.rows.iter().find(|row| row.pair_id == pair_id)
    }

    /// Sum of points over all rows
    pub fn total_points(&self) -> u32 {
        self.rows.iter().map(|row| row.points).sum()
    }
}

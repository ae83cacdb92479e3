//! Elimination bracket data models.

use serde::{Deserialize, Serialize};

use crate::entities::{Match, MatchId, PairId, Round, Slot, ZoneId};
use crate::errors::{EngineError, EngineResult};

/// A pair that made it out of its zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub pair_id: PairId,
    pub zone_id: ZoneId,
    /// Finishing position inside the zone (1 = zone winner)
    pub zone_position: u32,
}

/// Bracket generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Pairs taken from the top of each zone table (default: 2)
    pub qualifiers_per_zone: usize,
    /// Pad a non-power-of-two field with byes instead of rejecting it
    pub fill_byes: bool,
    /// Id given to the first generated match; the rest follow sequentially
    pub first_match_id: MatchId,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            qualifiers_per_zone: 2,
            fill_byes: false,
            first_match_id: 1,
        }
    }
}

impl BracketConfig {
    /// Validate configuration
    pub fn validate(&self) -> EngineResult<()> {
        if self.qualifiers_per_zone == 0 {
            return Err(EngineError::InvalidConfig {
                field: "qualifiers_per_zone".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Where the winner of a bracket match goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub round: Round,
    pub position: u32,
    pub slot: Slot,
}

/// Destination of the winner of the match at (`round`, `position`).
///
/// Position p feeds position ⌈p/2⌉ of the next round, on top for odd p and at
/// the bottom for even p. `None` for the Final.
pub fn destination(round: Round, position: u32) -> Option<Destination> {
    let next = round.next()?;
    Some(Destination {
        round: next,
        position: position.div_ceil(2),
        slot: if position % 2 == 1 {
            Slot::Top
        } else {
            Slot::Bottom
        },
    })
}

/// Outcome of moving a winner forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advancement {
    /// Winner placed in a later match
    Advanced {
        match_id: MatchId,
        round: Round,
        position: u32,
        slot: Slot,
        pair_id: PairId,
    },
    /// The Final was decided
    Champion { pair_id: PairId },
}

/// A complete elimination bracket, every round generated up front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Rounds from the first one to the Final
    pub rounds: Vec<Round>,
    /// All matches ordered by round, then position
    pub matches: Vec<Match>,
}

impl Bracket {
    pub fn first_round(&self) -> Option<Round> {
        self.rounds.first().copied()
    }

    /// Match at (`round`, `position`)
    pub fn find(&self, round: Round, position: u32) -> Option<&Match> {
        self.matches
            .iter()
            .find(|m| m.round == Some(round) && m.bracket_position == Some(position))
    }

    pub fn get(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn get_mut(&mut self, match_id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Matches of one round in position order
    pub fn round_matches(&self, round: Round) -> Vec<&Match> {
        let mut matches: Vec<&Match> = self
            .matches
            .iter()
            .filter(|m| m.round == Some(round))
            .collect();
        matches.sort_by_key(|m| m.bracket_position);
        matches
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.find(Round::Final, 1)
    }

    /// Winner of the Final once it is decided
    pub fn champion(&self) -> Option<PairId> {
        self.final_match()
            .filter(|m| m.is_decided())
            .and_then(|m| m.winner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_parity() {
        let d1 = destination(Round::Quarterfinal, 1).unwrap();
        let d2 = destination(Round::Quarterfinal, 2).unwrap();
        assert_eq!(d1.round, Round::Semifinal);
        assert_eq!(d1.position, 1);
        assert_eq!(d2.position, 1);
        assert_eq!(d1.slot, Slot::Top);
        assert_eq!(d2.slot, Slot::Bottom);

        let d7 = destination(Round::RoundOf16, 7).unwrap();
        assert_eq!(d7.position, 4);
        assert_eq!(d7.slot, Slot::Top);
    }

    #[test]
    fn test_final_has_no_destination() {
        assert_eq!(destination(Round::Final, 1), None);
    }

    #[test]
    fn test_config_validation() {
        assert!(BracketConfig::default().validate().is_ok());
        let config = BracketConfig {
            qualifiers_per_zone: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_advancement_json_shape() {
        let json = serde_json::to_value(Advancement::Champion { pair_id: 4 }).unwrap();
        assert_eq!(json["kind"], "champion");
        assert_eq!(json["pair_id"], 4);
    }
}

//! Data contract shared with the surrounding application.
//!
//! Pairs, zones and matches are owned by the caller's persistence layer; the
//! engine reads them, derives new values from them and mutates matches only
//! through the lifecycle methods below and the bracket advancer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{EngineError, EngineResult};

/// Pair (entrant) ID type
pub type PairId = i64;

/// Zone ID type
pub type ZoneId = i64;

/// Match ID type
pub type MatchId = i64;

/// A registered pair-entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    /// Display name, only used for logs and reports
    #[serde(default)]
    pub name: String,
    /// Zone assigned by the distributor
    #[serde(default)]
    pub zone_id: Option<ZoneId>,
    /// Seed (1 = strongest), if the organiser ranked the pair
    #[serde(default)]
    pub seed: Option<u32>,
}

impl Pair {
    pub fn new(id: PairId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            zone_id: None,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A round-robin group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    /// Members in distribution order
    pub pairs: Vec<PairId>,
}

impl Zone {
    pub fn contains(&self, pair_id: PairId) -> bool {
        self.pairs.contains(&pair_id)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Tournament phase a match belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Group,
    Elimination,
}

/// Match lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    /// Decided without play (forfeit or bye)
    Walkover,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Walkover => write!(f, "walkover"),
        }
    }
}

/// Elimination round label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "round-of-32")]
    RoundOf32,
    #[serde(rename = "round-of-16")]
    RoundOf16,
    #[serde(rename = "quarterfinal")]
    Quarterfinal,
    #[serde(rename = "semifinal")]
    Semifinal,
    #[serde(rename = "final")]
    Final,
}

impl Round {
    /// Largest bracket the engine lays out
    pub const MAX_BRACKET_SIZE: usize = 32;

    /// Round sequence for a bracket holding `entrants` slots.
    ///
    /// Returns `None` when the bracket would need more than 32 slots or has no
    /// entrants at all.
    pub fn sequence_for(entrants: usize) -> Option<Vec<Round>> {
        let first = match entrants {
            0 => return None,
            1..=2 => Round::Final,
            3..=4 => Round::Semifinal,
            5..=8 => Round::Quarterfinal,
            9..=16 => Round::RoundOf16,
            17..=32 => Round::RoundOf32,
            _ => return None,
        };

        let mut rounds = vec![first];
        let mut current = first;
        while let Some(next) = current.next() {
            rounds.push(next);
            current = next;
        }
        Some(rounds)
    }

    /// Round the winners of this round play in, `None` after the Final.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::RoundOf32 => Some(Round::RoundOf16),
            Round::RoundOf16 => Some(Round::Quarterfinal),
            Round::Quarterfinal => Some(Round::Semifinal),
            Round::Semifinal => Some(Round::Final),
            Round::Final => None,
        }
    }

    /// Round feeding this one, `None` for the largest round.
    pub fn previous(self) -> Option<Round> {
        match self {
            Round::RoundOf32 => None,
            Round::RoundOf16 => Some(Round::RoundOf32),
            Round::Quarterfinal => Some(Round::RoundOf16),
            Round::Semifinal => Some(Round::Quarterfinal),
            Round::Final => Some(Round::Semifinal),
        }
    }

    /// Number of matches in a full round
    pub fn match_count(self) -> u32 {
        match self {
            Round::RoundOf32 => 16,
            Round::RoundOf16 => 8,
            Round::Quarterfinal => 4,
            Round::Semifinal => 2,
            Round::Final => 1,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::RoundOf32 => write!(f, "round-of-32"),
            Round::RoundOf16 => write!(f, "round-of-16"),
            Round::Quarterfinal => write!(f, "quarterfinal"),
            Round::Semifinal => write!(f, "semifinal"),
            Round::Final => write!(f, "final"),
        }
    }
}

/// Entrant slot inside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// `pair1_id`
    Top,
    /// `pair2_id`
    Bottom,
}

/// Games won by each side in one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub pair1_games: u8,
    pub pair2_games: u8,
}

impl SetScore {
    pub fn new(pair1_games: u8, pair2_games: u8) -> Self {
        Self {
            pair1_games,
            pair2_games,
        }
    }
}

/// A group or elimination match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Top slot, `None` while undetermined or for a bye
    pub pair1_id: Option<PairId>,
    /// Bottom slot, `None` while undetermined or for a bye
    pub pair2_id: Option<PairId>,
    pub phase: Phase,
    /// Group phase only
    #[serde(default)]
    pub zone_id: Option<ZoneId>,
    /// Elimination phase only
    #[serde(default)]
    pub round: Option<Round>,
    /// 1-based index within the round, elimination phase only
    #[serde(default)]
    pub bracket_position: Option<u32>,
    #[serde(default)]
    pub sets: Vec<SetScore>,
    #[serde(default)]
    pub winner_id: Option<PairId>,
    pub status: MatchStatus,
}

impl Match {
    /// Create a scheduled group-phase match
    pub fn group(id: MatchId, zone_id: ZoneId, pair1_id: PairId, pair2_id: PairId) -> Self {
        Self {
            id,
            pair1_id: Some(pair1_id),
            pair2_id: Some(pair2_id),
            phase: Phase::Group,
            zone_id: Some(zone_id),
            round: None,
            bracket_position: None,
            sets: Vec::new(),
            winner_id: None,
            status: MatchStatus::Scheduled,
        }
    }

    /// Create a scheduled elimination match
    pub fn elimination(
        id: MatchId,
        round: Round,
        bracket_position: u32,
        pair1_id: Option<PairId>,
        pair2_id: Option<PairId>,
    ) -> Self {
        Self {
            id,
            pair1_id,
            pair2_id,
            phase: Phase::Elimination,
            zone_id: None,
            round: Some(round),
            bracket_position: Some(bracket_position),
            sets: Vec::new(),
            winner_id: None,
            status: MatchStatus::Scheduled,
        }
    }

    pub fn pair_in(&self, slot: Slot) -> Option<PairId> {
        match slot {
            Slot::Top => self.pair1_id,
            Slot::Bottom => self.pair2_id,
        }
    }

    pub fn set_pair(&mut self, slot: Slot, pair_id: Option<PairId>) {
        match slot {
            Slot::Top => self.pair1_id = pair_id,
            Slot::Bottom => self.pair2_id = pair_id,
        }
    }

    /// Slot held by `pair_id`, if the pair plays in this match
    pub fn slot_of(&self, pair_id: PairId) -> Option<Slot> {
        if self.pair1_id == Some(pair_id) {
            Some(Slot::Top)
        } else if self.pair2_id == Some(pair_id) {
            Some(Slot::Bottom)
        } else {
            None
        }
    }

    pub fn involves(&self, pair_id: PairId) -> bool {
        self.slot_of(pair_id).is_some()
    }

    /// Both concrete entrants, when both slots are filled
    pub fn pairs(&self) -> Option<(PairId, PairId)> {
        Some((self.pair1_id?, self.pair2_id?))
    }

    /// Completed or walked over with a recorded winner
    pub fn is_decided(&self) -> bool {
        matches!(
            self.status,
            MatchStatus::Completed | MatchStatus::Walkover
        ) && self.winner_id.is_some()
    }

    /// The other side of a decided match
    pub fn loser(&self) -> Option<PairId> {
        if !self.is_decided() {
            return None;
        }
        match self.winner_id.and_then(|w| self.slot_of(w))? {
            Slot::Top => self.pair2_id,
            Slot::Bottom => self.pair1_id,
        }
    }

    /// Sets won by (top, bottom). Sets with equal games count for nobody.
    pub fn set_tally(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(top, bottom), set| {
            match set.pair1_games.cmp(&set.pair2_games) {
                std::cmp::Ordering::Greater => (top + 1, bottom),
                std::cmp::Ordering::Less => (top, bottom + 1),
                std::cmp::Ordering::Equal => (top, bottom),
            }
        })
    }

    /// Games won by (top, bottom) across all sets
    pub fn game_tally(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(top, bottom), set| {
            (
                top + u32::from(set.pair1_games),
                bottom + u32::from(set.pair2_games),
            )
        })
    }

    /// scheduled → in_progress
    pub fn start(&mut self) -> EngineResult<()> {
        if self.status != MatchStatus::Scheduled {
            return Err(self.invalid_state("start"));
        }
        if self.pairs().is_none() {
            return Err(EngineError::InvalidInput(format!(
                "Match {} cannot start before both entrants are known",
                self.id
            )));
        }
        self.status = MatchStatus::InProgress;
        Ok(())
    }

    /// scheduled | in_progress → completed
    pub fn complete(&mut self, sets: Vec<SetScore>, winner_id: PairId) -> EngineResult<()> {
        self.ensure_open("complete")?;
        self.ensure_participant(winner_id)?;
        self.sets = sets;
        self.winner_id = Some(winner_id);
        self.status = MatchStatus::Completed;
        Ok(())
    }

    /// scheduled | in_progress → walkover
    pub fn record_walkover(&mut self, winner_id: PairId) -> EngineResult<()> {
        self.ensure_open("record a walkover for")?;
        self.ensure_participant(winner_id)?;
        self.winner_id = Some(winner_id);
        self.status = MatchStatus::Walkover;
        Ok(())
    }

    fn ensure_open(&self, action: &'static str) -> EngineResult<()> {
        match self.status {
            MatchStatus::Scheduled | MatchStatus::InProgress => Ok(()),
            _ => Err(self.invalid_state(action)),
        }
    }

    fn ensure_participant(&self, winner_id: PairId) -> EngineResult<()> {
        if self.involves(winner_id) {
            Ok(())
        } else {
            Err(EngineError::InvalidInput(format!(
                "Winner {} does not play in match {}",
                winner_id, self.id
            )))
        }
    }

    fn invalid_state(&self, action: &'static str) -> EngineError {
        EngineError::InvalidState {
            match_id: self.id,
            actual: self.status,
            action,
        }
    }
}

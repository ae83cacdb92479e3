//! Moving winners through the bracket.

use crate::entities::{Match, MatchId, MatchStatus, PairId, Phase, SetScore};
use crate::errors::{EngineError, EngineResult};

use super::models::{Advancement, Bracket, destination};

/// Place the winner of `completed` into its next-round slot.
///
/// The destination match must already exist in `matches` (the builder
/// generates every round up front); a missing one is reported as
/// `BracketSlotNotFound`. Only the destination slot is written. Re-advancing
/// the same winner is a no-op. A slot held by a different pair is only
/// replaced while the destination match has not started, which covers a
/// corrected result.
///
/// # Errors
///
/// - `InvalidInput` if `completed` is not a bracket match or its winner does
///   not play in it
/// - `InvalidState` if `completed` is not decided, or the destination slot is
///   taken by another pair in a match that already started
/// - `BracketSlotNotFound` if the destination match was never generated
pub fn advance_winner(matches: &mut [Match], completed: &Match) -> EngineResult<Advancement> {
    let (Phase::Elimination, Some(round), Some(position)) =
        (completed.phase, completed.round, completed.bracket_position)
    else {
        return Err(EngineError::InvalidInput(format!(
            "Match {} is not a bracket match",
            completed.id
        )));
    };

    if !completed.is_decided() {
        return Err(EngineError::InvalidState {
            match_id: completed.id,
            actual: completed.status,
            action: "advance the winner of",
        });
    }

    let winner = completed
        .winner_id
        .filter(|&w| completed.involves(w))
        .ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "Winner of match {} does not play in it",
                completed.id
            ))
        })?;

    let Some(dest) = destination(round, position) else {
        log::info!("Final {} decided, champion is pair {}", completed.id, winner);
        return Ok(Advancement::Champion { pair_id: winner });
    };

    let next = matches
        .iter_mut()
        .find(|m| {
            m.phase == Phase::Elimination
                && m.round == Some(dest.round)
                && m.bracket_position == Some(dest.position)
        })
        .ok_or(EngineError::BracketSlotNotFound {
            round: dest.round,
            position: dest.position,
        })?;

    match next.pair_in(dest.slot) {
        Some(current) if current == winner => {}
        Some(current) => {
            if next.status != MatchStatus::Scheduled {
                return Err(EngineError::InvalidState {
                    match_id: next.id,
                    actual: next.status,
                    action: "replace an entrant of",
                });
            }
            log::warn!(
                "Match {}: replacing pair {} with {} after a corrected result in match {}",
                next.id,
                current,
                winner,
                completed.id
            );
            next.set_pair(dest.slot, Some(winner));
        }
        None => next.set_pair(dest.slot, Some(winner)),
    }

    log::debug!(
        "Pair {} advances from {} #{} to {} #{} ({:?})",
        winner,
        round,
        position,
        dest.round,
        dest.position,
        dest.slot
    );

    Ok(Advancement::Advanced {
        match_id: next.id,
        round: dest.round,
        position: dest.position,
        slot: dest.slot,
        pair_id: winner,
    })
}

/// Replay every decided bracket match, earliest round first.
///
/// Rebuilds slot contents from results alone, e.g. after updates arrived out
/// of order.
pub fn advance_all(matches: &mut [Match]) -> EngineResult<Vec<Advancement>> {
    let mut order: Vec<(MatchId, _, _)> = matches
        .iter()
        .filter(|m| m.phase == Phase::Elimination)
        .map(|m| (m.id, m.round, m.bracket_position))
        .collect();
    order.sort_by_key(|&(_, round, position)| (round, position));

    let mut advancements = Vec::new();
    for (match_id, _, _) in order {
        let Some(completed) = matches.iter().find(|m| m.id == match_id).cloned() else {
            continue;
        };
        if !completed.is_decided() {
            continue;
        }
        advancements.push(advance_winner(matches, &completed)?);
    }
    Ok(advancements)
}

impl Bracket {
    /// Advance the winner of the bracket match `match_id`.
    pub fn advance(&mut self, match_id: MatchId) -> EngineResult<Advancement> {
        let completed = self
            .get(match_id)
            .cloned()
            .ok_or(EngineError::MatchNotFound(match_id))?;
        advance_winner(&mut self.matches, &completed)
    }

    /// Record a result for `match_id` and advance its winner.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        sets: Vec<SetScore>,
        winner_id: PairId,
    ) -> EngineResult<Advancement> {
        self.get_mut(match_id)
            .ok_or(EngineError::MatchNotFound(match_id))?
            .complete(sets, winner_id)?;
        self.advance(match_id)
    }
}

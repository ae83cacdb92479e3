//! Greedy court and time assignment.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entities::{Match, MatchId, MatchStatus, Pair, PairId, Phase, Round};
use crate::errors::{EngineError, EngineResult};

use super::config::ScheduleConfig;

/// A match with its assigned start and court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub match_id: MatchId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// 1-based court number
    pub court: u32,
}

/// Why a match could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Every remaining slot is either full or too close to a pair's previous
    /// match
    NoAvailableSlot,
}

/// A match left without a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingFailure {
    pub match_id: MatchId,
    pub reason: FailureReason,
}

/// Result of one scheduling pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub scheduled: Vec<ScheduledMatch>,
    pub failures: Vec<SchedulingFailure>,
}

impl ScheduleOutcome {
    /// Every submitted match got a slot
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn get(&self, match_id: MatchId) -> Option<&ScheduledMatch> {
        self.scheduled.iter().find(|s| s.match_id == match_id)
    }
}

/// Recommended submission order for [`schedule_matches`]: group matches
/// before bracket matches, bracket matches by round, then zone, then id.
pub fn fair_order(matches: &mut [Match]) {
    matches.sort_by_key(|m| (m.phase == Phase::Elimination, m.round, m.zone_id, m.id));
}

/// Assign a start time and court to every match that still needs one.
///
/// Single first-fit pass in the order given: for each match, days in order,
/// slots within the day in order, courts 1..=N; the first free court in the
/// first slot where every known entrant has had the configured rest since
/// their previous match wins. The order of `matches` therefore shapes the
/// result; see [`fair_order`].
///
/// A bracket match whose entrants are not known yet is placed after the
/// matches that feed it, when those are part of the same pass. Matches that
/// are already in progress, completed or walked over are skipped. Matches
/// that do not fit are listed in `failures`.
///
/// `pairs` is the registered field; a match naming an unregistered pair is
/// still scheduled.
///
/// # Errors
///
/// Returns `InvalidConfig` if `config` does not validate and `InvalidInput`
/// for a bracket match without a round or with a position outside
/// 1..=matches-in-round.
pub fn schedule_matches(
    matches: &[Match],
    pairs: &[Pair],
    config: &ScheduleConfig,
) -> EngineResult<ScheduleOutcome> {
    schedule_after(matches, pairs, config, &[], &[])
}

/// Like [`schedule_matches`], around bookings made by an earlier pass.
///
/// Every entry of `booked` keeps its court and time. When its match is found
/// in `earlier`, its entrants rest from its end and, for a bracket match, its
/// successor waits for it. This lets a bracket be scheduled after the group
/// stage without reusing its courts.
///
/// # Errors
///
/// Same as [`schedule_matches`].
pub fn schedule_after(
    matches: &[Match],
    pairs: &[Pair],
    config: &ScheduleConfig,
    earlier: &[Match],
    booked: &[ScheduledMatch],
) -> EngineResult<ScheduleOutcome> {
    config.validate()?;
    for m in matches.iter().chain(earlier) {
        bracket_key(m)?;
    }

    let slots = config.slots();
    let duration = config.match_duration();
    let rest = config.min_rest();

    let registered: HashSet<PairId> = pairs.iter().map(|p| p.id).collect();
    let mut last_end: HashMap<PairId, NaiveDateTime> = HashMap::with_capacity(pairs.len());
    let mut occupied: HashSet<(NaiveDateTime, u32)> = HashSet::new();
    let mut bracket_end: HashMap<(Round, u32), NaiveDateTime> = HashMap::new();
    let mut outcome = ScheduleOutcome::default();

    for booking in booked {
        occupied.insert((booking.start, booking.court));
        let Some(m) = earlier.iter().find(|m| m.id == booking.match_id) else {
            log::debug!("Booking for match {} has no match record", booking.match_id);
            continue;
        };
        for pair_id in [m.pair1_id, m.pair2_id].into_iter().flatten() {
            let end = last_end.entry(pair_id).or_insert(booking.end);
            *end = (*end).max(booking.end);
        }
        if let Some(key) = bracket_key(m)? {
            bracket_end.insert(key, booking.end);
        }
    }

    for m in matches {
        if m.status != MatchStatus::Scheduled {
            continue;
        }

        let entrants: Vec<PairId> = [m.pair1_id, m.pair2_id].into_iter().flatten().collect();
        for pair_id in &entrants {
            if !registered.contains(pair_id) {
                log::debug!("Match {}: pair {} is not registered", m.id, pair_id);
            }
        }

        let mut not_before: Option<NaiveDateTime> = entrants
            .iter()
            .filter_map(|p| last_end.get(p))
            .max()
            .map(|&end| end + rest);
        for end in feeders(m).iter().filter_map(|key| bracket_end.get(key)) {
            let earliest = *end + rest;
            not_before = Some(not_before.map_or(earliest, |nb| nb.max(earliest)));
        }

        let placement = slots
            .iter()
            .filter(|&&slot| not_before.is_none_or(|nb| slot >= nb))
            .find_map(|&slot| {
                (1..=config.court_count)
                    .find(|&court| !occupied.contains(&(slot, court)))
                    .map(|court| (slot, court))
            });

        let Some((start, court)) = placement else {
            log::warn!("Match {}: no slot available", m.id);
            outcome.failures.push(SchedulingFailure {
                match_id: m.id,
                reason: FailureReason::NoAvailableSlot,
            });
            continue;
        };

        let end = start + duration;
        occupied.insert((start, court));
        for pair_id in entrants {
            last_end.insert(pair_id, end);
        }
        if let Some(key) = bracket_key(m)? {
            bracket_end.insert(key, end);
        }

        outcome.scheduled.push(ScheduledMatch {
            match_id: m.id,
            start,
            end,
            court,
        });
    }

    log::info!(
        "Scheduled {} match(es) on {} court(s), {} could not be placed",
        outcome.scheduled.len(),
        config.court_count,
        outcome.failures.len()
    );

    Ok(outcome)
}

/// (round, position) of a bracket match, `None` for a group match.
fn bracket_key(m: &Match) -> EngineResult<Option<(Round, u32)>> {
    if m.phase != Phase::Elimination {
        return Ok(None);
    }
    match (m.round, m.bracket_position) {
        (Some(round), Some(position)) if (1..=round.match_count()).contains(&position) => {
            Ok(Some((round, position)))
        }
        (round, position) => Err(EngineError::InvalidInput(format!(
            "Bracket match {} has no valid round and position ({round:?}, {position:?})",
            m.id
        ))),
    }
}

/// Bracket keys of the two matches whose winners meet in `m`.
///
/// `m` must have passed [`bracket_key`].
fn feeders(m: &Match) -> Vec<(Round, u32)> {
    match (m.phase, m.round.and_then(Round::previous), m.bracket_position) {
        (Phase::Elimination, Some(previous), Some(position)) => {
            vec![(previous, position * 2 - 1), (previous, position * 2)]
        }
        _ => Vec::new(),
    }
}

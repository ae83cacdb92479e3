//! Planner commands. Each takes parsed JSON input and returns the JSON
//! document printed on stdout.

use anyhow::{Context, bail};
use log::{info, warn};
use pair_tournament::{
    Advancement, Bracket, Match, MatchId, Pair, ScheduleOutcome, Zone, ZoneStandings,
    build_bracket, calculate_all, fair_order, form_zones, round_robin_all, schedule_after,
    schedule_matches, standings::group_stage_complete,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;

/// Output of `groups`
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupsOutput {
    pub zones: Vec<Zone>,
    pub pairs: Vec<Pair>,
    pub matches: Vec<Match>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleOutcome>,
}

/// Zones and their group matches, input of `standings` and `bracket`
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupStage {
    pub zones: Vec<Zone>,
    pub matches: Vec<Match>,
    #[serde(default)]
    pub pairs: Vec<Pair>,
    /// Group schedule from `groups`; the bracket is booked around it
    #[serde(default)]
    pub schedule: Option<ScheduleOutcome>,
}

/// Output of `standings`
#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsOutput {
    pub standings: Vec<ZoneStandings>,
    pub complete: bool,
}

/// Output of `bracket`
#[derive(Debug, Serialize, Deserialize)]
pub struct BracketOutput {
    pub standings: Vec<ZoneStandings>,
    pub bracket: Bracket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleOutcome>,
}

/// Output of `advance`
#[derive(Debug, Serialize, Deserialize)]
pub struct AdvanceOutput {
    pub advancement: Advancement,
    pub bracket: Bracket,
}

/// Form zones from a registration list and generate the group fixtures.
pub fn groups(pairs: Vec<Pair>, config: &PlannerConfig) -> anyhow::Result<GroupsOutput> {
    let formation = form_zones(&pairs).context("Failed to form zones")?;
    let matches = round_robin_all(&formation.zones, 1);
    info!("Generated {} group matches", matches.len());

    let schedule = match &config.schedule {
        Some(schedule) => Some(schedule_matches(&matches, &formation.pairs, schedule)?),
        None => None,
    };

    Ok(GroupsOutput {
        zones: formation.zones,
        pairs: formation.pairs,
        matches,
        schedule,
    })
}

/// Compute every zone table.
pub fn standings(stage: &GroupStage) -> StandingsOutput {
    let standings = calculate_all(&stage.zones, &stage.matches);
    let complete = group_stage_complete(&standings);
    StandingsOutput {
        standings,
        complete,
    }
}

/// Draw the bracket once every zone has finished.
///
/// Bracket match ids continue after the highest group match id. When the
/// input carries the group schedule, bracket matches keep off its courts and
/// each pair rests after its last group match.
pub fn bracket<R: Rng + ?Sized>(
    stage: &GroupStage,
    config: &PlannerConfig,
    rng: &mut R,
) -> anyhow::Result<BracketOutput> {
    let tables = calculate_all(&stage.zones, &stage.matches);
    if !group_stage_complete(&tables) {
        bail!("Group stage is not finished; every zone match needs a result first");
    }

    let mut bracket_config = config.bracket.clone();
    if let Some(last) = stage.matches.iter().map(|m| m.id).max() {
        bracket_config.first_match_id = last + 1;
    }
    let bracket =
        build_bracket(&tables, &bracket_config, rng).context("Failed to build the bracket")?;

    let schedule = match &config.schedule {
        Some(schedule) => {
            let mut pending = bracket.matches.clone();
            fair_order(&mut pending);
            let outcome = match &stage.schedule {
                Some(group) => schedule_after(
                    &pending,
                    &stage.pairs,
                    schedule,
                    &stage.matches,
                    &group.scheduled,
                )?,
                None => {
                    warn!("No group schedule in the input, bracket courts start empty");
                    schedule_matches(&pending, &stage.pairs, schedule)?
                }
            };
            Some(outcome)
        }
        None => None,
    };

    Ok(BracketOutput {
        standings: tables,
        bracket,
        schedule,
    })
}

/// Move the winner of a decided bracket match forward.
pub fn advance(mut bracket: Bracket, match_id: MatchId) -> anyhow::Result<AdvanceOutput> {
    let advancement = bracket
        .advance(match_id)
        .with_context(|| format!("Failed to advance match {match_id}"))?;

    match advancement {
        Advancement::Champion { pair_id } => info!("Pair {pair_id} won the tournament"),
        Advancement::Advanced {
            match_id: next,
            pair_id,
            ..
        } => info!("Pair {pair_id} moved into match {next}"),
    }

    Ok(AdvanceOutput {
        advancement,
        bracket,
    })
}

//! # Pair Tournament
//!
//! Progression engine for pair tournaments: a group stage played in small
//! round-robin zones, followed by a single-elimination bracket.
//!
//! The engine is pure: it takes entities in and hands entities back. Storage,
//! notifications and user interfaces live with the caller.
//!
//! ## Tournament lifecycle
//!
//! - **Zones**: registered pairs are split into zones of 3 (4 where needed)
//!   and distributed serpentine-style by seed
//! - **Group stage**: every pair in a zone meets every other pair once
//! - **Standings**: zone tables ranked by points, head-to-head, set and game
//!   difference
//! - **Bracket**: the top finishers of each zone are drawn into a bracket that
//!   keeps zone-mates apart in the first round
//! - **Advancement**: winners move into their next-round slot until a champion
//!   remains
//! - **Scheduling**: matches are assigned courts and start times at any point
//!
//! ## Core Modules
//!
//! - [`zone`]: zone partitioning, serpentine distribution and fixtures
//! - [`standings`]: zone tables and tie-breaking
//! - [`bracket`]: qualifier draw and winner advancement
//! - [`schedule`]: court and time assignment
//!
//! ## Example
//!
//! ```
//! use pair_tournament::{Pair, form_zones, round_robin_all};
//!
//! let pairs: Vec<Pair> = (1..=7).map(|i| Pair::new(i, format!("Pair {i}"))).collect();
//! let formation = form_zones(&pairs).unwrap();
//! assert_eq!(formation.zones.len(), 2);
//!
//! let fixtures = round_robin_all(&formation.zones, 1);
//! assert_eq!(fixtures.len(), 6 + 3);
//! ```

/// Elimination bracket generation and advancement.
pub mod bracket;

/// Core tournament entities.
pub mod entities;

pub mod errors;

/// Court and time scheduling.
pub mod schedule;

/// Zone standings and tie-breaking.
pub mod standings;

/// Zone formation and group-stage fixtures.
pub mod zone;

pub use bracket::{
    Advancement, Bracket, BracketConfig, advance_all, advance_winner, build_bracket,
    select_qualifiers,
};
pub use entities::{
    Match, MatchId, MatchStatus, Pair, PairId, Phase, Round, SetScore, Slot, Zone, ZoneId,
};
pub use errors::{EngineError, EngineResult};
pub use schedule::{
    ScheduleConfig, ScheduleOutcome, ScheduledMatch, fair_order, schedule_after, schedule_matches,
};
pub use standings::{Standing, ZoneStandings, calculate_all, calculate_standings};
pub use zone::{ZoneFormation, form_zones, partition_zone_sizes, round_robin_all};

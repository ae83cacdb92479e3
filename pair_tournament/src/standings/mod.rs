//! Zone standings.
//!
//! Tables are a pure function of a zone and its matches: nothing is cached
//! between calls, so recomputing after an out-of-order result update always
//! yields the correct table.
//!
//! Scoring is 2 points for a win, 1 for a played loss and 0 for a walkover
//! loss. Because of the walkover case, a zone's point total is not a fixed
//! multiple of its decided matches.

pub mod calculator;
pub mod models;

pub use calculator::{calculate_all, calculate_standings, group_stage_complete};
pub use models::{LOSS_POINTS, Standing, WALKOVER_LOSS_POINTS, WIN_POINTS, ZoneStandings};

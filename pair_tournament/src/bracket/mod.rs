//! Elimination bracket.
//!
//! This module provides:
//! - Qualifier selection from zone tables
//! - Bracket generation with every round laid out up front
//! - Winner advancement into the next round's slots
//!
//! ## Example
//!
//! ```
//! use pair_tournament::bracket::{BracketConfig, build_bracket};
//! use pair_tournament::entities::{Round, SetScore};
//! use pair_tournament::standings::{Standing, ZoneStandings};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let table = |zone_id: i64, ids: [i64; 3]| ZoneStandings {
//!     zone_id,
//!     rows: ids
//!         .iter()
//!         .enumerate()
//!         .map(|(i, &id)| Standing { position: i as u32 + 1, ..Standing::new(id) })
//!         .collect(),
//!     decided_matches: 3,
//!     complete: true,
//! };
//!
//! let tables = vec![table(1, [11, 12, 13]), table(2, [21, 22, 23])];
//! let mut rng = StdRng::seed_from_u64(2024);
//! let mut bracket = build_bracket(&tables, &BracketConfig::default(), &mut rng).unwrap();
//! assert_eq!(bracket.rounds, vec![Round::Semifinal, Round::Final]);
//!
//! let semi = bracket.round_matches(Round::Semifinal)[0].clone();
//! let (winner, _) = semi.pairs().unwrap();
//! bracket.record_result(semi.id, vec![SetScore::new(6, 4), SetScore::new(6, 4)], winner).unwrap();
//! assert!(bracket.final_match().unwrap().involves(winner));
//! ```

pub mod advancer;
pub mod builder;
pub mod models;

pub use advancer::{advance_all, advance_winner};
pub use builder::{build_bracket, select_qualifiers};
pub use models::{Advancement, Bracket, BracketConfig, Destination, Qualifier, destination};

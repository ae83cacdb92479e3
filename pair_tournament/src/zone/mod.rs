//! Group stage formation.
//!
//! This module turns a registration list into round-robin zones:
//! - Zone sizing ([`partition_zone_sizes`])
//! - Serpentine assignment of pairs to zones ([`distribute`], [`form_zones`])
//! - Round-robin fixtures for each zone ([`round_robin`])
//!
//! ## Example
//!
//! ```
//! use pair_tournament::entities::Pair;
//! use pair_tournament::zone::{form_zones, round_robin_all};
//!
//! let pairs: Vec<Pair> = (1..=12).map(|i| Pair::new(i, format!("Pair {i}"))).collect();
//! let formation = form_zones(&pairs).unwrap();
//! assert_eq!(formation.zones.len(), 4);
//!
//! let fixtures = round_robin_all(&formation.zones, 1);
//! assert_eq!(fixtures.len(), 12);
//! ```

pub mod distribute;
pub mod fixtures;
pub mod partition;

pub use distribute::{ZoneFormation, distribute, form_zones, seeding_order, zone_name};
pub use fixtures::{round_robin, round_robin_all, round_robin_match_count};
pub use partition::{MIN_ENTRANTS, TARGET_ZONE_SIZE, partition_zone_sizes};

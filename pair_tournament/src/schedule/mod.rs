//! Court and time scheduling.
//!
//! The scheduler is a deterministic first-fit heuristic, not an optimiser:
//! the same matches in the same order always produce the same schedule, and a
//! different order may produce a different one. Matches that cannot be placed
//! come back as data so the caller can add courts or days and retry.

pub mod config;
pub mod scheduler;

pub use config::{DEFAULT_MATCH_MINUTES, DEFAULT_MIN_REST_MINUTES, ScheduleConfig};
pub use scheduler::{
    FailureReason, ScheduleOutcome, ScheduledMatch, SchedulingFailure, fair_order,
    schedule_after, schedule_matches,
};

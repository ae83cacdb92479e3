//! Scheduling configuration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Default match length in minutes
pub const DEFAULT_MATCH_MINUTES: u32 = 60;

/// Default rest a pair gets between the end of one match and the next start
pub const DEFAULT_MIN_REST_MINUTES: u32 = 60;

/// Courts, days and the daily play window available to the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First day of play
    pub start_date: NaiveDate,
    /// Last day of play (inclusive)
    pub end_date: NaiveDate,
    /// Earliest start on every day
    pub day_start: NaiveTime,
    /// Every match must finish by this time
    pub day_end: NaiveTime,
    /// Fixed match length; slots are this wide
    pub match_duration_minutes: u32,
    /// Courts numbered 1..=court_count
    pub court_count: u32,
    /// Minimum gap between a pair's matches
    #[serde(default = "default_min_rest")]
    pub min_rest_minutes: u32,
}

fn default_min_rest() -> u32 {
    DEFAULT_MIN_REST_MINUTES
}

impl ScheduleConfig {
    /// Create a configuration with the default match length and rest period
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        day_start: NaiveTime,
        day_end: NaiveTime,
        court_count: u32,
    ) -> Self {
        Self {
            start_date,
            end_date,
            day_start,
            day_end,
            match_duration_minutes: DEFAULT_MATCH_MINUTES,
            court_count,
            min_rest_minutes: DEFAULT_MIN_REST_MINUTES,
        }
    }

    /// Override the match length
    pub fn with_match_duration(mut self, minutes: u32) -> Self {
        self.match_duration_minutes = minutes;
        self
    }

    /// Override the rest period
    pub fn with_min_rest(mut self, minutes: u32) -> Self {
        self.min_rest_minutes = minutes;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> EngineResult<()> {
        if self.court_count == 0 {
            return Err(invalid("court_count", "Must be greater than 0"));
        }

        if self.match_duration_minutes == 0 {
            return Err(invalid("match_duration_minutes", "Must be greater than 0"));
        }

        if self.end_date < self.start_date {
            return Err(invalid(
                "end_date",
                &format!("Must not be before start date ({})", self.start_date),
            ));
        }

        if self.day_end <= self.day_start {
            return Err(invalid(
                "day_end",
                &format!("Must be after day start ({})", self.day_start),
            ));
        }

        Ok(())
    }

    pub fn match_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.match_duration_minutes))
    }

    pub fn min_rest(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.min_rest_minutes))
    }

    /// Calendar days from start to end date, inclusive
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|day| *day <= self.end_date)
            .collect()
    }

    /// Every slot start in chronological order. A slot only exists if the
    /// whole match fits before the day's end.
    pub fn slots(&self) -> Vec<NaiveDateTime> {
        let duration = self.match_duration();
        let mut slots = Vec::new();
        for day in self.days() {
            let close = day.and_time(self.day_end);
            let mut start = day.and_time(self.day_start);
            while start + duration <= close {
                slots.push(start);
                start += duration;
            }
        }
        slots
    }
}

fn invalid(field: &str, reason: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

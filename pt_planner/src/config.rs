//! Planner configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use chrono::{NaiveDate, NaiveTime};
use pair_tournament::{
    BracketConfig, EngineError, ScheduleConfig,
    schedule::{DEFAULT_MATCH_MINUTES, DEFAULT_MIN_REST_MINUTES},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DEFAULT_DAY_START: &str = "09:00";
const DEFAULT_DAY_END: &str = "21:00";

/// Complete planner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Court and time settings; `None` when no start date is configured
    pub schedule: Option<ScheduleConfig>,
    /// Bracket draw settings
    pub bracket: BracketConfig,
    /// RNG seed for a reproducible draw
    pub seed: Option<u64>,
}

/// Values given on the command line, taking precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub courts: Option<u32>,
    pub seed: Option<u64>,
    pub fill_byes: bool,
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a date, time or seed variable cannot be parsed, or an
    /// end date is given without a start date
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let start_date = match overrides.start_date {
            Some(date) => Some(date),
            None => parse_env_date("PT_START_DATE")?,
        };

        let end_date = match overrides.end_date {
            Some(date) => Some(date),
            None => parse_env_date("PT_END_DATE")?,
        };

        let schedule = match start_date {
            Some(start_date) => {
                let end_date = end_date.unwrap_or(start_date);
                let day_start = parse_env_time("PT_DAY_START", DEFAULT_DAY_START)?;
                let day_end = parse_env_time("PT_DAY_END", DEFAULT_DAY_END)?;
                let courts = overrides
                    .courts
                    .unwrap_or_else(|| parse_env_or("PT_COURTS", 2));

                Some(
                    ScheduleConfig::new(start_date, end_date, day_start, day_end, courts)
                        .with_match_duration(parse_env_or(
                            "PT_MATCH_MINUTES",
                            DEFAULT_MATCH_MINUTES,
                        ))
                        .with_min_rest(parse_env_or(
                            "PT_MIN_REST_MINUTES",
                            DEFAULT_MIN_REST_MINUTES,
                        )),
                )
            }
            None if end_date.is_some() => {
                return Err(ConfigError::MissingRequired {
                    var: "PT_START_DATE".to_string(),
                    hint: "An end date was given; set PT_START_DATE=YYYY-MM-DD or pass --start-date"
                        .to_string(),
                });
            }
            None => None,
        };

        let defaults = BracketConfig::default();
        let bracket = BracketConfig {
            qualifiers_per_zone: parse_env_or(
                "PT_QUALIFIERS_PER_ZONE",
                defaults.qualifiers_per_zone,
            ),
            fill_byes: overrides.fill_byes || parse_env_or("PT_FILL_BYES", defaults.fill_byes),
            ..defaults
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_env_opt("PT_SEED")?,
        };

        Ok(PlannerConfig {
            schedule,
            bracket,
            seed,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(schedule) = &self.schedule {
            schedule.validate().map_err(ConfigError::from)?;
        }
        self.bracket.validate().map_err(ConfigError::from)?;
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

impl From<EngineError> for ConfigError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfig { field, reason } => ConfigError::Invalid {
                var: env_var_for(&field).to_string(),
                reason,
            },
            other => ConfigError::Invalid {
                var: "configuration".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// Environment variable backing a config field
fn env_var_for(field: &str) -> &str {
    match field {
        "start_date" => "PT_START_DATE",
        "end_date" => "PT_END_DATE",
        "day_start" => "PT_DAY_START",
        "day_end" => "PT_DAY_END",
        "match_duration_minutes" => "PT_MATCH_MINUTES",
        "court_count" => "PT_COURTS",
        "min_rest_minutes" => "PT_MIN_REST_MINUTES",
        "qualifiers_per_zone" => "PT_QUALIFIERS_PER_ZONE",
        other => other,
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(value) = std::env::var(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Cannot parse {value:?} ({e})"),
        })
}

fn parse_env_date(key: &str) -> Result<Option<NaiveDate>, ConfigError> {
    let Ok(value) = std::env::var(key) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Expected YYYY-MM-DD, got {value:?} ({e})"),
        })
}

fn parse_env_time(key: &str, default: &str) -> Result<NaiveTime, ConfigError> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|e| ConfigError::Invalid {
        var: key.to_string(),
        reason: format!("Expected HH:MM, got {value:?} ({e})"),
    })
}

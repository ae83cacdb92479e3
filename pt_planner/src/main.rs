//! Command-line planner for pair tournaments.
//!
//! Reads entrants or matches as JSON, runs one engine stage and writes the
//! result as JSON to stdout. Logs go to stderr.

mod commands;
mod config;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Error, bail};
use chrono::NaiveDate;
use log::info;
use pair_tournament::{Bracket, MatchId, Pair};
use pico_args::Arguments;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use commands::GroupStage;
use config::{Overrides, PlannerConfig};

const HELP: &str = "\
Plan a pair tournament: zones, standings, bracket and court schedule

USAGE:
  pt_planner <COMMAND> [OPTIONS]

COMMANDS:
  groups                   Pairs JSON -> zones, group matches and schedule
  standings                Zones + matches JSON -> zone tables
  bracket                  Groups output with results -> bracket and schedule
                           booked after the group schedule when present
  advance                  Bracket JSON -> bracket with the winner moved on

OPTIONS:
  --input       FILE       Read JSON from FILE  [default: stdin]
  --match       ID         Bracket match to advance (advance only)
  --start-date  DATE       First day of play, YYYY-MM-DD  [default: env PT_START_DATE]
  --end-date    DATE       Last day of play, YYYY-MM-DD  [default: env PT_END_DATE or start date]
  --courts      N          Number of courts  [default: env PT_COURTS or 2]
  --seed        N          Seed for a reproducible bracket draw  [default: env PT_SEED]

FLAGS:
  --fill-byes              Pad the bracket with byes  [default: env PT_FILL_BYES or false]
  --pretty                 Pretty-print the JSON output
  -h, --help               Print help information

ENVIRONMENT:
  PT_DAY_START             Daily first start, HH:MM  [default: 09:00]
  PT_DAY_END               Daily close, HH:MM  [default: 21:00]
  PT_MATCH_MINUTES         Match length  [default: 60]
  PT_MIN_REST_MINUTES      Rest between a pair's matches  [default: 60]
  PT_QUALIFIERS_PER_ZONE   Pairs leaving each zone  [default: 2]
  RUST_LOG                 Log level (e.g., info, debug)
";

struct Args {
    command: String,
    input: Option<PathBuf>,
    match_id: Option<MatchId>,
    pretty: bool,
    overrides: Overrides,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        command: pargs
            .subcommand()?
            .context("Missing command, see --help")?,
        input: pargs.opt_value_from_str("--input")?,
        match_id: pargs.opt_value_from_str("--match")?,
        pretty: pargs.contains("--pretty"),
        overrides: Overrides {
            start_date: pargs.opt_value_from_fn("--start-date", parse_date)?,
            end_date: pargs.opt_value_from_fn("--end-date", parse_date)?,
            courts: pargs.opt_value_from_str("--courts")?,
            seed: pargs.opt_value_from_str("--seed")?,
            fill_byes: pargs.contains("--fill-byes"),
        },
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }

    env_logger::builder().format_target(false).init();

    let config = PlannerConfig::from_env(args.overrides)?;
    config.validate()?;

    match args.command.as_str() {
        "groups" => {
            let pairs: Vec<Pair> = read_json(args.input.as_ref())?;
            info!("Planning group stage for {} pairs", pairs.len());
            if config.schedule.is_none() {
                info!("No start date configured, skipping the schedule");
            }
            write_json(&commands::groups(pairs, &config)?, args.pretty)
        }
        "standings" => {
            let stage: GroupStage = read_json(args.input.as_ref())?;
            write_json(&commands::standings(&stage), args.pretty)
        }
        "bracket" => {
            let stage: GroupStage = read_json(args.input.as_ref())?;
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            write_json(&commands::bracket(&stage, &config, &mut rng)?, args.pretty)
        }
        "advance" => {
            let match_id = args.match_id.context("advance needs --match ID")?;
            let bracket: Bracket = read_json(args.input.as_ref())?;
            write_json(&commands::advance(bracket, match_id)?, args.pretty)
        }
        other => bail!("Unknown command {other:?}, see --help"),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

fn read_json<T: DeserializeOwned>(path: Option<&PathBuf>) -> Result<T, Error> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Failed to parse input JSON")
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Error> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

//! Command line entry point for the skill adjudicator
//!
//! Rates a ranked match read as JSON, or scores the quality of a prospective
//! pairing, using configuration from a TOML file or the environment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use skill_adjudicator::{
    Adjudicator, AdjustmentFactors, Aggregator, AggregatorKind, ModelKind, PlayerResult,
    QualityEvaluator, Rating, RatingAdjustment, RatingError, RatingModelConfig, TeamResult,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Skill Adjudicator - Bayesian skill ratings for ranked team matches
#[derive(Parser)]
#[command(
    name = "skill-adjudicator",
    version,
    about = "Rate ranked team matches with Weng-Lin Bayesian skill models",
    long_about = "Skill Adjudicator updates player skill beliefs (mu, sigma) after a ranked \
                 match using Plackett-Luce, Bradley-Terry or Thurstone-Mosteller models, and \
                 estimates the quality of prospective pairings."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rate a match and print every player's new rating
    Rate {
        #[arg(short, long, default_value_t = ModelKind::PlackettLuce)]
        model: ModelKind,

        #[arg(short, long, default_value_t = AggregatorKind::Default)]
        aggregator: AggregatorKind,

        /// Match JSON file; stdin when omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Include per-team adjustment factors in the output
        #[arg(long)]
        factors: bool,
    },

    /// Score how evenly two team ratings are matched
    Quality {
        #[arg(long, allow_negative_numbers = true)]
        a_mu: f64,
        #[arg(long)]
        a_sigma: f64,
        #[arg(long, allow_negative_numbers = true)]
        b_mu: f64,
        #[arg(long)]
        b_sigma: f64,
    },
}

/// Match as read from JSON; team ratings are aggregated from the players
#[derive(Debug, Deserialize)]
struct MatchInput {
    teams: Vec<TeamInput>,
}

#[derive(Debug, Deserialize)]
struct TeamInput {
    rank: u32,
    #[serde(default)]
    weight: Option<f64>,
    players: Vec<PlayerResult<String>>,
}

#[derive(Debug, Serialize)]
struct RateOutput {
    model: ModelKind,
    aggregator: AggregatorKind,
    adjustments: Vec<RatingAdjustment<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    factors: Option<Vec<AdjustmentFactors>>,
}

/// Initialize structured logging on stderr so stdout stays machine readable
fn init_logging(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| log_filter(log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn log_filter(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level).with_context(|| format!("Invalid log level {:?}", log_level))
}

/// Load configuration from the given file, falling back to the environment
fn load_config(args: &Args) -> Result<RatingModelConfig> {
    if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        RatingModelConfig::from_file(config_path)
    } else {
        RatingModelConfig::from_env()
    }
}

fn read_match(input: Option<&PathBuf>) -> Result<MatchInput> {
    let source = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match file {}", path.display()))?,
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read match from stdin")?;
            source
        }
    };

    parse_match(&source)
}

fn parse_match(source: &str) -> Result<MatchInput> {
    serde_json::from_str(source).context("Failed to parse match JSON")
}

fn build_teams(input: MatchInput, aggregator: &Aggregator) -> Result<Vec<TeamResult<String>>> {
    if input.teams.is_empty() {
        return Err(RatingError::InvalidMatch {
            reason: "Match has no teams".to_string(),
        }
        .into());
    }

    input
        .teams
        .into_iter()
        .enumerate()
        .map(|(index, team)| {
            let mut result = TeamResult::from_players(aggregator, team.rank, team.players);
            if let Some(weight) = team.weight {
                result = result.with_weight(weight);
            }
            result
                .validate()
                .with_context(|| format!("Team {} is invalid", index + 1))?;
            Ok(result)
        })
        .collect()
}

fn rate(
    config: &RatingModelConfig,
    model: ModelKind,
    aggregator: AggregatorKind,
    input: Option<&PathBuf>,
    with_factors: bool,
) -> Result<RateOutput> {
    let match_input = read_match(input)?;
    rate_match(config, model, aggregator, match_input, with_factors)
}

fn rate_match(
    config: &RatingModelConfig,
    model: ModelKind,
    aggregator: AggregatorKind,
    match_input: MatchInput,
    with_factors: bool,
) -> Result<RateOutput> {
    let teams = build_teams(match_input, &Aggregator::new(aggregator, config))?;
    debug!(teams = teams.len(), %model, %aggregator, "Loaded match");

    let adjudicator = Adjudicator::from_config(config, model);
    let factors = with_factors.then(|| adjudicator.adjustment_factors(&teams));

    Ok(RateOutput {
        model,
        aggregator,
        adjustments: adjudicator.rate(&teams),
        factors,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = load_config(&args).context("Configuration error")?;
    debug!(?config, "Configuration loaded");

    match &args.command {
        Command::Rate {
            model,
            aggregator,
            input,
            factors,
        } => {
            let output = rate(&config, *model, *aggregator, input.as_ref(), *factors)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Quality {
            a_mu,
            a_sigma,
            b_mu,
            b_sigma,
        } => {
            let evaluator = QualityEvaluator::from_config(&config);
            let quality = evaluator.evaluate_quality(
                &Rating::new(*a_mu, *a_sigma),
                &Rating::new(*b_mu, *b_sigma),
            );
            println!("{}", quality);
        }
    }

    Ok(())
}

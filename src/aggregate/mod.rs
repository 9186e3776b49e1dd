//! Team rating aggregation
//!
//! Folds the ratings of a team's players into one team-level belief that the
//! rating models compare against other teams.

pub mod default;
pub mod weighted;

pub use default::DefaultTeamRatingAggregator;
pub use weighted::WeightedTeamRatingAggregator;

use crate::config::RatingModelConfig;
use crate::error::RatingError;
use crate::types::Rating;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for computing a team rating from its players
pub trait TeamRatingAggregator: Send + Sync {
    /// Aggregate the players' ratings, in input order.
    ///
    /// Every sigma must be positive; the result is unspecified otherwise.
    fn team_rating<R: AsRef<Rating>>(&self, players: &[R]) -> Rating;
}

/// Name of an aggregation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregatorKind {
    #[default]
    Default,
    Weighted,
}

impl fmt::Display for AggregatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregatorKind::Default => write!(f, "default"),
            AggregatorKind::Weighted => write!(f, "weighted"),
        }
    }
}

impl FromStr for AggregatorKind {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "sum" => Ok(AggregatorKind::Default),
            "weighted" => Ok(AggregatorKind::Weighted),
            other => Err(RatingError::InvalidConfiguration {
                message: format!(
                    "{} is not a valid team aggregator. Must be one of: default, weighted",
                    other
                ),
            }),
        }
    }
}

/// A configured aggregation strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregator {
    Default(DefaultTeamRatingAggregator),
    Weighted(WeightedTeamRatingAggregator),
}

impl Aggregator {
    pub fn new(kind: AggregatorKind, config: &RatingModelConfig) -> Self {
        match kind {
            AggregatorKind::Default => {
                Aggregator::Default(DefaultTeamRatingAggregator::new(config))
            }
            AggregatorKind::Weighted => Aggregator::Weighted(WeightedTeamRatingAggregator),
        }
    }

    pub fn kind(&self) -> AggregatorKind {
        match self {
            Aggregator::Default(_) => AggregatorKind::Default,
            Aggregator::Weighted(_) => AggregatorKind::Weighted,
        }
    }
}

impl TeamRatingAggregator for Aggregator {
    fn team_rating<R: AsRef<Rating>>(&self, players: &[R]) -> Rating {
        match self {
            Aggregator::Default(aggregator) => aggregator.team_rating(players),
            Aggregator::Weighted(aggregator) => aggregator.team_rating(players),
        }
    }
}

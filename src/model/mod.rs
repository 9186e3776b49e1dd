//! Rating models
//!
//! A rating model turns one team's result against its opponents into a pair of
//! team-level [`AdjustmentFactors`]. The [`Adjudicator`](crate::Adjudicator)
//! then spreads those factors over the team's players.
//!
//! The set of models is closed, so [`Model`] dispatches over them with a plain
//! enum selected by [`ModelKind`].

pub mod bradley_terry;
pub mod plackett_luce;
pub mod thurstone_mosteller;

pub use bradley_terry::BradleyTerryFull;
pub use plackett_luce::PlackettLuce;
pub use thurstone_mosteller::ThurstoneMostellerFull;

use crate::config::RatingModelConfig;
use crate::error::RatingError;
use crate::types::TeamResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Team-level update scalars produced by a rating model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    /// Mean shift; positive when the team did better than expected
    pub omega: f64,
    /// Variance shrink
    pub delta: f64,
}

impl AdjustmentFactors {
    pub fn new(omega: f64, delta: f64) -> Self {
        Self { omega, delta }
    }
}

/// Trait for computing a team's adjustment factors after a match
pub trait RatingModel: Send + Sync {
    /// Compute the factors for `team` given every other team in the match.
    ///
    /// `opponents` must not contain `team`. Summation follows the order of
    /// `opponents`, so identical inputs give bit-identical factors.
    fn adjustment_factors<Id>(
        &self,
        team: &TeamResult<Id>,
        opponents: &[&TeamResult<Id>],
    ) -> AdjustmentFactors;
}

/// Outcome of one pairwise comparison from `team`'s point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    /// Lower rank is better
    pub(crate) fn between<Id>(team: &TeamResult<Id>, opponent: &TeamResult<Id>) -> Self {
        if opponent.rank > team.rank {
            Outcome::Win
        } else if opponent.rank < team.rank {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }
}

/// Name of a rating model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    PlackettLuce,
    BradleyTerryFull,
    ThurstoneMostellerFull,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::PlackettLuce,
        ModelKind::BradleyTerryFull,
        ModelKind::ThurstoneMostellerFull,
    ];
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::PlackettLuce => write!(f, "plackett-luce"),
            ModelKind::BradleyTerryFull => write!(f, "bradley-terry-full"),
            ModelKind::ThurstoneMostellerFull => write!(f, "thurstone-mosteller-full"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "plackett-luce" | "pl" => Ok(ModelKind::PlackettLuce),
            "bradley-terry-full" | "bt" => Ok(ModelKind::BradleyTerryFull),
            "thurstone-mosteller-full" | "tm" => Ok(ModelKind::ThurstoneMostellerFull),
            other => Err(RatingError::InvalidConfiguration {
                message: format!(
                    "{} is not a valid rating model. Must be one of: plackett-luce, bradley-terry-full, thurstone-mosteller-full",
                    other
                ),
            }),
        }
    }
}

/// A configured rating model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Model {
    PlackettLuce(PlackettLuce),
    BradleyTerryFull(BradleyTerryFull),
    ThurstoneMostellerFull(ThurstoneMostellerFull),
}

impl Model {
    pub fn new(kind: ModelKind, config: &RatingModelConfig) -> Self {
        match kind {
            ModelKind::PlackettLuce => Model::PlackettLuce(PlackettLuce::from_config(config)),
            ModelKind::BradleyTerryFull => {
                Model::BradleyTerryFull(BradleyTerryFull::from_config(config))
            }
            ModelKind::ThurstoneMostellerFull => {
                Model::ThurstoneMostellerFull(ThurstoneMostellerFull::from_config(config))
            }
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::PlackettLuce(_) => ModelKind::PlackettLuce,
            Model::BradleyTerryFull(_) => ModelKind::BradleyTerryFull,
            Model::ThurstoneMostellerFull(_) => ModelKind::ThurstoneMostellerFull,
        }
    }
}

impl RatingModel for Model {
    fn adjustment_factors<Id>(
        &self,
        team: &TeamResult<Id>,
        opponents: &[&TeamResult<Id>],
    ) -> AdjustmentFactors {
        match self {
            Model::PlackettLuce(model) => model.adjustment_factors(team, opponents),
            Model::BradleyTerryFull(model) => model.adjustment_factors(team, opponents),
            Model::ThurstoneMostellerFull(model) => model.adjustment_factors(team, opponents),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.to_string().parse::<ModelKind>().unwrap(), kind);
        }
        assert_eq!("PL".parse::<ModelKind>().unwrap(), ModelKind::PlackettLuce);
        assert_eq!(
            "thurstone_mosteller_full".parse::<ModelKind>().unwrap(),
            ModelKind::ThurstoneMostellerFull
        );
        assert!("glicko".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_model_kind_serde() {
        let json = serde_json::to_string(&ModelKind::BradleyTerryFull).unwrap();
        assert_eq!(json, "\"bradley-terry-full\"");
    }

    #[test]
    fn test_model_dispatch_matches_direct_call() {
        let config = RatingModelConfig::default();
        let teams = vec![
            test_support::uniform_team(&config, 1, 1, 25.0, 25.0 / 3.0),
            test_support::uniform_team(&config, 2, 2, 25.0, 25.0 / 3.0),
        ];

        let direct = test_support::all_factors(&BradleyTerryFull::from_config(&config), &teams);
        let model = Model::new(ModelKind::BradleyTerryFull, &config);
        assert_eq!(model.kind(), ModelKind::BradleyTerryFull);
        assert_eq!(test_support::all_factors(&model, &teams), direct);
    }

    #[test]
    fn test_outcome_between() {
        let config = RatingModelConfig::default();
        let first = test_support::uniform_team(&config, 1, 1, 25.0, 8.0);
        let second = test_support::uniform_team(&config, 2, 1, 25.0, 8.0);

        assert_eq!(Outcome::between(&first, &second), Outcome::Win);
        assert_eq!(Outcome::between(&second, &first), Outcome::Loss);
        assert_eq!(Outcome::between(&first, &first), Outcome::Tie);
    }
}

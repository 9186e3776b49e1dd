//! Rating pass orchestration
//!
//! The [`Adjudicator`] asks its rating model for each team's adjustment
//! factors and applies the closed-form per-player update:
//!
//! ```text
//! σ_adj²  = σ² + τ²
//! weight  = w if ω > 0, else 1 / w
//! μ'      = μ + (σ_adj² / σ_team²) · ω · weight
//! σ'      = σ_adj · sqrt(max(1 − (σ_adj² / σ_team²) · δ · weight, κ))
//! σ'      = min(σ', σ)            when limit_sigma is set
//! ```

use crate::config::RatingModelConfig;
use crate::model::{AdjustmentFactors, Model, ModelKind, RatingModel};
use crate::types::{PlayerResult, RatingAdjustment, TeamResult};
use std::fmt;
use tracing::{debug, trace};

/// Applies a rating model's factors to every player of a match
#[derive(Debug, Clone)]
pub struct Adjudicator<M = Model> {
    model: M,
    tau_squared: f64,
    kappa: f64,
    limit_sigma: bool,
}

impl Adjudicator<Model> {
    /// Create an adjudicator for one of the built-in models
    pub fn from_config(config: &RatingModelConfig, kind: ModelKind) -> Self {
        Self::new(config, Model::new(kind, config))
    }
}

impl<M: RatingModel + fmt::Debug> Adjudicator<M> {
    pub fn new(config: &RatingModelConfig, model: M) -> Self {
        Self {
            model,
            tau_squared: config.tau() * config.tau(),
            kappa: config.kappa(),
            limit_sigma: config.limit_sigma(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Rate one team against explicit opponents.
    ///
    /// Returns one adjustment per player of `team`, in player order.
    pub fn rate_against<Id: Clone>(
        &self,
        team: &TeamResult<Id>,
        opponents: &[TeamResult<Id>],
    ) -> Vec<RatingAdjustment<Id>> {
        let opponents: Vec<&TeamResult<Id>> = opponents.iter().collect();
        let factors = self.model.adjustment_factors(team, &opponents);
        trace!(
            rank = team.rank,
            omega = factors.omega,
            delta = factors.delta,
            "Team adjustment factors"
        );

        self.adjust_team(team, factors).collect()
    }

    /// Rate every team against all the others.
    ///
    /// Opponents are every other team by position, so two teams with equal
    /// contents are still rated against each other. Adjustments come back
    /// team by team, players in input order.
    pub fn rate<Id: Clone>(&self, teams: &[TeamResult<Id>]) -> Vec<RatingAdjustment<Id>> {
        debug!(teams = teams.len(), model = ?self.model, "Rating match");

        let factors = self.adjustment_factors(teams);
        teams
            .iter()
            .zip(factors)
            .flat_map(|(team, factors)| self.adjust_team(team, factors))
            .collect()
    }

    /// Per-team factors of an all-play-all pass, in team order
    pub fn adjustment_factors<Id>(&self, teams: &[TeamResult<Id>]) -> Vec<AdjustmentFactors> {
        teams
            .iter()
            .enumerate()
            .map(|(index, team)| {
                let opponents: Vec<&TeamResult<Id>> = teams
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, opponent)| opponent)
                    .collect();

                let factors = self.model.adjustment_factors(team, &opponents);
                trace!(
                    team = index,
                    rank = team.rank,
                    omega = factors.omega,
                    delta = factors.delta,
                    "Team adjustment factors"
                );
                factors
            })
            .collect()
    }

    fn adjust_team<'a, Id: Clone>(
        &'a self,
        team: &'a TeamResult<Id>,
        factors: AdjustmentFactors,
    ) -> impl Iterator<Item = RatingAdjustment<Id>> + 'a {
        team.players
            .iter()
            .map(move |player| self.adjust_player(team, factors, player))
    }

    fn adjust_player<Id: Clone>(
        &self,
        team: &TeamResult<Id>,
        factors: AdjustmentFactors,
        player: &PlayerResult<Id>,
    ) -> RatingAdjustment<Id> {
        let team_sigma_squared = team.sigma() * team.sigma();
        let adjusted_sigma_squared = (player.sigma() * player.sigma()) + self.tau_squared;
        let adjusted_sigma = adjusted_sigma_squared.sqrt();
        let share = adjusted_sigma_squared / team_sigma_squared;

        // A player's weight amplifies gains and softens losses
        let weight = if factors.omega > 0.0 {
            player.weight
        } else {
            1.0 / player.weight
        };

        let mu = player.mu() + share * factors.omega * weight;

        // Comparisons are arranged so NaN from bad input propagates
        let variance_factor = 1.0 - share * factors.delta * weight;
        let variance_factor = if variance_factor < self.kappa {
            self.kappa
        } else {
            variance_factor
        };
        let mut sigma = adjusted_sigma * variance_factor.sqrt();

        if self.limit_sigma && player.sigma() < sigma {
            sigma = player.sigma();
        }

        RatingAdjustment {
            player_id: player.id.clone(),
            mu,
            sigma,
        }
    }
}

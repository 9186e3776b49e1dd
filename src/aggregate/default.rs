//! Additive team aggregation
//!
//! Team mu is the sum of player mus and team variance the sum of player
//! variances, each inflated by `tau²`. With balance enabled every player's
//! contribution is scaled up by how far their ordinal sits below the team's
//! best ordinal.

use crate::aggregate::TeamRatingAggregator;
use crate::config::{BalanceConfig, RatingModelConfig};
use crate::types::Rating;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultTeamRatingAggregator {
    kappa: f64,
    tau_squared: f64,
    balance: BalanceConfig,
}

impl DefaultTeamRatingAggregator {
    pub fn new(config: &RatingModelConfig) -> Self {
        Self {
            kappa: config.kappa(),
            tau_squared: config.tau() * config.tau(),
            balance: *config.balance(),
        }
    }

    fn adjusted_sigma_squared(&self, rating: &Rating) -> f64 {
        (rating.sigma * rating.sigma) + self.tau_squared
    }

    fn ordinal(&self, rating: &Rating) -> f64 {
        rating.ordinal(self.balance.z, self.balance.alpha, self.balance.target)
    }

    fn balanced<R: AsRef<Rating>>(&self, players: &[R]) -> Rating {
        let ordinals: Vec<f64> = players.iter().map(|p| self.ordinal(p.as_ref())).collect();
        let max_ordinal = ordinals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let balance_weight = |ordinal: f64| {
            let ordinal_diff = max_ordinal - ordinal;
            1.0 + (ordinal_diff / (max_ordinal + self.kappa))
        };

        let mu = players
            .iter()
            .zip(&ordinals)
            .map(|(p, ordinal)| p.as_ref().mu * balance_weight(*ordinal))
            .sum::<f64>();
        let sigma = players
            .iter()
            .zip(&ordinals)
            .map(|(p, ordinal)| self.adjusted_sigma_squared(p.as_ref()) * balance_weight(*ordinal))
            .sum::<f64>()
            .sqrt();

        Rating::new(mu, sigma)
    }
}

impl TeamRatingAggregator for DefaultTeamRatingAggregator {
    fn team_rating<R: AsRef<Rating>>(&self, players: &[R]) -> Rating {
        if self.balance.enable {
            return self.balanced(players);
        }

        let mu = players.iter().map(|p| p.as_ref().mu).sum::<f64>();
        let sigma = players
            .iter()
            .map(|p| self.adjusted_sigma_squared(p.as_ref()))
            .sum::<f64>()
            .sqrt();

        Rating::new(mu, sigma)
    }
}

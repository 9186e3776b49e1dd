//! Inverse-variance team aggregation
//!
//! Players the system is more certain about dominate the team mu, and the
//! team sigma is the harmonic combination of the player sigmas. Ignores tau
//! and balance.

use crate::aggregate::TeamRatingAggregator;
use crate::types::Rating;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedTeamRatingAggregator;

impl TeamRatingAggregator for WeightedTeamRatingAggregator {
    fn team_rating<R: AsRef<Rating>>(&self, players: &[R]) -> Rating {
        let mut weighted_mu_sum = 0.0;
        let mut weight_sum = 0.0;

        for player in players {
            let rating = player.as_ref();
            let weight = 1.0 / (rating.sigma * rating.sigma);
            weighted_mu_sum += rating.mu * weight;
            weight_sum += weight;
        }

        Rating::new(weighted_mu_sum / weight_sum, (1.0 / weight_sum).sqrt())
    }
}

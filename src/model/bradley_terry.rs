//! Bradley-Terry rating model with full pairing
//!
//! Every pair of teams is compared independently with a logistic win
//! probability; a tie counts as half a win.

use crate::config::RatingModelConfig;
use crate::model::{AdjustmentFactors, Outcome, RatingModel};
use crate::types::TeamResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BradleyTerryFull {
    beta_squared: f64,
}

impl BradleyTerryFull {
    pub fn new(beta: f64) -> Self {
        Self {
            beta_squared: beta * beta,
        }
    }

    pub fn from_config(config: &RatingModelConfig) -> Self {
        Self::new(config.beta())
    }
}

impl RatingModel for BradleyTerryFull {
    fn adjustment_factors<Id>(
        &self,
        team: &TeamResult<Id>,
        opponents: &[&TeamResult<Id>],
    ) -> AdjustmentFactors {
        let mut omega = 0.0;
        let mut delta = 0.0;
        let team_sigma_squared = team.sigma() * team.sigma();

        for opponent in opponents {
            let opponent_sigma_squared = opponent.sigma() * opponent.sigma();
            let c_iq =
                (team_sigma_squared + opponent_sigma_squared + 2.0 * self.beta_squared).sqrt();
            // Probability that the team beats this opponent
            let p_iq = 1.0 / (1.0 + ((opponent.mu() - team.mu()) / c_iq).exp());
            let sigma_squared_to_c_iq = team_sigma_squared / c_iq;

            let score = match Outcome::between(team, opponent) {
                Outcome::Win => 1.0,
                Outcome::Tie => 0.5,
                Outcome::Loss => 0.0,
            };

            omega += sigma_squared_to_c_iq * (score - p_iq);
            let gamma = team.sigma() / c_iq;
            delta += ((gamma * sigma_squared_to_c_iq) / c_iq) * p_iq * (1.0 - p_iq);
        }

        AdjustmentFactors::new(omega, delta)
    }
}

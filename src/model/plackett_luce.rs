//! Plackett-Luce rating model
//!
//! Treats the whole match as one ranking: a team's chance to finish ahead of
//! everyone placed at or below some position is its share of the exponentiated
//! skills in that group, normalised by a single match-wide spread `c`.

use crate::config::RatingModelConfig;
use crate::model::{AdjustmentFactors, RatingModel};
use crate::types::TeamResult;
use std::iter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlackettLuce {
    beta_squared: f64,
}

impl PlackettLuce {
    pub fn new(beta: f64) -> Self {
        Self {
            beta_squared: beta * beta,
        }
    }

    pub fn from_config(config: &RatingModelConfig) -> Self {
        Self::new(config.beta())
    }

    /// Collective spread of every team in the match
    fn combined_sigma<Id>(&self, teams: &[&TeamResult<Id>]) -> f64 {
        teams
            .iter()
            .map(|team| team.sigma() * team.sigma() + self.beta_squared)
            .sum::<f64>()
            .sqrt()
    }
}

/// For each team q, the sum of `exp(mu_i / c)` over teams i placed at or below q.
fn sum_q<Id>(teams: &[&TeamResult<Id>], c: f64) -> Vec<f64> {
    let mut sums = vec![0.0; teams.len()];
    for team_i in teams {
        let summed = (team_i.mu() / c).exp();
        for (q, team_q) in teams.iter().enumerate() {
            if team_i.rank >= team_q.rank {
                sums[q] += summed;
            }
        }
    }
    sums
}

/// Number of teams sharing `rank`
fn rank_count<Id>(teams: &[&TeamResult<Id>], rank: u32) -> f64 {
    teams.iter().filter(|team| team.rank == rank).count() as f64
}

impl RatingModel for PlackettLuce {
    fn adjustment_factors<Id>(
        &self,
        team: &TeamResult<Id>,
        opponents: &[&TeamResult<Id>],
    ) -> AdjustmentFactors {
        // The team goes last; its position is how it is told apart from
        // opponents that may compare equal to it.
        let teams: Vec<&TeamResult<Id>> = opponents
            .iter()
            .copied()
            .chain(iter::once(team))
            .collect();
        let team_index = teams.len() - 1;

        let team_sigma_squared = team.sigma() * team.sigma();
        let c = self.combined_sigma(&teams);
        let sums = sum_q(&teams, c);
        let mu_over_c = (team.mu() / c).exp();

        let mut omega = 0.0;
        let mut delta = 0.0;
        for (q, team_q) in teams.iter().enumerate() {
            if team.rank < team_q.rank {
                continue;
            }
            let p = mu_over_c / sums[q];
            let a = rank_count(&teams, team_q.rank);

            delta += p * (1.0 - p) / a;
            if q == team_index {
                omega += (1.0 - p) / a;
            } else {
                omega -= p / a;
            }
        }

        omega *= team_sigma_squared / c;
        delta *= team_sigma_squared / (c * c);

        let gamma = team.sigma() / c;
        delta *= gamma;

        AdjustmentFactors::new(omega, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{all_factors, assert_factors_eq, uniform_team};

    // Prior shared by every player in the published Plackett-Luce dataset
    const MU: f64 = 11.438363030321211;
    const SIGMA: f64 = 3.9391687644511344;

    #[test]
    fn test_normal_results() {
        let config = RatingModelConfig::default();
        let model = PlackettLuce::from_config(&config);
        let teams = vec![
            uniform_team(&config, 1, 1, MU, SIGMA),
            uniform_team(&config, 2, 2, MU, SIGMA),
        ];

        assert_factors_eq(
            &all_factors(&model, &teams),
            &[
                (1.3438502541982293, 0.01429592770173385),
                (-2.6877005083964596, 0.04043498968499449),
            ],
            1e-13,
        );
    }

    #[test]
    fn test_ties() {
        let config = RatingModelConfig::default();
        let model = PlackettLuce::from_config(&config);
        let teams = vec![
            uniform_team(&config, 1, 1, MU, SIGMA),
            uniform_team(&config, 2, 2, MU, SIGMA),
            uniform_team(&config, 1, 3, MU, SIGMA),
        ];

        assert_factors_eq(
            &all_factors(&model, &teams),
            &[
                (0.5185179695652332, 0.0030747957534617626),
                (-0.6488623101048707, 0.018625557589488178),
                (-0.5822604435383932, 0.04127750142509829),
            ],
            1e-13,
        );
    }

    #[test]
    fn test_identical_tied_teams_get_identical_factors() {
        let config = RatingModelConfig::default();
        let model = PlackettLuce::from_config(&config);
        let teams = vec![
            uniform_team(&config, 1, 2, 25.0, 25.0 / 3.0),
            uniform_team(&config, 1, 2, 25.0, 25.0 / 3.0),
            uniform_team(&config, 2, 2, 25.0, 25.0 / 3.0),
        ];

        let factors = all_factors(&model, &teams);
        assert_eq!(factors[0], factors[1]);
        assert!(factors[0].omega > 0.0);
        assert!(factors[2].omega < 0.0);
    }

    #[test]
    fn test_lone_team_has_zero_omega() {
        let config = RatingModelConfig::default();
        let model = PlackettLuce::from_config(&config);
        let team = uniform_team(&config, 1, 2, 25.0, 25.0 / 3.0);

        let factors = model.adjustment_factors(&team, &[]);
        assert_eq!(factors.omega, 0.0);
        assert_eq!(factors.delta, 0.0);
    }

    #[test]
    fn test_winner_gains_loser_loses() {
        let config = RatingModelConfig::default();
        let model = PlackettLuce::from_config(&config);
        let teams = vec![
            uniform_team(&config, 2, 1, 30.0, 5.0),
            uniform_team(&config, 1, 1, 20.0, 5.0),
        ];

        let factors = all_factors(&model, &teams);
        assert!(factors[0].omega < 0.0);
        assert!(factors[1].omega > 0.0);
        assert!(factors.iter().all(|f| f.delta > 0.0));
    }
}

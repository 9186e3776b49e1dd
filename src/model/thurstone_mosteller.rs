//! Thurstone-Mosteller rating model with full pairing
//!
//! Pairwise comparisons under Gaussian performance noise. The `v`/`w`
//! functions (and their tie variants) are the truncated-Gaussian moment
//! corrections from Weng & Lin, "A Bayesian Approximation Method for Online
//! Ranking" (JMLR 2011), eqs. 67-69.

use crate::config::RatingModelConfig;
use crate::math::gaussian::{cdf, pdf};
use crate::model::{AdjustmentFactors, Outcome, RatingModel};
use crate::types::TeamResult;

/// Machine epsilon for f64
const EPSILON: f64 = f64::EPSILON;

/// Below this tie probability `vt` switches to its linear limit.
const TIE_EPSILON: f64 = 1e-5;

/// Mean correction for a win by margin `x` with draw margin `t`.
pub(crate) fn v(x: f64, t: f64) -> f64 {
    let xt = x - t;
    let denom = cdf(xt);
    if denom < EPSILON {
        -xt
    } else {
        pdf(xt) / denom
    }
}

/// Variance correction for a win by margin `x` with draw margin `t`.
pub(crate) fn w(x: f64, t: f64) -> f64 {
    let xt = x - t;
    let denom = cdf(xt);
    if denom < EPSILON {
        return if x < 0.0 { 1.0 } else { 0.0 };
    }
    v(x, t) * (v(x, t) + xt)
}

/// Mean correction for a tie.
pub(crate) fn vt(x: f64, t: f64) -> f64 {
    let xx = x.abs();
    let b = cdf(t - xx) - cdf(-t - xx);

    if b < TIE_EPSILON {
        return if x < 0.0 { -x - t } else { -x + t };
    }

    let a = pdf(-t - xx) - pdf(t - xx);
    (if x < 0.0 { -a } else { a }) / b
}

/// Variance correction for a tie.
pub(crate) fn wt(x: f64, t: f64) -> f64 {
    let xx = x.abs();
    let b = cdf(t - xx) - cdf(-t - xx);

    if b < EPSILON {
        return 1.0;
    }
    ((t - xx) * pdf(t - xx) + (t + xx) * pdf(-t - xx)) / b + vt(x, t) * vt(x, t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThurstoneMostellerFull {
    beta_squared: f64,
    kappa: f64,
}

impl ThurstoneMostellerFull {
    pub fn new(beta: f64, kappa: f64) -> Self {
        Self {
            beta_squared: beta * beta,
            kappa,
        }
    }

    pub fn from_config(config: &RatingModelConfig) -> Self {
        Self::new(config.beta(), config.kappa())
    }

    /// Combined spread of two teams
    fn c_iq(&self, team_sigma_squared: f64, opponent_sigma_squared: f64) -> f64 {
        (team_sigma_squared + opponent_sigma_squared + 2.0 * self.beta_squared).sqrt()
    }
}

impl RatingModel for ThurstoneMostellerFull {
    fn adjustment_factors<Id>(
        &self,
        team: &TeamResult<Id>,
        opponents: &[&TeamResult<Id>],
    ) -> AdjustmentFactors {
        let mut omega = 0.0;
        let mut delta = 0.0;
        let team_sigma_squared = team.sigma() * team.sigma();

        for opponent in opponents {
            let c_iq = self.c_iq(team_sigma_squared, opponent.sigma() * opponent.sigma());
            let delta_mu = (team.mu() - opponent.mu()) / c_iq;
            let sigma_squared_to_c_iq = team_sigma_squared / c_iq;
            let gamma = team.sigma() / c_iq;
            let t = self.kappa / c_iq;

            match Outcome::between(team, opponent) {
                Outcome::Win => {
                    omega += sigma_squared_to_c_iq * v(delta_mu, t);
                    delta += ((gamma * sigma_squared_to_c_iq) / c_iq) * w(delta_mu, t);
                }
                Outcome::Loss => {
                    omega += -sigma_squared_to_c_iq * v(-delta_mu, t);
                    delta += ((gamma * sigma_squared_to_c_iq) / c_iq) * w(-delta_mu, t);
                }
                Outcome::Tie => {
                    omega += sigma_squared_to_c_iq * vt(delta_mu, t);
                    delta += ((gamma * sigma_squared_to_c_iq) / c_iq) * wt(delta_mu, t);
                }
            }
        }

        AdjustmentFactors::new(omega, delta)
    }
}

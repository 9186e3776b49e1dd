//! Pre-match competitiveness estimate
//!
//! Scores how evenly two team ratings are matched: 1 for a coin flip, falling
//! towards 0 as either side becomes a near-certain winner.

use crate::config::RatingModelConfig;
use crate::math::gaussian::cdf;
use crate::types::Rating;

/// Mean differences below this count as an even match.
const EVEN_MATCH_THRESHOLD: f64 = 1e-3;

/// Mean differences beyond this many of the larger sigma score zero.
const REJECTION_SIGMAS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityEvaluator {
    beta_squared: f64,
}

impl QualityEvaluator {
    pub fn new(beta: f64) -> Self {
        Self {
            beta_squared: beta * beta,
        }
    }

    pub fn from_config(config: &RatingModelConfig) -> Self {
        Self::new(config.beta())
    }

    /// Match quality in `[0, 1]`, symmetric in its arguments.
    pub fn evaluate_quality(&self, a: &Rating, b: &Rating) -> f64 {
        let mu_diff = (a.mu - b.mu).abs();

        if mu_diff > REJECTION_SIGMAS * a.sigma.max(b.sigma) {
            return 0.0;
        }
        if mu_diff < EVEN_MATCH_THRESHOLD {
            return 1.0;
        }

        let spread = (a.sigma * a.sigma + b.sigma * b.sigma + self.beta_squared).sqrt();
        let win_probability = cdf(mu_diff / spread);

        1.0 - (win_probability - 0.5).abs() * 2.0
    }
}

impl Default for QualityEvaluator {
    fn default() -> Self {
        Self::from_config(&RatingModelConfig::default())
    }
}

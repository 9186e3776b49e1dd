//! Value types exchanged with the rating engine
//!
//! Every type here is an immutable snapshot built fresh for one rating pass.
//! The player identifier is caller-supplied and only used to tag the output.

use crate::aggregate::TeamRatingAggregator;
use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Gaussian skill belief
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Conservative skill estimate `alpha * (mu - z * sigma) + target / alpha`.
    pub fn ordinal(&self, z: f64, alpha: f64, target: f64) -> f64 {
        alpha * (self.mu - z * self.sigma) + (target / alpha)
    }
}

impl AsRef<Rating> for Rating {
    fn as_ref(&self) -> &Rating {
        self
    }
}

fn default_weight() -> f64 {
    1.0
}

/// One player's prior belief and contribution to a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult<Id> {
    pub id: Id,
    #[serde(flatten)]
    pub rating: Rating,
    /// Contribution to the team result. 1.0 is neutral; use e.g. 0.1 for a
    /// player who barely influenced the outcome.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl<Id> PlayerResult<Id> {
    /// Player with neutral weight
    pub fn new(id: Id, mu: f64, sigma: f64) -> Self {
        Self {
            id,
            rating: Rating::new(mu, sigma),
            weight: default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn mu(&self) -> f64 {
        self.rating.mu
    }

    pub fn sigma(&self) -> f64 {
        self.rating.sigma
    }
}

impl<Id> AsRef<Rating> for PlayerResult<Id> {
    fn as_ref(&self) -> &Rating {
        &self.rating
    }
}

/// A team's aggregate belief, its placement, and its players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResult<Id> {
    #[serde(flatten)]
    pub rating: Rating,
    /// 1 for first place; equal ranks are a tie
    pub rank: u32,
    /// Weight of the overall result, e.g. victory confidence. Carried for
    /// callers; none of the models read it.
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub players: Vec<PlayerResult<Id>>,
}

impl<Id> TeamResult<Id> {
    pub fn new(rating: Rating, rank: u32, players: Vec<PlayerResult<Id>>) -> Self {
        Self {
            rating,
            rank,
            weight: default_weight(),
            players,
        }
    }

    /// Build a team result whose rating is aggregated from its players.
    pub fn from_players<A>(aggregator: &A, rank: u32, players: Vec<PlayerResult<Id>>) -> Self
    where
        A: TeamRatingAggregator + ?Sized,
    {
        let rating = aggregator.team_rating(&players);
        Self::new(rating, rank, players)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn mu(&self) -> f64 {
        self.rating.mu
    }

    pub fn sigma(&self) -> f64 {
        self.rating.sigma
    }

    /// Check the caller contract the numeric core assumes but never verifies.
    pub fn validate(&self) -> Result<()> {
        if self.players.is_empty() {
            return Err(RatingError::InvalidMatch {
                reason: "Team has no players".to_string(),
            }
            .into());
        }

        if self.rank == 0 {
            return Err(RatingError::InvalidMatch {
                reason: "Team rank must start at 1".to_string(),
            }
            .into());
        }

        if !(self.sigma() > 0.0) || !self.mu().is_finite() {
            return Err(RatingError::InvalidMatch {
                reason: format!(
                    "Team rating must be finite with positive sigma, got mu={} sigma={}",
                    self.mu(),
                    self.sigma()
                ),
            }
            .into());
        }

        for player in &self.players {
            if !(player.sigma() > 0.0) || !player.mu().is_finite() || !player.sigma().is_finite() {
                return Err(RatingError::InvalidMatch {
                    reason: format!(
                        "Player rating must be finite with positive sigma, got mu={} sigma={}",
                        player.mu(),
                        player.sigma()
                    ),
                }
                .into());
            }
            if !(player.weight > 0.0) {
                return Err(RatingError::InvalidMatch {
                    reason: format!("Player weight must be positive, got {}", player.weight),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Posterior belief for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAdjustment<Id> {
    pub player_id: Id,
    pub mu: f64,
    pub sigma: f64,
}

impl<Id> RatingAdjustment<Id> {
    pub fn rating(&self) -> Rating {
        Rating::new(self.mu, self.sigma)
    }
}

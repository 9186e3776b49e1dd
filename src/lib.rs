//! Skill Adjudicator - Bayesian skill rating for ranked team matches
//!
//! This crate implements the Weng-Lin family of online rating models
//! (Plackett-Luce, Bradley-Terry and Thurstone-Mosteller with full pairing),
//! team rating aggregation and pre-match quality estimation.

pub mod adjudicator;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod quality;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use adjudicator::Adjudicator;
pub use aggregate::{
    Aggregator, AggregatorKind, DefaultTeamRatingAggregator, TeamRatingAggregator,
    WeightedTeamRatingAggregator,
};
pub use config::{BalanceConfig, RatingModelConfig};
pub use model::{
    AdjustmentFactors, BradleyTerryFull, Model, ModelKind, PlackettLuce, RatingModel,
    ThurstoneMostellerFull,
};
pub use quality::QualityEvaluator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

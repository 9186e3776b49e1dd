//! Rating model configuration
//!
//! [`RatingModelConfig`] is immutable once built. Every constructor, including
//! deserialization and environment loading, goes through the same validation
//! so a config with a non-positive `kappa` can never exist.

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Default performance spread, `25 / 6`
pub const DEFAULT_BETA: f64 = 25.0 / 6.0;
/// Default posterior variance floor
pub const DEFAULT_KAPPA: f64 = 1e-4;
/// Default per-match uncertainty injection, `25 / 300`
pub const DEFAULT_TAU: f64 = 25.0 / 300.0;

/// Balance weighting applied by the default team aggregator.
///
/// With balance enabled, lower rated players contribute more to their team's
/// rating, so a strong player carrying a weak team is credited accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub enable: bool,
    pub z: f64,
    pub alpha: f64,
    pub target: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            enable: false,
            z: 3.0,
            alpha: 1.0,
            target: 0.0,
        }
    }
}

/// Parameters shared by the rating models, aggregators and adjudicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RatingSettings")]
pub struct RatingModelConfig {
    beta: f64,
    limit_sigma: bool,
    kappa: f64,
    tau: f64,
    balance: BalanceConfig,
}

/// Unvalidated form of [`RatingModelConfig`]; every key is optional.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RatingSettings {
    beta: f64,
    limit_sigma: bool,
    kappa: f64,
    tau: f64,
    balance: BalanceConfig,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            limit_sigma: false,
            kappa: DEFAULT_KAPPA,
            tau: DEFAULT_TAU,
            balance: BalanceConfig::default(),
        }
    }
}

impl TryFrom<RatingSettings> for RatingModelConfig {
    type Error = RatingError;

    fn try_from(settings: RatingSettings) -> std::result::Result<Self, Self::Error> {
        validate_kappa(settings.kappa)?;
        Ok(Self {
            beta: settings.beta,
            limit_sigma: settings.limit_sigma,
            kappa: settings.kappa,
            tau: settings.tau,
            balance: settings.balance,
        })
    }
}

fn validate_kappa(kappa: f64) -> std::result::Result<(), RatingError> {
    // Written to reject NaN as well
    if !(kappa > 0.0) {
        return Err(RatingError::InvalidConfiguration {
            message: format!("Kappa must be positive, got {}", kappa),
        });
    }
    Ok(())
}

impl Default for RatingModelConfig {
    fn default() -> Self {
        let settings = RatingSettings::default();
        Self {
            beta: settings.beta,
            limit_sigma: settings.limit_sigma,
            kappa: settings.kappa,
            tau: settings.tau,
            balance: settings.balance,
        }
    }
}

impl RatingModelConfig {
    /// Create a configuration, rejecting a non-positive `kappa`
    pub fn new(
        beta: f64,
        limit_sigma: bool,
        kappa: f64,
        tau: f64,
        balance: BalanceConfig,
    ) -> Result<Self> {
        let config: Self = RatingSettings {
            beta,
            limit_sigma,
            kappa,
            tau,
            balance,
        }
        .try_into()?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut settings = RatingSettings::default();

        if let Some(beta) = parse_env("RATING_BETA")? {
            settings.beta = beta;
        }
        if let Some(limit_sigma) = parse_env("RATING_LIMIT_SIGMA")? {
            settings.limit_sigma = limit_sigma;
        }
        if let Some(kappa) = parse_env("RATING_KAPPA")? {
            settings.kappa = kappa;
        }
        if let Some(tau) = parse_env("RATING_TAU")? {
            settings.tau = tau;
        }

        // Balance settings
        if let Some(enable) = parse_env("RATING_BALANCE")? {
            settings.balance.enable = enable;
        }
        if let Some(z) = parse_env("RATING_BALANCE_Z")? {
            settings.balance.z = z;
        }
        if let Some(alpha) = parse_env("RATING_BALANCE_ALPHA")? {
            settings.balance.alpha = alpha;
        }
        if let Some(target) = parse_env("RATING_BALANCE_TARGET")? {
            settings.balance.target = target;
        }

        let config: Self = settings.try_into()?;
        debug!(?config, "Loaded rating configuration from environment");
        Ok(config)
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| {
            RatingError::InvalidConfiguration {
                message: format!("Invalid rating configuration: {}", e),
            }
            .into()
        })
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| RatingError::InvalidConfiguration {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;

        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), ?config, "Loaded rating configuration file");
        Ok(config)
    }

    pub fn with_beta(self, beta: f64) -> Self {
        Self { beta, ..self }
    }

    pub fn with_limit_sigma(self, limit_sigma: bool) -> Self {
        Self {
            limit_sigma,
            ..self
        }
    }

    pub fn with_kappa(self, kappa: f64) -> Result<Self> {
        validate_kappa(kappa)?;
        Ok(Self { kappa, ..self })
    }

    pub fn with_tau(self, tau: f64) -> Self {
        Self { tau, ..self }
    }

    pub fn with_balance(self, balance: BalanceConfig) -> Self {
        Self { balance, ..self }
    }

    /// Spread of performance around skill
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Whether an update may never raise a player's sigma
    pub fn limit_sigma(&self) -> bool {
        self.limit_sigma
    }

    /// Floor on the posterior variance factor
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Uncertainty added to every player before a match
    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn balance(&self) -> &BalanceConfig {
        &self.balance
    }
}

fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            RatingError::InvalidConfiguration {
                message: format!("Invalid {} value: {}", name, value),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

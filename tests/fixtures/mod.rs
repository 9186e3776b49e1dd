//! Golden rating datasets for integration testing
//!
//! Each `<model>.json` file holds named scenarios: a config override, the
//! ranked teams as raw players, and the expected adjustment for every player
//! in output order.

use serde::Deserialize;
use skill_adjudicator::{
    Aggregator, AggregatorKind, ModelKind, PlayerResult, RatingModelConfig, TeamResult,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Absolute tolerance used when a scenario does not set its own
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub model: ModelKind,
    pub scenarios: BTreeMap<String, Scenario>,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: RatingModelConfig,
    pub teams: Vec<TeamFixture>,
    pub expected: Vec<ExpectedAdjustment>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

#[derive(Debug, Deserialize)]
pub struct TeamFixture {
    pub rank: u32,
    pub players: Vec<PlayerResult<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedAdjustment {
    pub player_id: String,
    pub mu: f64,
    pub sigma: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Scenario {
    /// Aggregate every team with the default aggregator under the scenario config
    pub fn team_results(&self) -> Vec<TeamResult<String>> {
        let aggregator = Aggregator::new(AggregatorKind::Default, &self.config);
        self.teams
            .iter()
            .map(|team| TeamResult::from_players(&aggregator, team.rank, team.players.clone()))
            .collect()
    }
}

/// Load the dataset stored in `tests/fixtures/<name>.json`
pub fn load_dataset(name: &str) -> Dataset {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures"]
        .iter()
        .collect::<PathBuf>()
        .join(format!("{}.json", name));

    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&source)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Every golden dataset, one per rating model
pub fn all_datasets() -> Vec<Dataset> {
    ["plackett_luce", "bradley_terry_full", "thurstone_mosteller_full"]
        .into_iter()
        .map(load_dataset)
        .collect()
}

/// Build a team of identical players with ids `prefix0`, `prefix1`, ...
pub fn uniform_team(
    config: &RatingModelConfig,
    prefix: &str,
    rank: u32,
    size: usize,
    mu: f64,
    sigma: f64,
) -> TeamResult<String> {
    let players = (0..size)
        .map(|i| PlayerResult::new(format!("{}{}", prefix, i), mu, sigma))
        .collect();
    TeamResult::from_players(&Aggregator::new(AggregatorKind::Default, config), rank, players)
}

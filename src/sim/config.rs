//! Configuration for the equity simulator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default number of Monte Carlo trials per analysis.
pub const DEFAULT_TRIALS: u64 = 5000;

/// Declared opponent style for an analysis.
///
/// This label travels through configs and reports, but it does NOT
/// change sampling: every trial draws the opponent's hand uniformly
/// from the remaining deck. The label is deliberately inert; making
/// the sampler profile-aware would change results, not fix them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpponentProfile {
    /// Any two cards.
    #[default]
    Random,
    /// An opponent who entered a single-raised pot.
    SingleRaisedPot,
    /// An opponent who 3-bet.
    ThreeBetPot,
    /// An opponent who 4-bet.
    FourBetPot,
    /// An opponent who 5-bet or shoved.
    FiveBetPlusPot,
}

impl OpponentProfile {
    /// Human-readable profile name.
    pub fn name(&self) -> &'static str {
        match self {
            OpponentProfile::Random => "Random",
            OpponentProfile::SingleRaisedPot => "Raised Pot",
            OpponentProfile::ThreeBetPot => "3-Bet Pot",
            OpponentProfile::FourBetPot => "4-Bet Pot",
            OpponentProfile::FiveBetPlusPot => "5-Bet+ Pot",
        }
    }

    /// Parse a CLI label like `random`, `raised`, `3bet`, `4bet`, `5bet`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "random" => Some(OpponentProfile::Random),
            "raised" | "srp" => Some(OpponentProfile::SingleRaisedPot),
            "3bet" => Some(OpponentProfile::ThreeBetPot),
            "4bet" => Some(OpponentProfile::FourBetPot),
            "5bet" | "5bet+" => Some(OpponentProfile::FiveBetPlusPot),
            _ => None,
        }
    }
}

impl fmt::Display for OpponentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for a Monte Carlo equity run.
///
/// # Example
/// ```
/// use holdem_equity::sim::SimulationConfig;
///
/// let config = SimulationConfig::default().with_trials(10_000).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of trials to run. Must be positive.
    pub trials: u64,

    /// Number of worker threads for trial sharding.
    ///
    /// `None` uses the rayon default (all available cores). `Some(1)`
    /// forces a sequential run.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If set, every shard derives its generator from this seed and the
    /// shard index, so repeated runs with identical inputs produce
    /// identical counts. If `None`, each shard seeds from entropy.
    pub seed: Option<u64>,

    /// Declared opponent style. Inert; see [`OpponentProfile`].
    pub opponent_profile: OpponentProfile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            num_threads: None,
            seed: None,
            opponent_profile: OpponentProfile::Random,
        }
    }
}

impl SimulationConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the trial count.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the opponent profile label.
    pub fn with_profile(mut self, profile: OpponentProfile) -> Self {
        self.opponent_profile = profile;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrialCount(self.trials));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating a simulation config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The trial count must be positive.
    InvalidTrialCount(u64),
    /// The config file could not be read.
    IoError(String),
    /// The config file could not be parsed.
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTrialCount(trials) => {
                write!(f, "trial count {} must be positive", trials)
            }
            ConfigError::IoError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.trials, DEFAULT_TRIALS);
        assert_eq!(config.num_threads, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.opponent_profile, OpponentProfile::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = SimulationConfig::new()
            .with_trials(100)
            .with_threads(2)
            .with_seed(7)
            .with_profile(OpponentProfile::ThreeBetPot);
        assert_eq!(config.trials, 100);
        assert_eq!(config.num_threads, Some(2));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.opponent_profile, OpponentProfile::ThreeBetPot);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = SimulationConfig::default().with_trials(0);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidTrialCount(0)
        );
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::default().with_trials(2500).with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = SimulationConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.trials, 2500);
        assert_eq!(parsed.seed, Some(9));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            SimulationConfig::from_json_str("{"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{"trials":0,"num_threads":null,"seed":null,"opponent_profile":"Random"}"#),
            Err(ConfigError::InvalidTrialCount(0))
        ));
    }

    #[test]
    fn test_profile_labels() {
        assert_eq!(
            OpponentProfile::from_label("3bet"),
            Some(OpponentProfile::ThreeBetPot)
        );
        assert_eq!(
            OpponentProfile::from_label("RANDOM"),
            Some(OpponentProfile::Random)
        );
        assert_eq!(OpponentProfile::from_label("gto"), None);
        assert_eq!(OpponentProfile::FiveBetPlusPot.name(), "5-Bet+ Pot");
    }
}

//! Monte Carlo equity simulation.
//!
//! [`EquitySimulator`] runs independent trials against a uniformly
//! random opponent hand and unknown runout, reporting aggregate
//! win/tie/loss counts. Configuration (trial count, threads, seed,
//! opponent profile label) lives in [`SimulationConfig`].

pub mod config;
pub mod simulator;

pub use config::{ConfigError, OpponentProfile, SimulationConfig, DEFAULT_TRIALS};
pub use simulator::{EquitySimulator, SimulationError, SimulationResult};

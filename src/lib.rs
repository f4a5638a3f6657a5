//! # Hold'em Equity
//!
//! A Monte Carlo equity engine and pot-odds advisor for heads-up Texas
//! Hold'em.
//!
//! ## Features
//!
//! - **Strict card parsing**: two-character tokens, typed errors, no
//!   silent fallbacks
//! - **5-7 card evaluator**: totally ordered hand scores over the nine
//!   standard categories, wheel included
//! - **Monte Carlo simulator**: uniform unknown opponent, rayon-sharded
//!   trials, optional seeding and cancellation
//! - **Advisory layer**: pot odds, EV, buffered recommendations, stock
//!   preflop ranges
//!
//! ## Quick Start
//!
//! ```ignore
//! use holdem_equity::cards::{Board, HoleCards};
//! use holdem_equity::sim::{EquitySimulator, SimulationConfig};
//!
//! let hero = HoleCards::parse("AsKs")?;
//! let board = Board::parse("Kh4h5c")?;
//!
//! let sim = EquitySimulator::new(SimulationConfig::default());
//! let result = sim.run(&hero, &board)?;
//! println!("equity: {:.1}%", result.equity_percent());
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: card, board, and deck primitives
//! - [`eval`]: 5-7 card hand evaluation
//! - [`sim`]: the Monte Carlo equity simulator
//! - [`advice`]: pot odds, recommendations, and range context
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Advisory Layer                     │
//! │  - Pot odds / EV          - Recommendations         │
//! │  - Range context          - Analysis reports        │
//! └─────────────────────────────────────────────────────┘
//!                          │ equity %
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                 Equity Simulator                    │
//! │  - Trial sharding         - Win/tie/loss tally      │
//! └─────────────────────────────────────────────────────┘
//!            │                          │
//!            ▼                          ▼
//!     ┌────────────┐            ┌──────────────┐
//!     │    Deck    │            │  Evaluator   │
//!     └────────────┘            └──────────────┘
//!            │                          │
//!            └──────────┬───────────────┘
//!                       ▼
//!                ┌────────────┐
//!                │    Card    │
//!                └────────────┘
//! ```

#![warn(missing_docs)]

pub mod advice;
pub mod cards;
pub mod eval;
pub mod sim;

// Re-export commonly used types at crate root for convenience
pub use advice::{analyze, Analysis, Recommendation};
pub use cards::{Board, Card, Deck, HoleCards};
pub use eval::{evaluate, HandCategory, HandScore};
pub use sim::{EquitySimulator, SimulationConfig, SimulationResult};

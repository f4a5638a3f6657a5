//! Monte Carlo equity estimation.
//!
//! Each trial builds a fresh deck with the known cards removed, deals
//! the opponent two random cards, completes the board, and compares the
//! two seven-card hands. Ties count as half a win. Trials are
//! independent, so they shard freely across rayon workers; only the
//! win/tie/loss counts are merged, and summation is order-independent.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};

use crate::cards::{Board, Card, CardError, Deck, DeckError, HoleCards};
use crate::eval::{evaluate, EvalError};

use super::config::{ConfigError, SimulationConfig};

/// Trials per work batch. Small enough that cancellation and progress
/// stay responsive, large enough that batch overhead is noise.
const BATCH_SIZE: u64 = 1024;

/// Stride between per-shard seeds, so neighboring shards do not start
/// their generators on adjacent states.
const SHARD_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Errors produced while validating inputs or running a simulation.
#[derive(Debug, Clone)]
pub enum SimulationError {
    /// The hero hand failed to parse or its two cards are identical.
    InvalidHeroHand(String),
    /// The board failed to parse, exceeds five cards, or duplicates
    /// itself or the hero hand.
    InvalidBoard(String),
    /// The simulation configuration is invalid.
    Config(ConfigError),
    /// The deck ran out of cards mid-trial. Structurally impossible
    /// after input validation, but never silently ignored.
    Deck(DeckError),
    /// Hand evaluation rejected a trial's cards. As with `Deck`, this
    /// cannot occur for validated inputs.
    Eval(EvalError),
    /// The run was cancelled before completing.
    Cancelled {
        /// Trials finished before the cancellation was observed.
        completed: u64,
    },
    /// The worker thread pool could not be built.
    ThreadPool(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidHeroHand(msg) => write!(f, "invalid hero hand: {}", msg),
            SimulationError::InvalidBoard(msg) => write!(f, "invalid board: {}", msg),
            SimulationError::Config(err) => write!(f, "invalid configuration: {}", err),
            SimulationError::Deck(err) => write!(f, "deck error: {}", err),
            SimulationError::Eval(err) => write!(f, "evaluation error: {}", err),
            SimulationError::Cancelled { completed } => {
                write!(f, "simulation cancelled after {} trials", completed)
            }
            SimulationError::ThreadPool(msg) => write!(f, "failed to build thread pool: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Config(err)
    }
}

impl From<DeckError> for SimulationError {
    fn from(err: DeckError) -> Self {
        SimulationError::Deck(err)
    }
}

impl From<EvalError> for SimulationError {
    fn from(err: EvalError) -> Self {
        SimulationError::Eval(err)
    }
}

/// Outcome of a single trial, from the hero's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrialOutcome {
    Win,
    Tie,
    Loss,
}

/// Aggregate win/tie/loss counts over a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Trials the hero won outright.
    pub wins: u64,
    /// Trials that split the pot.
    pub ties: u64,
    /// Trials the hero lost.
    pub losses: u64,
}

impl SimulationResult {
    /// Total number of trials tallied.
    pub fn trials(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Equity as a fraction in [0, 1]: wins plus half the ties.
    pub fn equity_fraction(&self) -> f64 {
        let trials = self.trials();
        if trials == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / trials as f64
    }

    /// Equity as a percentage in [0, 100].
    pub fn equity_percent(&self) -> f64 {
        self.equity_fraction() * 100.0
    }

    fn record(&mut self, outcome: TrialOutcome) {
        match outcome {
            TrialOutcome::Win => self.wins += 1,
            TrialOutcome::Tie => self.ties += 1,
            TrialOutcome::Loss => self.losses += 1,
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.wins += other.wins;
        self.ties += other.ties;
        self.losses += other.losses;
        self
    }
}

/// Monte Carlo equity simulator for one hero hand against an unknown
/// opponent.
///
/// # Example
/// ```no_run
/// use holdem_equity::cards::{Board, HoleCards};
/// use holdem_equity::sim::{EquitySimulator, SimulationConfig};
///
/// let sim = EquitySimulator::new(SimulationConfig::default().with_seed(42));
/// let hero = HoleCards::parse("AsAh").unwrap();
/// let result = sim.run(&hero, &Board::new()).unwrap();
/// println!("equity: {:.1}%", result.equity_percent());
/// ```
#[derive(Debug, Clone)]
pub struct EquitySimulator {
    config: SimulationConfig,
}

impl EquitySimulator {
    /// Create a simulator with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The simulator's configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Parse hero and board tokens, then run the simulation.
    ///
    /// Parsing is strict: malformed hero tokens fail with
    /// [`SimulationError::InvalidHeroHand`], malformed boards with
    /// [`SimulationError::InvalidBoard`]. Nothing falls back to an
    /// empty board or a zero result.
    pub fn run_tokens(&self, hero: &str, board: &str) -> Result<SimulationResult, SimulationError> {
        let hero = HoleCards::parse(hero)
            .map_err(|e| SimulationError::InvalidHeroHand(e.to_string()))?;
        let board =
            Board::parse(board).map_err(|e| SimulationError::InvalidBoard(e.to_string()))?;
        self.run(&hero, &board)
    }

    /// Run the configured number of trials for a hero hand and board.
    pub fn run(
        &self,
        hero: &HoleCards,
        board: &Board,
    ) -> Result<SimulationResult, SimulationError> {
        self.run_monitored(hero, board, None, None::<fn(u64)>)
    }

    /// Run with optional cancellation and progress reporting.
    ///
    /// The cancel flag is polled between batches; a cancelled run fails
    /// with [`SimulationError::Cancelled`] rather than returning a
    /// partial estimate. The progress callback receives the cumulative
    /// number of completed trials after each batch.
    pub fn run_monitored<F>(
        &self,
        hero: &HoleCards,
        board: &Board,
        cancel: Option<&AtomicBool>,
        progress: Option<F>,
    ) -> Result<SimulationResult, SimulationError>
    where
        F: Fn(u64) + Sync,
    {
        self.config.validate()?;
        validate_matchup(hero, board)?;

        let dead: Vec<Card> = hero
            .cards()
            .iter()
            .copied()
            .chain(board.cards().iter().copied())
            .collect();

        let trials = self.config.trials;
        let num_batches = (trials + BATCH_SIZE - 1) / BATCH_SIZE;
        let completed = AtomicU64::new(0);

        let run_batch = |batch_idx: u64| -> Result<SimulationResult, SimulationError> {
            if let Some(flag) = cancel {
                if flag.load(AtomicOrdering::Relaxed) {
                    return Err(SimulationError::Cancelled {
                        completed: completed.load(AtomicOrdering::Relaxed),
                    });
                }
            }

            let batch_trials = batch_len(trials, batch_idx);
            let mut rng = self.shard_rng(batch_idx);
            let mut tally = SimulationResult::default();
            for _ in 0..batch_trials {
                tally.record(run_trial(hero, board, &dead, &mut rng)?);
            }

            let done = completed.fetch_add(batch_trials, AtomicOrdering::Relaxed) + batch_trials;
            if let Some(ref report) = progress {
                report(done);
            }
            Ok(tally)
        };

        let partials: Result<Vec<SimulationResult>, SimulationError> =
            if self.config.num_threads == Some(1) {
                (0..num_batches).map(run_batch).collect()
            } else {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.config.num_threads.unwrap_or(0))
                    .build()
                    .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
                pool.install(|| (0..num_batches).into_par_iter().map(run_batch).collect())
            };

        Ok(partials?
            .into_iter()
            .fold(SimulationResult::default(), SimulationResult::merge))
    }

    /// Generator for one shard: derived from the seed and shard index
    /// when a seed is set, from entropy otherwise.
    fn shard_rng(&self, shard: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => {
                StdRng::seed_from_u64(seed.wrapping_add(shard.wrapping_mul(SHARD_SEED_STRIDE)))
            }
            None => StdRng::from_entropy(),
        }
    }
}

/// Number of trials in the given batch (the last batch may be short).
fn batch_len(trials: u64, batch_idx: u64) -> u64 {
    let start = batch_idx * BATCH_SIZE;
    BATCH_SIZE.min(trials - start)
}

/// Reject matchups the trial loop cannot sample correctly.
fn validate_matchup(hero: &HoleCards, board: &Board) -> Result<(), SimulationError> {
    if hero.card1 == hero.card2 {
        return Err(SimulationError::InvalidHeroHand(
            CardError::DuplicateCard(hero.card1).to_string(),
        ));
    }
    for &card in board.cards() {
        if hero.contains(card) {
            return Err(SimulationError::InvalidBoard(
                CardError::DuplicateCard(card).to_string(),
            ));
        }
    }
    Ok(())
}

/// One independent trial: deal the opponent and the runout, evaluate
/// both seven-card hands, classify from the hero's perspective.
fn run_trial<R: Rng>(
    hero: &HoleCards,
    board: &Board,
    dead: &[Card],
    rng: &mut R,
) -> Result<TrialOutcome, SimulationError> {
    let mut deck = Deck::without(dead);
    let opponent = deck.draw(2, rng)?;
    let runout = deck.draw(5 - board.len(), rng)?;

    let mut hero_hand: Vec<Card> = Vec::with_capacity(7);
    hero_hand.extend_from_slice(&hero.cards());
    hero_hand.extend_from_slice(board.cards());
    hero_hand.extend_from_slice(&runout);

    let mut villain_hand: Vec<Card> = Vec::with_capacity(7);
    villain_hand.extend_from_slice(&opponent);
    villain_hand.extend_from_slice(board.cards());
    villain_hand.extend_from_slice(&runout);

    let hero_score = evaluate(&hero_hand)?;
    let villain_score = evaluate(&villain_hand)?;

    Ok(match hero_score.cmp(&villain_score) {
        Ordering::Greater => TrialOutcome::Win,
        Ordering::Equal => TrialOutcome::Tie,
        Ordering::Less => TrialOutcome::Loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(trials: u64, seed: u64) -> EquitySimulator {
        EquitySimulator::new(SimulationConfig::default().with_trials(trials).with_seed(seed))
    }

    #[test]
    fn test_counts_sum_to_trials() {
        let sim = simulator(3000, 5);
        let hero = HoleCards::parse("QdJd").unwrap();
        let board = Board::parse("2c7h9s").unwrap();
        let result = sim.run(&hero, &board).unwrap();
        assert_eq!(result.trials(), 3000);
    }

    #[test]
    fn test_pocket_aces_equity_benchmark() {
        // AA vs a random hand preflop is a known ~85% matchup.
        let sim = simulator(50_000, 42);
        let hero = HoleCards::parse("AsAh").unwrap();
        let result = sim.run(&hero, &Board::new()).unwrap();
        let equity = result.equity_percent();
        assert!(
            (82.0..=88.0).contains(&equity),
            "AA equity {:.2}% outside expected band",
            equity
        );
    }

    #[test]
    fn test_trash_hand_has_low_equity() {
        let sim = simulator(10_000, 42);
        let hero = HoleCards::parse("7h2s").unwrap();
        let result = sim.run(&hero, &Board::new()).unwrap();
        let equity = result.equity_percent();
        assert!(equity < 42.0, "72o equity {:.2}% too high", equity);
    }

    #[test]
    fn test_board_plays_for_both_is_a_pure_tie() {
        // Royal flush on the board: every showdown splits.
        let sim = simulator(500, 1);
        let hero = HoleCards::parse("2h3d").unwrap();
        let board = Board::parse("AsKsQsJsTs").unwrap();
        let result = sim.run(&hero, &board).unwrap();
        assert_eq!(result.ties, 500);
        assert_eq!(result.equity_percent(), 50.0);
    }

    #[test]
    fn test_unbeatable_hand_wins_every_trial() {
        // Hero holds the royal; no opponent hand can tie it.
        let sim = simulator(500, 1);
        let hero = HoleCards::parse("AsKs").unwrap();
        let board = Board::parse("QsJsTs2h7d").unwrap();
        let result = sim.run(&hero, &board).unwrap();
        assert_eq!(result.wins, 500);
        assert_eq!(result.equity_percent(), 100.0);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let hero = HoleCards::parse("AdKd").unwrap();
        let board = Board::parse("7c8c9d").unwrap();
        let a = simulator(4000, 99).run(&hero, &board).unwrap();
        let b = simulator(4000, 99).run(&hero, &board).unwrap();
        assert_eq!(a, b);

        // Sequential and parallel sharding must agree for one seed.
        let config = SimulationConfig::default()
            .with_trials(4000)
            .with_seed(99)
            .with_threads(1);
        let c = EquitySimulator::new(config).run(&hero, &board).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_strict_input_validation() {
        let sim = simulator(100, 0);

        assert!(matches!(
            sim.run_tokens("AsXx", ""),
            Err(SimulationError::InvalidHeroHand(_))
        ));
        assert!(matches!(
            sim.run_tokens("AsAs", ""),
            Err(SimulationError::InvalidHeroHand(_))
        ));
        assert!(matches!(
            sim.run_tokens("AsKs", "garbage"),
            Err(SimulationError::InvalidBoard(_))
        ));
        assert!(matches!(
            sim.run_tokens("AsKs", "2c2c"),
            Err(SimulationError::InvalidBoard(_))
        ));
        // Board card colliding with the hero hand.
        assert!(matches!(
            sim.run_tokens("AsKs", "As7d2c"),
            Err(SimulationError::InvalidBoard(_))
        ));
        // Six board cards.
        assert!(matches!(
            sim.run_tokens("AsKs", "2c3c4c5c6c7c"),
            Err(SimulationError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let sim = EquitySimulator::new(SimulationConfig::default().with_trials(0));
        let hero = HoleCards::parse("AsKs").unwrap();
        assert!(matches!(
            sim.run(&hero, &Board::new()),
            Err(SimulationError::Config(ConfigError::InvalidTrialCount(0)))
        ));
    }

    #[test]
    fn test_cancellation() {
        let sim = simulator(100_000, 3);
        let hero = HoleCards::parse("AsKs").unwrap();
        let cancel = AtomicBool::new(true);
        let result = sim.run_monitored(&hero, &Board::new(), Some(&cancel), None::<fn(u64)>);
        assert!(matches!(result, Err(SimulationError::Cancelled { .. })));
    }

    #[test]
    fn test_progress_reports_reach_total() {
        let sim = EquitySimulator::new(
            SimulationConfig::default()
                .with_trials(2500)
                .with_seed(8)
                .with_threads(1),
        );
        let hero = HoleCards::parse("JhJs").unwrap();
        let reported = AtomicU64::new(0);
        sim.run_monitored(
            &hero,
            &Board::new(),
            None,
            Some(|done: u64| {
                reported.fetch_max(done, AtomicOrdering::Relaxed);
            }),
        )
        .unwrap();
        assert_eq!(reported.load(AtomicOrdering::Relaxed), 2500);
    }

    #[test]
    fn test_stronger_hand_has_more_equity() {
        let aa = simulator(5000, 17)
            .run(&HoleCards::parse("AcAd").unwrap(), &Board::new())
            .unwrap();
        let kq = simulator(5000, 17)
            .run(&HoleCards::parse("KcQd").unwrap(), &Board::new())
            .unwrap();
        assert!(aa.equity_percent() > kq.equity_percent());
    }
}

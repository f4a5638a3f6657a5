//! The advisory layer: pot odds, EV, recommendations, range context.
//!
//! Everything here consumes the equity engine's output; none of it
//! feeds back into sampling.

pub mod decision;
pub mod ranges;

pub use decision::{
    board_is_wet, expected_value, pot_odds_percent, recommend, recommend_when_checked,
    Recommendation, SizingAdvice, EQUITY_BUFFER,
};
pub use ranges::{hand_matrix, membership_matrix, PotType, RANKS_DESC};

use serde::Serialize;

use crate::cards::{Board, Card, HoleCards};
use crate::eval::evaluate;
use crate::sim::{EquitySimulator, SimulationConfig, SimulationError, SimulationResult};

/// A complete analysis of one decision point, ready for display or
/// JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Hero's hole cards, in token notation.
    pub hero: String,
    /// Known board cards, in token notation.
    pub board: String,
    /// Street implied by the board card count, if well-formed.
    pub street: Option<String>,
    /// Declared opponent profile label (inert for sampling).
    pub opponent_profile: String,
    /// Raw win/tie/loss counts from the simulation.
    pub result: SimulationResult,
    /// Estimated equity percentage in [0, 100].
    pub equity_percent: f64,
    /// Category of the hero's current made hand, when hero plus board
    /// reach five cards.
    pub made_hand: Option<String>,
    /// Pot size in big blinds.
    pub pot: f64,
    /// Cost to call in big blinds.
    pub cost_to_call: f64,
    /// Pot odds percentage in [0, 100].
    pub pot_odds_percent: f64,
    /// Expected value of calling, in big blinds.
    pub expected_value: f64,
    /// Recommended action.
    pub recommendation: Recommendation,
    /// Suggested line when checked to (only when there is no bet).
    pub check_advice: Option<SizingAdvice>,
}

impl Analysis {
    /// Assemble a report from an already-computed simulation result.
    pub fn from_result(
        hero: &HoleCards,
        board: &Board,
        pot: f64,
        cost_to_call: f64,
        profile_name: &str,
        result: SimulationResult,
    ) -> Self {
        let equity = result.equity_percent();
        let pot_odds = pot_odds_percent(pot, cost_to_call);
        let check_advice = if cost_to_call <= 0.0 {
            Some(recommend_when_checked(equity, board))
        } else {
            None
        };
        Self {
            hero: hero.to_string(),
            board: board.to_string(),
            street: board.street().map(|s| s.to_string()),
            opponent_profile: profile_name.to_string(),
            result,
            equity_percent: equity,
            made_hand: made_hand_label(hero, board),
            pot,
            cost_to_call,
            pot_odds_percent: pot_odds,
            expected_value: expected_value(equity, pot, cost_to_call),
            recommendation: recommend(equity, pot, cost_to_call),
            check_advice,
        }
    }
}

/// Run the full pipeline for one decision point: simulate equity, then
/// derive pot odds, EV, and a recommendation.
pub fn analyze(
    hero: &HoleCards,
    board: &Board,
    pot: f64,
    cost_to_call: f64,
    config: &SimulationConfig,
) -> Result<Analysis, SimulationError> {
    let profile = config.opponent_profile;
    let result = EquitySimulator::new(config.clone()).run(hero, board)?;
    Ok(Analysis::from_result(
        hero,
        board,
        pot,
        cost_to_call,
        profile.name(),
        result,
    ))
}

/// Category name of the hero's current best hand, when one exists.
fn made_hand_label(hero: &HoleCards, board: &Board) -> Option<String> {
    if 2 + board.len() < 5 {
        return None;
    }
    let mut cards: Vec<Card> = Vec::with_capacity(7);
    cards.extend_from_slice(&hero.cards());
    cards.extend_from_slice(board.cards());
    evaluate(&cards)
        .ok()
        .map(|score| score.category().name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_profitable_spot() {
        // AKo preflop facing 20 into 100: pot odds 16.67%, and AK's
        // equity against a random hand is far above the 21.67% bar.
        let hero = HoleCards::parse("AsKd").unwrap();
        let board = Board::new();
        let config = SimulationConfig::default().with_trials(10_000).with_seed(4);

        let analysis = analyze(&hero, &board, 100.0, 20.0, &config).unwrap();
        assert!((analysis.pot_odds_percent - 16.6667).abs() < 0.01);
        assert!(analysis.equity_percent > 55.0);
        assert_eq!(analysis.recommendation, Recommendation::CallOrRaise);
        assert_eq!(analysis.street.as_deref(), Some("Preflop"));
        assert_eq!(analysis.made_hand, None);
        assert_eq!(analysis.check_advice, None);
    }

    #[test]
    fn test_analyze_free_check() {
        let hero = HoleCards::parse("AsKd").unwrap();
        let board = Board::new();
        let config = SimulationConfig::default().with_trials(2000).with_seed(4);

        let analysis = analyze(&hero, &board, 100.0, 0.0, &config).unwrap();
        assert_eq!(analysis.recommendation, Recommendation::Check);
        assert_eq!(analysis.pot_odds_percent, 0.0);
        assert!(analysis.check_advice.is_some());
    }

    #[test]
    fn test_made_hand_label() {
        let hero = HoleCards::parse("AsKs").unwrap();
        let board = Board::parse("QsJsTs").unwrap();
        let config = SimulationConfig::default().with_trials(200).with_seed(2);

        let analysis = analyze(&hero, &board, 10.0, 0.0, &config).unwrap();
        assert_eq!(analysis.made_hand.as_deref(), Some("Straight Flush"));
        assert_eq!(analysis.equity_percent, 100.0);
    }

    #[test]
    fn test_report_serializes() {
        let hero = HoleCards::parse("9h9d").unwrap();
        let board = Board::parse("2c7h9s").unwrap();
        let config = SimulationConfig::default().with_trials(500).with_seed(6);

        let analysis = analyze(&hero, &board, 40.0, 10.0, &config).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"equity_percent\""));
        assert!(json.contains("\"recommendation\""));
    }
}

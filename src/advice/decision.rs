//! Pot-odds arithmetic and action recommendations.
//!
//! Consumes the simulator's equity percentage; produces no input the
//! engine depends on. The facing-a-bet rule compares equity to pot odds
//! with a fixed safety buffer; the checked-to-me sizing tiers follow
//! the board texture.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Board;

/// Safety buffer, in percentage points, that equity must clear above
/// pot odds before a call is considered clearly profitable.
pub const EQUITY_BUFFER: f64 = 5.0;

/// Equity above which a value bet is recommended when checked to.
const VALUE_BET_THRESHOLD: f64 = 65.0;

/// Equity above which checking back keeps showdown value.
const CHECK_BACK_THRESHOLD: f64 = 45.0;

/// Equity above which a semi-bluff is worthwhile on a wet board.
const SEMI_BLUFF_THRESHOLD: f64 = 25.0;

/// Pot odds as a percentage: the cost of a call relative to the final
/// pot. Zero when there is nothing to call.
pub fn pot_odds_percent(pot: f64, cost_to_call: f64) -> f64 {
    if cost_to_call <= 0.0 {
        return 0.0;
    }
    cost_to_call / (pot + cost_to_call) * 100.0
}

/// Expected value of a call in big blinds: win the pot plus the call
/// at `equity`, lose the call otherwise.
pub fn expected_value(equity_percent: f64, pot: f64, cost_to_call: f64) -> f64 {
    let equity = equity_percent / 100.0;
    equity * (pot + cost_to_call) - (1.0 - equity) * cost_to_call
}

/// Recommended action when facing a bet (or not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Nothing to call; checking is free.
    Check,
    /// Equity clears pot odds with room to spare.
    CallOrRaise,
    /// Equity covers pot odds but within the safety buffer.
    MarginalCall,
    /// Equity does not justify the price.
    Fold,
}

impl Recommendation {
    /// Human-readable recommendation.
    pub fn name(&self) -> &'static str {
        match self {
            Recommendation::Check => "Check",
            Recommendation::CallOrRaise => "Call/Raise (profitable)",
            Recommendation::MarginalCall => "Marginal Call",
            Recommendation::Fold => "Fold",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Recommend an action from equity, pot size, and the cost to call.
///
/// A zero call cost is always a check. Otherwise equity must beat pot
/// odds plus [`EQUITY_BUFFER`] for a clearly profitable call, merely
/// reach pot odds for a marginal one, and folds below that.
pub fn recommend(equity_percent: f64, pot: f64, cost_to_call: f64) -> Recommendation {
    if cost_to_call <= 0.0 {
        return Recommendation::Check;
    }
    let pot_odds = pot_odds_percent(pot, cost_to_call);
    if equity_percent > pot_odds + EQUITY_BUFFER {
        Recommendation::CallOrRaise
    } else if equity_percent >= pot_odds {
        Recommendation::MarginalCall
    } else {
        Recommendation::Fold
    }
}

/// Whether the board is draw-heavy: any two board ranks within one
/// step of each other (pairs count).
pub fn board_is_wet(board: &Board) -> bool {
    let mut ranks: Vec<u8> = board.cards().iter().map(|c| c.rank()).collect();
    ranks.sort_unstable();
    ranks.windows(2).any(|pair| pair[1] - pair[0] <= 1)
}

/// Suggested line when checked to (no bet to face).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizingAdvice {
    /// Bet for value at the given fraction of the pot.
    ValueBet {
        /// Suggested bet as a fraction of the pot.
        pot_fraction: f64,
    },
    /// Check back and keep showdown value.
    CheckBack,
    /// Bet as a semi-bluff at the given fraction of the pot.
    SemiBluff {
        /// Suggested bet as a fraction of the pot.
        pot_fraction: f64,
    },
    /// Give up on the pot.
    CheckFold,
}

impl fmt::Display for SizingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingAdvice::ValueBet { pot_fraction } => {
                write!(f, "Value bet {:.0}% of pot", pot_fraction * 100.0)
            }
            SizingAdvice::CheckBack => write!(f, "Check back"),
            SizingAdvice::SemiBluff { pot_fraction } => {
                write!(f, "Semi-bluff {:.0}% of pot", pot_fraction * 100.0)
            }
            SizingAdvice::CheckFold => write!(f, "Check/Fold"),
        }
    }
}

/// Suggest a bet size when checked to: big hands bet (larger on wet
/// boards, thin on dry ones), medium hands check back, draws
/// semi-bluff wet boards, air gives up.
pub fn recommend_when_checked(equity_percent: f64, board: &Board) -> SizingAdvice {
    let wet = board_is_wet(board);
    if equity_percent > VALUE_BET_THRESHOLD {
        let pot_fraction = if wet { 0.75 } else { 0.33 };
        SizingAdvice::ValueBet { pot_fraction }
    } else if equity_percent > CHECK_BACK_THRESHOLD {
        SizingAdvice::CheckBack
    } else if wet && equity_percent > SEMI_BLUFF_THRESHOLD {
        SizingAdvice::SemiBluff { pot_fraction: 0.5 }
    } else {
        SizingAdvice::CheckFold
    }
}

//! Preflop range context by pot type.
//!
//! Four stock continuing ranges (single-raised through 5-bet+ pots)
//! expressed in 169-class notation, with the 13x13 matrix used to
//! render a range grid. These are display/context data only: the
//! simulator keeps sampling the opponent uniformly.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::HoleCards;
use crate::sim::OpponentProfile;

/// Rank characters from ace down to deuce, the grid axis order.
pub const RANKS_DESC: [char; 13] = [
    'A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2',
];

const SINGLE_RAISED_RANGE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "AKo", "AQo", "AJo", "ATo", "AKs", "AQs",
    "AJs", "ATs", "KQs", "KJs", "QJs", "JTs",
];

const THREE_BET_RANGE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "AKo", "AQo", "AKs", "AQs", "AJs", "KQs",
];

const FOUR_BET_RANGE: &[&str] = &["AA", "KK", "QQ", "AKo", "AKs", "AQs"];

const FIVE_BET_PLUS_RANGE: &[&str] = &["AA", "KK", "AKs"];

/// Pot context for a stock preflop continuing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotType {
    /// One raise went in preflop.
    SingleRaised,
    /// The pot was 3-bet.
    ThreeBet,
    /// The pot was 4-bet.
    FourBet,
    /// The pot was 5-bet or more.
    FiveBetPlus,
}

impl PotType {
    /// Human-readable pot-type name.
    pub fn name(&self) -> &'static str {
        match self {
            PotType::SingleRaised => "Raised Pot",
            PotType::ThreeBet => "3-Bet Pot",
            PotType::FourBet => "4-Bet Pot",
            PotType::FiveBetPlus => "5-Bet+ Pot",
        }
    }

    /// The hand classes in this pot type's stock range.
    pub fn hands(&self) -> &'static [&'static str] {
        match self {
            PotType::SingleRaised => SINGLE_RAISED_RANGE,
            PotType::ThreeBet => THREE_BET_RANGE,
            PotType::FourBet => FOUR_BET_RANGE,
            PotType::FiveBetPlus => FIVE_BET_PLUS_RANGE,
        }
    }

    /// Whether a holding falls inside this pot type's range.
    pub fn contains(&self, hole: &HoleCards) -> bool {
        let class = hole.class_string();
        self.hands().iter().any(|&hand| hand == class)
    }

    /// The pot type matching an opponent profile label, if any
    /// (a `Random` opponent has no range to show).
    pub fn for_profile(profile: OpponentProfile) -> Option<Self> {
        match profile {
            OpponentProfile::Random => None,
            OpponentProfile::SingleRaisedPot => Some(PotType::SingleRaised),
            OpponentProfile::ThreeBetPot => Some(PotType::ThreeBet),
            OpponentProfile::FourBetPot => Some(PotType::FourBet),
            OpponentProfile::FiveBetPlusPot => Some(PotType::FiveBetPlus),
        }
    }
}

impl fmt::Display for PotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The 13x13 hand-class matrix: pairs on the diagonal, suited hands
/// above it, offsuit hands below, ranks descending from ace.
pub fn hand_matrix() -> [[String; 13]; 13] {
    std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            let r1 = RANKS_DESC[row];
            let r2 = RANKS_DESC[col];
            if row == col {
                format!("{}{}", r1, r2)
            } else if row < col {
                format!("{}{}s", r1, r2)
            } else {
                format!("{}{}o", r2, r1)
            }
        })
    })
}

/// Which cells of [`hand_matrix`] fall inside a pot type's range.
pub fn membership_matrix(pot: PotType) -> [[bool; 13]; 13] {
    let in_range: FxHashSet<&'static str> = pot.hands().iter().copied().collect();
    let matrix = hand_matrix();
    std::array::from_fn(|row| std::array::from_fn(|col| in_range.contains(matrix[row][col].as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(s: &str) -> HoleCards {
        HoleCards::parse(s).unwrap()
    }

    #[test]
    fn test_premiums_in_every_range() {
        let aa = hole("AhAs");
        for pot in [
            PotType::SingleRaised,
            PotType::ThreeBet,
            PotType::FourBet,
            PotType::FiveBetPlus,
        ] {
            assert!(pot.contains(&aa), "AA missing from {}", pot);
        }
    }

    #[test]
    fn test_trash_in_no_range() {
        let trash = hole("7h2s");
        for pot in [
            PotType::SingleRaised,
            PotType::ThreeBet,
            PotType::FourBet,
            PotType::FiveBetPlus,
        ] {
            assert!(!pot.contains(&trash), "72o present in {}", pot);
        }
    }

    #[test]
    fn test_range_narrows_by_pot_type() {
        assert!(PotType::SingleRaised.contains(&hole("JsTs")));
        assert!(!PotType::ThreeBet.contains(&hole("JsTs")));

        assert!(PotType::ThreeBet.contains(&hole("JhJs")));
        assert!(!PotType::FourBet.contains(&hole("JhJs")));

        assert!(PotType::FourBet.contains(&hole("AsQs")));
        assert!(!PotType::FiveBetPlus.contains(&hole("AsQs")));

        // Suitedness matters: AKo is a 4-bet hand but not a 5-bet one.
        assert!(PotType::FourBet.contains(&hole("AsKd")));
        assert!(!PotType::FiveBetPlus.contains(&hole("AsKd")));
        assert!(PotType::FiveBetPlus.contains(&hole("AsKs")));
    }

    #[test]
    fn test_hand_matrix_layout() {
        let matrix = hand_matrix();
        assert_eq!(matrix[0][0], "AA");
        assert_eq!(matrix[12][12], "22");
        assert_eq!(matrix[0][1], "AKs");
        assert_eq!(matrix[1][0], "AKo");
        assert_eq!(matrix[0][12], "A2s");
        assert_eq!(matrix[12][0], "A2o");
    }

    #[test]
    fn test_membership_matrix_matches_range() {
        let mask = membership_matrix(PotType::FiveBetPlus);
        let matrix = hand_matrix();
        let mut count = 0;
        for row in 0..13 {
            for col in 0..13 {
                if mask[row][col] {
                    count += 1;
                    assert!(PotType::FiveBetPlus
                        .hands()
                        .contains(&matrix[row][col].as_str()));
                }
            }
        }
        assert_eq!(count, PotType::FiveBetPlus.hands().len());
    }

    #[test]
    fn test_profile_mapping() {
        assert_eq!(PotType::for_profile(OpponentProfile::Random), None);
        assert_eq!(
            PotType::for_profile(OpponentProfile::ThreeBetPot),
            Some(PotType::ThreeBet)
        );
    }
}

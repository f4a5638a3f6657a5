//! Poker hand evaluation.
//!
//! Scores 5, 6, or 7 distinct cards by their best five-card poker hand.
//! Scores are totally ordered: comparing two of them decides a showdown.
//! The 6- and 7-card paths exhaustively score every five-card subset
//! (21 combinations at most), which is plenty fast for simulation use.

use std::fmt;

use crate::cards::Card;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// No pair, no straight, no flush.
    HighCard = 0,
    /// Exactly one pair.
    OnePair = 1,
    /// Two distinct pairs.
    TwoPair = 2,
    /// Three cards of one rank.
    ThreeOfAKind = 3,
    /// Five ranks in sequence (ace plays high or low).
    Straight = 4,
    /// Five cards of one suit.
    Flush = 5,
    /// Three of a kind plus a pair.
    FullHouse = 6,
    /// Four cards of one rank.
    FourOfAKind = 7,
    /// A straight all in one suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Errors produced by [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Fewer than 5 or more than 7 cards were supplied.
    InvalidCardCount(usize),
    /// The same card appeared more than once in the input.
    DuplicateCard(Card),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::InvalidCardCount(count) => {
                write!(f, "hand evaluation needs 5-7 cards, got {}", count)
            }
            EvalError::DuplicateCard(card) => {
                write!(f, "card {} appears more than once", card)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// A comparable hand strength. Higher is better.
///
/// Packed as category in the top bits followed by five 4-bit tiebreak
/// ranks, so equal best-five hands compare equal regardless of suits or
/// which extra cards came along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore(u32);

impl HandScore {
    /// Pack a category and its tiebreak ranks (most significant first).
    fn new(category: HandCategory, tiebreaks: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &rank) in tiebreaks.iter().take(5).enumerate() {
            value |= (rank as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// The hand category this score falls in.
    pub fn category(&self) -> HandCategory {
        match self.0 >> 20 {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            _ => HandCategory::StraightFlush,
        }
    }
}

/// Evaluate 5-7 distinct cards, returning the score of the best
/// five-card hand they contain.
pub fn evaluate(cards: &[Card]) -> Result<HandScore, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::InvalidCardCount(n));
    }
    let mut seen = 0u64;
    for &card in cards {
        if seen & (1u64 << card.id()) != 0 {
            return Err(EvalError::DuplicateCard(card));
        }
        seen |= 1u64 << card.id();
    }

    // Every five-card subset; any legal hand outranks the zero sentinel.
    let mut best = HandScore(0);
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let score =
                            score_five([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if score > best {
                            best = score;
                        }
                    }
                }
            }
        }
    }
    Ok(best)
}

/// Score exactly five distinct cards.
fn score_five(cards: [Card; 5]) -> HandScore {
    let mut rank_counts = [0u8; 13];
    let mut rank_bits = 0u16;
    for card in &cards {
        rank_counts[card.rank() as usize] += 1;
        rank_bits |= 1 << card.rank();
    }

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight_high = straight_high(rank_bits);

    // A straight uses five distinct ranks, so it cannot coexist with
    // pairs; flush/straight checks can come ahead of the group patterns.
    if let Some(high) = straight_high {
        if is_flush {
            return HandScore::new(HandCategory::StraightFlush, &[high]);
        }
    }

    // Ranks grouped by multiplicity: count descending, then rank
    // descending. The group ranks in this order are exactly the
    // tiebreaks for every paired category.
    let mut groups: Vec<(u8, u8)> = rank_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(rank, &count)| (count, rank as u8))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let ranks: Vec<u8> = groups.iter().map(|&(_, rank)| rank).collect();

    let counts: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    let category = match counts[..] {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => {
            return HandScore::new(HandCategory::Straight, &[straight_high.unwrap_or(0)]);
        }
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandScore::new(category, &ranks)
}

/// The high-card rank of a straight in `rank_bits`, if any.
/// The wheel (A-2-3-4-5) reports the five as its high card.
fn straight_high(rank_bits: u16) -> Option<u8> {
    for high in (4..=12u8).rev() {
        let mask = 0b11111u16 << (high - 4);
        if rank_bits & mask == mask {
            return Some(high);
        }
    }
    const WHEEL: u16 = (1 << 12) | 0b1111;
    if rank_bits & WHEEL == WHEEL {
        return Some(3);
    }
    None
}

//! A 52-card deck with removal by value and uniform random draws.
//!
//! The deck never holds duplicates. Randomness is injected through a
//! `rand::Rng` parameter so callers control seeding and each simulation
//! shard can own an independent generator.

use rand::Rng;
use std::fmt;

use super::card::Card;

/// Error produced when a draw asks for more cards than remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// The deck has fewer cards than the draw requested.
    InsufficientCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards remaining.
        remaining: usize,
    },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::InsufficientCards {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "cannot draw {} cards from a deck of {}",
                    requested, remaining
                )
            }
        }
    }
}

impl std::error::Error for DeckError {}

/// A deck of up to 52 distinct playing cards.
#[derive(Clone)]
pub struct Deck {
    /// Live cards occupy `cards[..len]`; order is unspecified.
    cards: [Card; 52],
    len: usize,
}

impl Deck {
    /// Create a full 52-card deck.
    pub fn new() -> Self {
        let mut cards = [Card::from_id(0); 52];
        for (id, slot) in cards.iter_mut().enumerate() {
            *slot = Card::from_id(id as u8);
        }
        Self { cards, len: 52 }
    }

    /// Create a full deck with the given cards already removed.
    pub fn without(dead_cards: &[Card]) -> Self {
        let mut deck = Self::new();
        for &card in dead_cards {
            deck.remove(card);
        }
        deck
    }

    /// Remove a card by value. A card that is not in the deck is
    /// silently ignored, so removing known cards never fails even when
    /// inputs overlap.
    pub fn remove(&mut self, card: Card) {
        if let Some(pos) = self.cards[..self.len].iter().position(|&c| c == card) {
            self.len -= 1;
            self.cards.swap(pos, self.len);
        }
    }

    /// Draw one card uniformly at random, removing it from the deck.
    pub fn draw_one<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        if self.len == 0 {
            return None;
        }
        let pos = rng.gen_range(0..self.len);
        self.len -= 1;
        self.cards.swap(pos, self.len);
        Some(self.cards[self.len])
    }

    /// Draw `n` cards uniformly at random without replacement.
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>, DeckError> {
        if n > self.len {
            return Err(DeckError::InsufficientCards {
                requested: n,
                remaining: self.len,
            });
        }
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            // len was checked above, so the draw cannot come up empty.
            if let Some(card) = self.draw_one(rng) {
                drawn.push(card);
            }
        }
        Ok(drawn)
    }

    /// Number of cards left in the deck.
    pub fn remaining(&self) -> usize {
        self.len
    }

    /// Whether the deck still holds a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards[..self.len].iter().any(|&c| c == card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

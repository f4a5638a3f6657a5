//! Card, hole-card, and board types.
//!
//! Cards parse from and print to the standard two-character notation
//! (rank then suit, e.g. `As`, `Td`, `2c`). All parsing here is strict:
//! a malformed token is a typed error, never silently skipped.

use std::fmt;
use std::str::FromStr;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
/// Rank index for a three.
pub const RANK_3: u8 = 1;
/// Rank index for a four.
pub const RANK_4: u8 = 2;
/// Rank index for a five.
pub const RANK_5: u8 = 3;
/// Rank index for a six.
pub const RANK_6: u8 = 4;
/// Rank index for a seven.
pub const RANK_7: u8 = 5;
/// Rank index for an eight.
pub const RANK_8: u8 = 6;
/// Rank index for a nine.
pub const RANK_9: u8 = 7;
/// Rank index for a ten.
pub const RANK_T: u8 = 8;
/// Rank index for a jack.
pub const RANK_J: u8 = 9;
/// Rank index for a queen.
pub const RANK_Q: u8 = 10;
/// Rank index for a king.
pub const RANK_K: u8 = 11;
/// Rank index for an ace.
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
/// Suit index for diamonds.
pub const SUIT_DIAMONDS: u8 = 1;
/// Suit index for hearts.
pub const SUIT_HEARTS: u8 = 2;
/// Suit index for spades.
pub const SUIT_SPADES: u8 = 3;

/// Rank characters, in rank order.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters, in suit order.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Errors produced while parsing cards, hole cards, or boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The token is not a valid rank+suit pair.
    InvalidToken(String),
    /// The same card appeared more than once in one input.
    DuplicateCard(Card),
    /// More cards were supplied than the context allows.
    TooManyCards(usize),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::InvalidToken(token) => {
                write!(f, "'{}' is not a valid card token", token)
            }
            CardError::DuplicateCard(card) => {
                write!(f, "card {} appears more than once", card)
            }
            CardError::TooManyCards(count) => {
                write!(f, "{} cards supplied, at most 5 board cards allowed", count)
            }
        }
    }
}

impl std::error::Error for CardError {}

/// A single playing card.
///
/// Stored as a packed index 0-51 (`rank * 4 + suit`), so the type is
/// `Copy` and usable as a set member via its id bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    id: u8,
}

impl Card {
    /// Create a card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its packed id (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// The card's packed id (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// The card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// The card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Rank character for display (`'2'`-`'9'`, `'T'`, `'J'`, `'Q'`, `'K'`, `'A'`).
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Suit character for display (`'c'`, `'d'`, `'h'`, `'s'`).
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parse a token like `As`, `kh`, or `2C`. Rank and suit letters are
    /// case-insensitive; anything other than exactly two known characters
    /// is rejected.
    fn from_str(s: &str) -> Result<Self, CardError> {
        let mut chars = s.chars();
        let (rank_ch, suit_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => (r, u),
            _ => return Err(CardError::InvalidToken(s.to_string())),
        };

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == rank_ch.to_ascii_uppercase())
            .ok_or_else(|| CardError::InvalidToken(s.to_string()))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == suit_ch.to_ascii_lowercase())
            .ok_or_else(|| CardError::InvalidToken(s.to_string()))?;

        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Split a string of concatenated card tokens into cards.
///
/// Whitespace and commas are ignored, and `10` is accepted as an alias
/// for `T`. Duplicate cards are rejected.
pub fn parse_card_list(s: &str) -> Result<Vec<Card>, CardError> {
    let normalized: String = s
        .replace("10", "T")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(CardError::InvalidToken(normalized));
    }

    let mut cards = Vec::with_capacity(chars.len() / 2);
    let mut seen = 0u64;
    for pair in chars.chunks(2) {
        let token: String = pair.iter().collect();
        let card = token.parse::<Card>()?;
        if seen & (1u64 << card.id()) != 0 {
            return Err(CardError::DuplicateCard(card));
        }
        seen |= 1u64 << card.id();
        cards.push(card);
    }
    Ok(cards)
}

/// Split a one-line input like `"AsKs Kh4h5c"` into hero hole cards
/// (the first two tokens) and the board (the rest).
pub fn parse_hand_line(s: &str) -> Result<(HoleCards, Board), CardError> {
    let cards = parse_card_list(s)?;
    if cards.len() < 2 {
        return Err(CardError::InvalidToken(s.trim().to_string()));
    }
    let hero = HoleCards::new(cards[0], cards[1]);
    let board = Board::from_cards(cards[2..].to_vec())?;
    Ok((hero, board))
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Parse hole cards from a string like `"AhKs"` or `"Ah Ks"`.
    /// Rejects anything but exactly two distinct cards.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let cards = parse_card_list(s)?;
        match cards[..] {
            [c1, c2] => Ok(Self::new(c1, c2)),
            _ => Err(CardError::InvalidToken(s.trim().to_string())),
        }
    }

    /// Whether both cards share a suit.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Whether both cards share a rank.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Whether a card coincides with either hole card.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }

    /// The 169-class notation for this holding: `"AA"` for pairs,
    /// `"AKs"` suited, `"AKo"` offsuit. Higher rank letter first.
    pub fn class_string(&self) -> String {
        let hi = self.card1.rank_char();
        let lo = self.card2.rank_char();
        if self.is_pair() {
            format!("{}{}", hi, lo)
        } else if self.is_suited() {
            format!("{}{}s", hi, lo)
        } else {
            format!("{}{}o", hi, lo)
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Community cards on the board (0-5).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }

    /// Create a board from up to five distinct cards.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CardError> {
        if cards.len() > 5 {
            return Err(CardError::TooManyCards(cards.len()));
        }
        let mut seen = 0u64;
        for &card in &cards {
            if seen & (1u64 << card.id()) != 0 {
                return Err(CardError::DuplicateCard(card));
            }
            seen |= 1u64 << card.id();
        }
        Ok(Self { cards })
    }

    /// Parse a board from a string like `"AhKsQd"`. An empty string is
    /// an empty board; bad tokens, duplicates, and more than five cards
    /// are errors.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        Self::from_cards(parse_card_list(s)?)
    }

    /// Number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.iter().any(|&c| c == card)
    }

    /// The street implied by the card count, or `None` for a count that
    /// does not correspond to one (1 or 2 cards).
    pub fn street(&self) -> Option<Street> {
        match self.cards.len() {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Street in a poker hand, detected from the board card count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    /// No community cards yet.
    Preflop,
    /// Three community cards.
    Flop,
    /// Four community cards.
    Turn,
    /// All five community cards.
    River,
}

impl Street {
    /// Number of board cards on this street.
    pub fn num_board_cards(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(RANK_A, SUIT_SPADES);
        assert_eq!(ace_spades.rank(), RANK_A);
        assert_eq!(ace_spades.suit(), SUIT_SPADES);
        assert_eq!(ace_spades.to_string(), "As");

        let two_clubs = Card::new(RANK_2, SUIT_CLUBS);
        assert_eq!(two_clubs.to_string(), "2c");
    }

    #[test]
    fn test_card_parse_round_trip() {
        for rank in RANK_CHARS {
            for suit in SUIT_CHARS {
                let token = format!("{}{}", rank, suit);
                let card: Card = token.parse().unwrap();
                assert_eq!(card.to_string(), token);
            }
        }
    }

    #[test]
    fn test_card_parse_case_insensitive_rank() {
        assert_eq!("as".parse::<Card>().unwrap().to_string(), "As");
        assert_eq!("tD".parse::<Card>().unwrap().to_string(), "Td");
        assert_eq!("KH".parse::<Card>().unwrap().to_string(), "Kh");
    }

    #[test]
    fn test_card_parse_rejects_garbage() {
        for bad in ["", "A", "Asd", "Xs", "Ax", "1s", "  "] {
            assert!(
                matches!(bad.parse::<Card>(), Err(CardError::InvalidToken(_))),
                "expected InvalidToken for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_card_list() {
        let cards = parse_card_list("As Kd, 10h").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].to_string(), "Th");

        assert!(matches!(
            parse_card_list("AsAs"),
            Err(CardError::DuplicateCard(_))
        ));
        assert!(matches!(
            parse_card_list("AsK"),
            Err(CardError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_parse_hand_line() {
        let (hero, board) = parse_hand_line("askskh4h5c").unwrap();
        assert_eq!(hero.to_string(), "AsKs");
        assert_eq!(board.to_string(), "Kh4h5c");
        assert_eq!(board.street(), Some(Street::Flop));

        let (hero, board) = parse_hand_line("AhAd").unwrap();
        assert_eq!(hero.to_string(), "AhAd");
        assert!(board.is_empty());

        assert!(parse_hand_line("As").is_err());
    }

    #[test]
    fn test_hole_cards() {
        let hc = HoleCards::parse("KsAh").unwrap();
        assert_eq!(hc.card1.rank(), RANK_A);
        assert_eq!(hc.card2.rank(), RANK_K);
        assert!(!hc.is_suited());
        assert!(!hc.is_pair());

        assert!(HoleCards::parse("AsKs").unwrap().is_suited());
        assert!(HoleCards::parse("AhAs").unwrap().is_pair());

        assert!(matches!(
            HoleCards::parse("AhAh"),
            Err(CardError::DuplicateCard(_))
        ));
        assert!(HoleCards::parse("AhKsQd").is_err());
    }

    #[test]
    fn test_class_string() {
        assert_eq!(HoleCards::parse("AhAs").unwrap().class_string(), "AA");
        assert_eq!(HoleCards::parse("AsKs").unwrap().class_string(), "AKs");
        assert_eq!(HoleCards::parse("KhAs").unwrap().class_string(), "AKo");
        assert_eq!(HoleCards::parse("2c7d").unwrap().class_string(), "72o");
    }

    #[test]
    fn test_board_parsing() {
        let board = Board::parse("AhKsQd").unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.street(), Some(Street::Flop));

        assert!(Board::parse("").unwrap().is_empty());
        assert_eq!(Board::parse("AhKsQdJc").unwrap().street(), Some(Street::Turn));
        assert_eq!(
            Board::parse("AhKsQdJcTc").unwrap().street(),
            Some(Street::River)
        );
        assert_eq!(Board::parse("AhKs").unwrap().street(), None);

        assert!(matches!(
            Board::parse("AhKsQdJcTc9c"),
            Err(CardError::TooManyCards(6))
        ));
        assert!(matches!(
            Board::parse("AhAh"),
            Err(CardError::DuplicateCard(_))
        ));
        assert!(matches!(
            Board::parse("AhXx"),
            Err(CardError::InvalidToken(_))
        ));
    }
}

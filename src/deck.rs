//! Playing-card types and deck bookkeeping for the draw simulator.
//!
//! Draws are uniformly random with replacement against a
//! remaining-card counter rather than dealing from a shuffled deck,
//! matching the draw panel in the designer front-end.

use std::fmt;

use rand::Rng;

/// Cards per single deck.
pub const DECK_SIZE: usize = 52;

/// Card suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card ranks. Face cards trigger an automatic encounter instead of a
/// shape placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardValue {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl CardValue {
    pub const ALL: [CardValue; 13] = [
        CardValue::Two,
        CardValue::Three,
        CardValue::Four,
        CardValue::Five,
        CardValue::Six,
        CardValue::Seven,
        CardValue::Eight,
        CardValue::Nine,
        CardValue::Ten,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
        CardValue::Ace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardValue::Two => "2",
            CardValue::Three => "3",
            CardValue::Four => "4",
            CardValue::Five => "5",
            CardValue::Six => "6",
            CardValue::Seven => "7",
            CardValue::Eight => "8",
            CardValue::Nine => "9",
            CardValue::Ten => "10",
            CardValue::Jack => "J",
            CardValue::Queen => "Q",
            CardValue::King => "K",
            CardValue::Ace => "A",
        }
    }

    /// Parses the rank strings used in board files ("2".."10", "J",
    /// "Q", "K", "A").
    pub fn parse(s: &str) -> Option<CardValue> {
        CardValue::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// J, Q, K resolve to an automatic encounter and are never placed.
    pub fn is_face(self) -> bool {
        matches!(self, CardValue::Jack | CardValue::Queen | CardValue::King)
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub value: CardValue,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

/// Draw state for 1-3 combined 52-card decks.
#[derive(Clone, Debug)]
pub struct Deck {
    remaining: usize,
}

impl Deck {
    /// A deck pool of `deck_count` combined decks (clamped to 1..=3,
    /// matching the designer's selector).
    pub fn new(deck_count: usize) -> Deck {
        Deck {
            remaining: DECK_SIZE * deck_count.clamp(1, 3),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Draws a uniformly random card, or None once the pool is spent.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<Card> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(Card {
            value: CardValue::ALL[rng.gen_range(0..CardValue::ALL.len())],
            suit: Suit::ALL[rng.gen_range(0..Suit::ALL.len())],
        })
    }
}

use std::fmt;
use std::str::FromStr;

/// The three cards of the deck, ordered by strength: Queen < King < Ace.
///
/// ```
/// use akq_rs::cards::Card;
///
/// assert!(Card::Ace > Card::King);
/// assert_eq!(Card::Queen.value(), 1);
/// assert_eq!(Card::King.to_string(), "K");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Card {
    Queen = 1,
    King = 2,
    Ace = 3,
}

impl Card {
    /// Deck order; strongest first.
    pub const ALL: [Card; 3] = [Card::Ace, Card::King, Card::Queen];

    /// Showdown value: Ace=3, King=2, Queen=1.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Card::Ace => 'A',
            Card::King => 'K',
            Card::Queen => 'Q',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Card::Ace => "Ace",
            Card::King => "King",
            Card::Queen => "Queen",
        }
    }

    /// Index into per-card tables, strongest first (matches [`Card::ALL`]).
    pub(crate) const fn index(self) -> usize {
        match self {
            Card::Ace => 0,
            Card::King => 1,
            Card::Queen => 2,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Card::try_from(c).map_err(|_| CardParseError::Invalid(s.to_string()));
        }
        match t.to_ascii_lowercase().as_str() {
            "ace" => Ok(Card::Ace),
            "king" => Ok(Card::King),
            "queen" => Ok(Card::Queen),
            _ => Err(CardParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Card {
    type Error = CardParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Card::Ace),
            'K' => Ok(Card::King),
            'Q' => Ok(Card::Queen),
            _ => Err(CardParseError::Invalid(c.to_string())),
        }
    }
}

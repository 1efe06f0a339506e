use crate::cards::Card;
use crate::rng::RandomSource;

/// The three-card deck: one Ace, one King, one Queen.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use akq_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 3);
    /// ```
    pub fn standard() -> Self {
        Self { cards: Card::ALL.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using an injected random source.
    pub fn shuffle_with(&mut self, rng: &mut dyn RandomSource) {
        rng.shuffle(&mut self.cards);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}

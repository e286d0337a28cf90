//! Card types, blackjack values, and counting increments.

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

/// All four suits, in shoe-assembly order.
pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

/// Card-counting system determining the per-rank count increment.
///
/// The increment is fixed per rank for a given system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum CountingSystem {
    /// Hi-Lo: 2-6 are +1, 7-9 are 0, tens and aces are -1. Balanced.
    #[default]
    HiLo,
    /// Knock-Out: 2-7 are +1, 8-9 are 0, tens and aces are -1. Unbalanced.
    Ko,
}

/// A playing card.
///
/// The blackjack value and count increment are derived from the rank rather
/// than stored, so a `Card` stays two bytes and trivially `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but may yield non-standard results when evaluating a hand.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    /// Blackjack value of this card. Aces are 11 here; hand evaluation
    /// demotes them to 1 as needed.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self.rank {
            1 => 11,
            2..=10 => self.rank,
            11..=13 => 10,
            _ => 0,
        }
    }

    /// Count increment of this card under the given counting system.
    #[must_use]
    pub const fn count_tag(&self, system: CountingSystem) -> i32 {
        match system {
            CountingSystem::HiLo => match self.rank {
                2..=6 => 1,
                7..=9 => 0,
                _ => -1,
            },
            CountingSystem::Ko => match self.rank {
                2..=7 => 1,
                8 | 9 => 0,
                _ => -1,
            },
        }
    }

    /// Returns whether this card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == 1
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hi_lo_tags_balance_over_a_deck() {
        let mut sum = 0;
        for suit in SUITS {
            for rank in 1..=13 {
                sum += Card::new(suit, rank).count_tag(CountingSystem::HiLo);
            }
        }
        assert_eq!(sum, 0);
    }

    #[test]
    fn ko_is_unbalanced() {
        let mut sum = 0;
        for suit in SUITS {
            for rank in 1..=13 {
                sum += Card::new(suit, rank).count_tag(CountingSystem::Ko);
            }
        }
        assert_eq!(sum, 4);
    }

    #[test]
    fn face_cards_are_worth_ten() {
        for rank in 11..=13 {
            assert_eq!(Card::new(Suit::Clubs, rank).value(), 10);
        }
        assert_eq!(Card::new(Suit::Clubs, 1).value(), 11);
    }
}

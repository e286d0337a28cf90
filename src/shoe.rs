//! Multi-deck shoe with count bookkeeping.

extern crate alloc;

use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, CountingSystem, DECK_SIZE, SUITS};

/// The working set of shuffled cards for a multi-deck session.
///
/// Cards are drawn sequentially; `cards_dealt` and `running_count` are
/// tracked per draw and reset only by building a fresh shoe.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    system: CountingSystem,
    cards_dealt: usize,
    running_count: i32,
}

impl Shoe {
    /// Builds and shuffles a shoe of `decks` decks.
    ///
    /// Every permutation is equally likely (`SliceRandom::shuffle` is a
    /// Fisher-Yates shuffle).
    #[must_use]
    pub fn build(decks: u8, system: CountingSystem, rng: &mut ChaCha8Rng) -> Self {
        let mut cards = Vec::with_capacity(usize::from(decks) * DECK_SIZE);

        for _ in 0..decks {
            for suit in SUITS {
                for rank in 1..=13 {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);

        Self {
            cards,
            system,
            cards_dealt: 0,
            running_count: 0,
        }
    }

    /// Draws the next undealt card, updating `cards_dealt` and the running
    /// count.
    ///
    /// Drawing past the end of the shoe is a programming error: the engine
    /// reshuffles at the cut card long before exhaustion. Debug builds
    /// assert; release builds return `None`.
    pub fn draw(&mut self) -> Option<Card> {
        debug_assert!(
            self.cards_dealt < self.cards.len(),
            "drew past the end of the shoe"
        );

        let card = self.cards.get(self.cards_dealt).copied()?;
        self.cards_dealt += 1;
        self.running_count += card.count_tag(self.system);
        Some(card)
    }

    /// Number of cards drawn since the shoe was built.
    #[must_use]
    pub const fn cards_dealt(&self) -> usize {
        self.cards_dealt
    }

    /// Number of cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len() - self.cards_dealt
    }

    /// Total number of cards the shoe was built with.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Cumulative sum of count increments since the shoe was built.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Running count normalized by decks remaining.
    ///
    /// Decks remaining is floored at 1.0 to keep the division sane near
    /// shoe exhaustion.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "card counts are far below f64 precision limits"
        )]
        let decks_remaining = (self.cards_remaining() as f64 / DECK_SIZE as f64).max(1.0);
        f64::from(self.running_count) / decks_remaining
    }

    /// Returns whether the cut card has been reached.
    #[must_use]
    pub fn cut_card_reached(&self, penetration: f64) -> bool {
        self.cards_dealt >= self.total_cards() - cut_card_position(self.total_cards(), penetration)
    }

    /// Replaces the shoe contents directly. Intended for tests that need a
    /// rigged draw order; resets the dealt and count bookkeeping.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.cards_dealt = 0;
        self.running_count = 0;
    }
}

/// Number of cards left behind the cut card for the given penetration
/// fraction (e.g. 0.75 plays three quarters of the shoe).
#[must_use]
pub fn cut_card_position(total_cards: usize, penetration: f64) -> usize {
    #[expect(
        clippy::cast_precision_loss,
        reason = "card counts are far below f64 precision limits"
    )]
    let dealt_before_shuffle = (total_cards as f64 * penetration) as usize;
    total_cards - dealt_before_shuffle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn build_yields_full_decks() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let shoe = Shoe::build(6, CountingSystem::HiLo, &mut rng);
        assert_eq!(shoe.total_cards(), 6 * DECK_SIZE);
        assert_eq!(shoe.cards_remaining(), 6 * DECK_SIZE);
    }

    #[test]
    fn draw_updates_bookkeeping() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut shoe = Shoe::build(1, CountingSystem::HiLo, &mut rng);

        let card = shoe.draw().unwrap();
        assert_eq!(shoe.cards_dealt(), 1);
        assert_eq!(shoe.running_count(), card.count_tag(CountingSystem::HiLo));
    }

    #[test]
    fn true_count_clamps_decks_remaining() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut shoe = Shoe::build(1, CountingSystem::HiLo, &mut rng);

        // Deal down to a handful of cards; the divisor stays at 1.0.
        for _ in 0..48 {
            shoe.draw().unwrap();
        }
        let rc = f64::from(shoe.running_count());
        assert!((shoe.true_count() - rc).abs() < f64::EPSILON);
    }

    #[test]
    fn cut_card_position_from_penetration() {
        // 1 deck at 75% penetration leaves 13 cards behind the cut card.
        assert_eq!(cut_card_position(52, 0.75), 13);
    }
}

//! Table configuration.

use crate::card::CountingSystem;

/// Rule and session configuration for a table.
///
/// Immutable once the table is constructed; a new shoe inherits the same
/// options.
///
/// # Examples
///
/// ```
/// use backcount::{CountingSystem, TableOptions};
///
/// let options = TableOptions::default()
///     .with_decks(2)
///     .with_penetration(0.5)
///     .with_counting_system(CountingSystem::Ko);
/// assert_eq!(options.decks, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOptions {
    /// Number of 52-card decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe dealt before the cut card forces a reshuffle.
    pub penetration: f64,
    /// Whether the dealer hits on soft 17.
    pub dealer_hits_soft_17: bool,
    /// Blackjack payout as a (numerator, denominator) ratio.
    pub blackjack_pays: (u32, u32),
    /// Counting system used for the running count.
    pub counting_system: CountingSystem,
    /// Chips each player starts with.
    pub starting_chips: u32,
}

impl TableOptions {
    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the shoe penetration fraction.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets whether the dealer hits on soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the blackjack payout ratio, e.g. `(3, 2)` or `(6, 5)`.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, pays: (u32, u32)) -> Self {
        self.blackjack_pays = pays;
        self
    }

    /// Sets the counting system.
    #[must_use]
    pub const fn with_counting_system(mut self, system: CountingSystem) -> Self {
        self.counting_system = system;
        self
    }

    /// Sets the starting chip stack.
    #[must_use]
    pub const fn with_starting_chips(mut self, chips: u32) -> Self {
        self.starting_chips = chips;
        self
    }
}

impl Default for TableOptions {
    /// Six decks, 75% penetration, dealer hits soft 17, blackjack pays 3:2,
    /// Hi-Lo counting, 1000 starting chips.
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.75,
            dealer_hits_soft_17: true,
            blackjack_pays: (3, 2),
            counting_system: CountingSystem::HiLo,
            starting_chips: 1000,
        }
    }
}

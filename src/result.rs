//! Settled hand outcomes and payout math.

/// How a single hand settled against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandOutcome {
    /// Natural blackjack, paid at the table's blackjack ratio.
    Blackjack,
    /// Beat the dealer, paid even money.
    Win,
    /// Tied the dealer, bet returned.
    Push,
    /// Lost to the dealer.
    Lose,
    /// Busted over 21 before the dealer acted.
    Bust,
}

impl HandOutcome {
    /// Total chips credited back for this outcome: the returned bet plus
    /// winnings. `blackjack_pays` is a (numerator, denominator) ratio,
    /// e.g. `(3, 2)` for 3:2 tables or `(6, 5)` for 6:5.
    #[must_use]
    pub const fn payout(self, bet: u32, blackjack_pays: (u32, u32)) -> u32 {
        match self {
            Self::Blackjack => bet + bet * blackjack_pays.0 / blackjack_pays.1,
            Self::Win => bet * 2,
            Self::Push => bet,
            Self::Lose | Self::Bust => 0,
        }
    }

    /// Whether this outcome pays anything back.
    #[must_use]
    pub const fn pays(self) -> bool {
        !matches!(self, Self::Lose | Self::Bust)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackjack_pays_three_to_two() {
        assert_eq!(HandOutcome::Blackjack.payout(50, (3, 2)), 125);
    }

    #[test]
    fn blackjack_pays_six_to_five() {
        assert_eq!(HandOutcome::Blackjack.payout(50, (6, 5)), 110);
    }

    #[test]
    fn even_money_and_push() {
        assert_eq!(HandOutcome::Win.payout(50, (3, 2)), 100);
        assert_eq!(HandOutcome::Push.payout(50, (3, 2)), 50);
        assert_eq!(HandOutcome::Lose.payout(50, (3, 2)), 0);
        assert_eq!(HandOutcome::Bust.payout(50, (3, 2)), 0);
    }
}

//! Dealer hit/stand policy and the settlement callout.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::card::Card;
use crate::hand::evaluate_cards;

/// What the dealer does next with the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerAction {
    /// Draw another card.
    Hit,
    /// Stop drawing.
    Stand,
}

/// House drawing policy over a dealer hand.
///
/// Below 17 the dealer always hits; at 18 or more the dealer always stands.
/// At exactly 17 the dealer hits only when `hits_soft_17` is set and the
/// hand passes the soft test. The soft test is approximate: "holds an ace
/// and the undemoted total (every ace as 11) is at most 21". It misreads
/// multi-ace hands (ace-ace-five is a genuine soft 17 but reads as hard),
/// and that behavior is deliberately kept.
#[must_use]
pub fn dealer_decision(cards: &[Card], hits_soft_17: bool) -> DealerAction {
    let (value, _) = evaluate_cards(cards);

    if value < 17 {
        return DealerAction::Hit;
    }
    if value > 17 {
        return DealerAction::Stand;
    }

    let undemoted: u32 = cards.iter().map(|card| u32::from(card.value())).sum();
    let approx_soft = cards.iter().any(Card::is_ace) && undemoted <= 21;
    if hits_soft_17 && approx_soft {
        DealerAction::Hit
    } else {
        DealerAction::Stand
    }
}

/// The dealer's spoken settlement line.
///
/// A bust pays every standing hand; a dealer 21 beats everything short of a
/// natural; otherwise hands strictly above the dealer's total are paid.
#[must_use]
pub fn payout_callout(dealer_value: u8, dealer_busted: bool) -> String {
    if dealer_busted {
        String::from("Paying all hands")
    } else if dealer_value == 21 {
        String::from("Dealer wins")
    } else {
        format!("Paying {}", dealer_value + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(ranks: &[u8]) -> alloc::vec::Vec<Card> {
        ranks
            .iter()
            .map(|&rank| Card::new(Suit::Clubs, rank))
            .collect()
    }

    #[test]
    fn hits_below_seventeen() {
        assert_eq!(dealer_decision(&cards(&[10, 6]), true), DealerAction::Hit);
        assert_eq!(dealer_decision(&cards(&[2, 3, 4]), false), DealerAction::Hit);
    }

    #[test]
    fn stands_at_eighteen_and_above() {
        assert_eq!(dealer_decision(&cards(&[10, 8]), true), DealerAction::Stand);
        assert_eq!(dealer_decision(&cards(&[1, 10]), true), DealerAction::Stand);
    }

    #[test]
    fn soft_seventeen_follows_the_house_rule() {
        assert_eq!(dealer_decision(&cards(&[1, 6]), true), DealerAction::Hit);
        assert_eq!(dealer_decision(&cards(&[1, 6]), false), DealerAction::Stand);
        assert_eq!(dealer_decision(&cards(&[1, 2, 4]), true), DealerAction::Hit);
    }

    #[test]
    fn hard_seventeen_with_a_demoted_ace_stands() {
        // Ace-six-ten totals 27 undemoted, so the soft test calls it hard.
        assert_eq!(dealer_decision(&cards(&[1, 6, 10]), true), DealerAction::Stand);
    }

    #[test]
    fn multi_ace_soft_seventeen_reads_as_hard() {
        // Ace-ace-five is a genuine soft 17, but the undemoted total is 27.
        assert_eq!(dealer_decision(&cards(&[1, 1, 5]), true), DealerAction::Stand);
    }

    #[test]
    fn callout_lines() {
        assert_eq!(payout_callout(22, true), "Paying all hands");
        assert_eq!(payout_callout(21, false), "Dealer wins");
        assert_eq!(payout_callout(19, false), "Paying 20");
    }
}

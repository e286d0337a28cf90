//! Hands: the player's (with a bet riding on it) and the dealer's (with a
//! hole card).

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::result::HandOutcome;

/// Total and softness of a set of cards. Aces start at 1; a single ace is
/// promoted to 11 when the total allows (two promoted aces can never fit
/// under 21).
pub(crate) fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut total: u8 = 0;
    let mut has_ace = false;

    for card in cards {
        if card.is_ace() {
            has_ace = true;
            total = total.saturating_add(1);
        } else {
            total = total.saturating_add(card.value());
        }
    }

    if has_ace && total <= 11 {
        (total + 10, true)
    } else {
        (total, false)
    }
}

/// Where a hand stands within the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Still playable.
    Active,
    /// The holder stood.
    Stand,
    /// Went over 21.
    Bust,
    /// A natural: 21 on the opening two cards.
    Blackjack,
}

/// A seat's cards, the bet riding on them, and the settled result.
///
/// Owned by its seat for one round; `reset` or replacement starts the next.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    bet: u32,
    from_split: bool,
    result: Option<HandOutcome>,
}

impl Hand {
    /// An empty hand with `bet` riding on it.
    #[must_use]
    pub const fn new(bet: u32) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            from_split: false,
            result: None,
        }
    }

    /// One half of a split pair: a single card, flagged so a later 21 does
    /// not count as a natural.
    #[must_use]
    pub fn from_split(card: Card, bet: u32) -> Self {
        Self {
            cards: alloc::vec![card],
            status: HandStatus::Active,
            bet,
            from_split: true,
            result: None,
        }
    }

    /// Adds a card, updating the status on a bust or a natural.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        let (value, _) = evaluate_cards(&self.cards);

        if value > 21 {
            self.status = HandStatus::Bust;
            return;
        }
        // A two-card 21 is a natural, except on a hand built from a split.
        if value == 21 && self.cards.len() == 2 && !self.from_split {
            self.status = HandStatus::Blackjack;
        }
    }

    /// Cards dealt to this hand so far.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Forces the status (stand, bust on a forced settlement, and so on).
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// The bet riding on this hand.
    #[must_use]
    pub const fn bet(&self) -> u32 {
        self.bet
    }

    /// Doubles the riding bet (the chips were already debited).
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
    }

    /// The settled outcome, once resolution has run.
    #[must_use]
    pub const fn result(&self) -> Option<HandOutcome> {
        self.result
    }

    /// Records the settled outcome.
    pub const fn set_result(&mut self, outcome: HandOutcome) {
        self.result = Some(outcome);
    }

    /// Best total, with aces demoted as needed.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Whether an ace is currently counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Whether this hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.status == HandStatus::Blackjack
    }

    /// A splittable pair: exactly two cards of the same rank.
    #[must_use]
    pub fn can_split(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.rank == b.rank)
    }

    /// Number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card of a pair being split.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Empties the hand and puts a fresh bet on it for the next deal.
    pub fn reset(&mut self, bet: u32) {
        self.cards.clear();
        self.status = HandStatus::Active;
        self.bet = bet;
        self.from_split = false;
        self.result = None;
    }
}

/// The dealer's hand. The second card stays face down until the dealer's
/// turn (or an insurance resolution) reveals it.
#[derive(Debug, Clone, Default)]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// An empty dealer hand with the hole card face down.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// All cards, including a still-hidden hole card.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The face-up card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Whether the hole card has been turned over.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Turns the hole card over.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// The value a player at the table can see: the full total once the
    /// hole card is up, otherwise just the up-card.
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.value()
        } else {
            self.up_card().map_or(0, Card::value)
        }
    }

    /// Full total, hidden cards included.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// A dealer natural: two cards totalling 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Whether the dealer went over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Whether an ace is currently counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Number of cards dealt to the dealer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the dealer has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Empties the hand and hides the hole slot again for the next round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    #[test]
    fn aces_demote_to_avoid_busting() {
        let mut hand = Hand::new(10);
        hand.add_card(Card::new(Suit::Hearts, 1));
        hand.add_card(Card::new(Suit::Spades, 6));
        assert_eq!(hand.value(), 17);
        assert!(hand.is_soft());

        hand.add_card(Card::new(Suit::Clubs, 13));
        assert_eq!(hand.value(), 17);
        assert!(!hand.is_soft());
        assert_eq!(hand.status(), HandStatus::Active);
    }

    #[test]
    fn many_aces_still_evaluate() {
        let mut hand = Hand::new(10);
        for _ in 0..4 {
            hand.add_card(Card::new(Suit::Hearts, 1));
        }
        // A,A,A,A = 14 (one ace as 11).
        assert_eq!(hand.value(), 14);
        assert!(hand.is_soft());
    }

    #[test]
    fn split_hand_twenty_one_is_not_blackjack() {
        let mut hand = Hand::from_split(Card::new(Suit::Hearts, 1), 10);
        hand.add_card(Card::new(Suit::Clubs, 13));
        assert_eq!(hand.value(), 21);
        assert_eq!(hand.status(), HandStatus::Active);
    }

    #[test]
    fn dealer_hole_card_hidden_until_revealed() {
        let mut dealer = DealerHand::new();
        dealer.add_card(Card::new(Suit::Hearts, 1));
        dealer.add_card(Card::new(Suit::Clubs, 6));

        assert_eq!(dealer.visible_value(), 11);
        dealer.reveal_hole();
        assert_eq!(dealer.visible_value(), 17);
        assert!(dealer.is_soft());
    }
}

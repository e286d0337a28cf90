//! Player intents, applied synchronously between timer firings.

use crate::error::{ActionError, BetError, InsuranceError, SeatError};
use crate::hand::{Hand, HandStatus};

use super::{human_mut, human_seat, HumanPlayer, RoundPhase, Seat, Table, MAX_SEATS};

impl Table {
    /// Sits the human player down at `seat`. Allowed any time; the seat
    /// only becomes active at the next deal.
    ///
    /// # Errors
    ///
    /// Returns an error if the seat index is out of range, the seat is
    /// taken, or the player is already seated.
    pub fn sit(&self, seat: usize) -> Result<(), SeatError> {
        if seat >= MAX_SEATS {
            return Err(SeatError::OutOfRange);
        }
        let mut seats = self.seats.lock();
        if human_seat(&seats).is_some() {
            return Err(SeatError::AlreadySeated);
        }
        if !matches!(seats[seat], Seat::Empty) {
            return Err(SeatError::SeatTaken);
        }
        seats[seat] = Seat::Human(HumanPlayer::new(self.options.starting_chips));
        Ok(())
    }

    /// Leaves the table between rounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not seated or a round is in
    /// progress.
    pub fn leave_seat(&self) -> Result<(), SeatError> {
        let phase = *self.phase.lock();
        if !matches!(phase, RoundPhase::Betting | RoundPhase::RoundEnd) {
            return Err(SeatError::MidRound);
        }
        let mut seats = self.seats.lock();
        let seat = human_seat(&seats).ok_or(SeatError::NotSeated)?;
        seats[seat] = Seat::Empty;
        Ok(())
    }

    /// Sets the pending bet for the next deal. Can be adjusted freely
    /// until confirmed or dealt.
    ///
    /// # Errors
    ///
    /// Returns an error outside the betting phase, when unseated, on a
    /// zero amount, on an amount above the chip stack, or after the bet
    /// was already confirmed.
    pub fn place_bet(&self, amount: u32) -> Result<(), BetError> {
        if *self.phase.lock() != RoundPhase::Betting {
            return Err(BetError::WrongPhase);
        }
        let mut seats = self.seats.lock();
        let human = human_mut(&mut seats).ok_or(BetError::NotSeated)?;
        if human.confirmed {
            return Err(BetError::AlreadyConfirmed);
        }
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if amount > human.chips {
            return Err(BetError::InsufficientChips);
        }
        human.bet = amount;
        Ok(())
    }

    /// Confirms the pending bet and starts the deal immediately, without
    /// waiting out the betting grace period. The pending betting timer
    /// becomes a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error outside the betting phase, when unseated, with no
    /// pending bet, or when already confirmed.
    pub fn confirm_bet(&self, now: u64) -> Result<(), BetError> {
        {
            if *self.phase.lock() != RoundPhase::Betting {
                return Err(BetError::WrongPhase);
            }
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(BetError::NotSeated)?;
            if human.confirmed {
                return Err(BetError::AlreadyConfirmed);
            }
            if human.bet == 0 {
                return Err(BetError::ZeroBet);
            }
            if human.bet > human.chips {
                return Err(BetError::InsufficientChips);
            }
            human.confirmed = true;
        }
        self.start_dealing(now);
        Ok(())
    }

    /// Draws a card for the active hand.
    ///
    /// # Errors
    ///
    /// Returns an error when it is not the player's turn or the active
    /// hand cannot act.
    pub fn hit(&self, now: u64) -> Result<(), ActionError> {
        self.human_turn_guard()?;
        {
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(ActionError::NotYourTurn)?;
            let index = human.active_hand;
            let hand = human
                .hands
                .get_mut(index)
                .ok_or(ActionError::HandNotActive)?;
            if hand.status() != HandStatus::Active {
                return Err(ActionError::HandNotActive);
            }
            if let Some(card) = self.shoe.lock().draw() {
                hand.add_card(card);
            }
            human.settle_active_hand();
        }
        self.after_human_action(now);
        Ok(())
    }

    /// Stands the active hand.
    ///
    /// # Errors
    ///
    /// Returns an error when it is not the player's turn or the active
    /// hand cannot act.
    pub fn stand(&self, now: u64) -> Result<(), ActionError> {
        self.human_turn_guard()?;
        {
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(ActionError::NotYourTurn)?;
            let index = human.active_hand;
            let hand = human
                .hands
                .get_mut(index)
                .ok_or(ActionError::HandNotActive)?;
            if hand.status() != HandStatus::Active {
                return Err(ActionError::HandNotActive);
            }
            hand.set_status(HandStatus::Stand);
            human.settle_active_hand();
        }
        self.after_human_action(now);
        Ok(())
    }

    /// Doubles the bet on the active two-card hand, draws exactly one
    /// card, and ends the hand.
    ///
    /// # Errors
    ///
    /// Returns an error when it is not the player's turn, the hand has
    /// already drawn, or the chips cannot cover the doubled bet.
    pub fn double_down(&self, now: u64) -> Result<(), ActionError> {
        self.human_turn_guard()?;
        {
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(ActionError::NotYourTurn)?;
            let index = human.active_hand;
            let bet = {
                let hand = human.hands.get(index).ok_or(ActionError::HandNotActive)?;
                if hand.status() != HandStatus::Active {
                    return Err(ActionError::HandNotActive);
                }
                if hand.len() != 2 {
                    return Err(ActionError::NotFirstTwoCards);
                }
                hand.bet()
            };
            if bet > human.chips {
                return Err(ActionError::InsufficientChips);
            }
            human.chips -= bet;
            let hand = human
                .hands
                .get_mut(index)
                .ok_or(ActionError::HandNotActive)?;
            hand.double_bet();
            if let Some(card) = self.shoe.lock().draw() {
                hand.add_card(card);
            }
            if hand.status() == HandStatus::Active {
                hand.set_status(HandStatus::Stand);
            }
            human.settle_active_hand();
        }
        self.after_human_action(now);
        Ok(())
    }

    /// Splits a matching pair into two hands, each dealt a second card.
    /// One split per round; a 21 on a split hand is not a natural.
    ///
    /// # Errors
    ///
    /// Returns an error when it is not the player's turn, the hand is not
    /// a splittable pair, a split was already used, or the chips cannot
    /// cover the second bet.
    pub fn split(&self, now: u64) -> Result<(), ActionError> {
        self.human_turn_guard()?;
        {
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(ActionError::NotYourTurn)?;
            if human.split_used {
                return Err(ActionError::AlreadySplit);
            }
            let bet = {
                let hand = human.hands.first().ok_or(ActionError::HandNotActive)?;
                if hand.status() != HandStatus::Active {
                    return Err(ActionError::HandNotActive);
                }
                if !hand.can_split() {
                    return Err(ActionError::NotAPair);
                }
                hand.bet()
            };
            if bet > human.chips {
                return Err(ActionError::InsufficientChips);
            }
            human.chips -= bet;

            let hand = human.hands.first_mut().ok_or(ActionError::HandNotActive)?;
            let second = hand.take_split_card().ok_or(ActionError::NotAPair)?;
            let first = hand.cards().first().copied().ok_or(ActionError::NotAPair)?;
            human.hands[0] = Hand::from_split(first, bet);
            human.hands.push(Hand::from_split(second, bet));
            human.split_used = true;

            let mut shoe = self.shoe.lock();
            for hand in &mut human.hands {
                if let Some(card) = shoe.draw() {
                    hand.add_card(card);
                }
            }
            human.active_hand = 0;
            human.settle_active_hand();
        }
        self.after_human_action(now);
        Ok(())
    }

    /// Takes insurance for half the hand bet.
    ///
    /// # Errors
    ///
    /// Returns an error outside the insurance window, after a decision was
    /// already made, or when the chips cannot cover the wager.
    pub fn take_insurance(&self, now: u64) -> Result<(), InsuranceError> {
        {
            if *self.phase.lock() != RoundPhase::Insurance {
                return Err(InsuranceError::NotOffered);
            }
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(InsuranceError::NotOffered)?;
            if human.insurance_decided {
                return Err(InsuranceError::AlreadyDecided);
            }
            let bet = human.hands.first().map_or(0, Hand::bet);
            if bet == 0 {
                return Err(InsuranceError::NotOffered);
            }
            let wager = bet / 2;
            if wager > human.chips {
                return Err(InsuranceError::InsufficientChips);
            }
            human.chips -= wager;
            human.insurance_bet = wager;
            human.insurance_decided = true;
        }
        self.finish_insurance(now);
        Ok(())
    }

    /// Declines insurance, closing the window early.
    ///
    /// # Errors
    ///
    /// Returns an error outside the insurance window or after a decision
    /// was already made.
    pub fn decline_insurance(&self, now: u64) -> Result<(), InsuranceError> {
        {
            if *self.phase.lock() != RoundPhase::Insurance {
                return Err(InsuranceError::NotOffered);
            }
            let mut seats = self.seats.lock();
            let human = human_mut(&mut seats).ok_or(InsuranceError::NotOffered)?;
            if human.insurance_decided {
                return Err(InsuranceError::AlreadyDecided);
            }
            human.insurance_decided = true;
        }
        self.finish_insurance(now);
        Ok(())
    }

    fn human_turn_guard(&self) -> Result<(), ActionError> {
        if *self.phase.lock() != RoundPhase::PlayerTurn {
            return Err(ActionError::WrongPhase);
        }
        let seats = self.seats.lock();
        let seat = human_seat(&seats).ok_or(ActionError::NotYourTurn)?;
        if *self.turn.lock() != Some(seat) {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }
}

//! Betting timeout, the opening deal, and the insurance window.

use core::sync::atomic::Ordering;

use crate::dealer::payout_callout;
use crate::events::TableEvent;
use crate::hand::Hand;

use super::sched::Task;
use super::{RoundPhase, Seat, Table, AI_BET, INSURANCE_WINDOW_MS};

impl Table {
    /// Opens betting for the next hand and arms the betting timer.
    pub(crate) fn start_betting(&self, now: u64) {
        self.counters.lock().hand_number += 1;
        {
            let mut seats = self.seats.lock();
            if let Some(human) = super::human_mut(&mut seats) {
                human.confirmed = false;
            }
        }
        self.set_phase(RoundPhase::Betting);
        self.schedule(now + self.betting_delay(), Task::BettingTimeout);
    }

    /// Deals the opening cards and moves to insurance or player turns.
    ///
    /// Reached from the betting timer or from an early bet confirmation;
    /// either way the other path's timer has gone stale by the time this
    /// finishes.
    pub(crate) fn start_dealing(&self, now: u64) {
        self.set_phase(RoundPhase::Dealing);
        self.resolved.store(false, Ordering::Release);
        self.dealer_drawing.store(false, Ordering::Release);
        *self.callout.lock() = None;

        let up_is_ace;
        {
            let mut shoe = self.shoe.lock();
            let mut seats = self.seats.lock();
            let mut dealer_hand = self.dealer_hand.lock();
            dealer_hand.clear();

            for seat in seats.iter_mut() {
                match seat {
                    Seat::Ai(ai) => {
                        let bet = AI_BET.min(ai.chips);
                        ai.chips -= bet;
                        ai.hand.reset(bet);
                        ai.insurance_bet = 0;
                    }
                    Seat::Human(human) => {
                        human.hands.clear();
                        human.active_hand = 0;
                        human.split_used = false;
                        human.insurance_bet = 0;
                        human.insurance_decided = false;
                        // Debit the bet up front; an unseated or unbet
                        // player simply sits the round out.
                        if human.bet > 0 && human.bet <= human.chips {
                            human.chips -= human.bet;
                            human.hands.push(Hand::new(human.bet));
                        }
                    }
                    Seat::Empty => {}
                }
            }

            // Two passes around the table, then the dealer's card each
            // pass; the dealer's second card stays face down.
            for _ in 0..2 {
                for seat in seats.iter_mut() {
                    let hand = match seat {
                        Seat::Ai(ai) if ai.hand.bet() > 0 => Some(&mut ai.hand),
                        Seat::Human(human) => human.hands.first_mut(),
                        _ => None,
                    };
                    if let (Some(hand), Some(card)) = (hand, shoe.draw()) {
                        hand.add_card(card);
                    }
                }
                if let Some(card) = shoe.draw() {
                    dealer_hand.add_card(card);
                }
            }

            up_is_ace = dealer_hand.up_card().is_some_and(|card| card.is_ace());
        }

        if up_is_ace {
            self.offer_insurance(now);
        } else {
            self.begin_player_turns(now);
        }
    }

    /// Opens the insurance window. AI seats decide on the spot; the human
    /// gets the window (or can decide early).
    fn offer_insurance(&self, now: u64) {
        {
            let mut seats = self.seats.lock();
            let mut rng = self.rng.lock();
            for seat in seats.iter_mut() {
                if let Seat::Ai(ai) = seat {
                    if ai.hand.bet() > 0 && ai.takes_insurance(&mut rng) {
                        let wager = (ai.hand.bet() / 2).min(ai.chips);
                        ai.chips -= wager;
                        ai.insurance_bet = wager;
                    }
                }
            }
        }
        self.set_phase(RoundPhase::Insurance);
        self.push_event(TableEvent::InsuranceOffered);
        self.schedule(now + INSURANCE_WINDOW_MS, Task::FinishInsurance);
    }

    /// Closes the insurance window. A dealer blackjack short-circuits the
    /// round straight to resolving.
    pub(crate) fn finish_insurance(&self, now: u64) {
        let hole = {
            let mut dealer_hand = self.dealer_hand.lock();
            if dealer_hand.is_blackjack() {
                dealer_hand.reveal_hole();
                dealer_hand.cards().get(1).copied()
            } else {
                None
            }
        };

        if let Some(card) = hole {
            self.push_event(TableEvent::HoleRevealed(card));
            let line = payout_callout(21, false);
            *self.callout.lock() = Some(line.clone());
            self.push_event(TableEvent::Callout(line));
            self.enter_resolving(now);
        } else {
            self.begin_player_turns(now);
        }
    }
}

//! Round resolution: outcomes, payouts, and the heat model.

use core::cmp::Ordering as CmpOrdering;
use core::sync::atomic::Ordering;

use log::debug;

use crate::events::TableEvent;
use crate::hand::{Hand, HandStatus};
use crate::heat::HeatInput;
use crate::result::HandOutcome;

use super::sched::Task;
use super::{RoundPhase, Seat, Table, RESOLVING_HOLD_MS};

impl Table {
    /// Enters the resolving phase, settles the round exactly once, and
    /// holds the results on display.
    pub(crate) fn enter_resolving(&self, now: u64) {
        self.set_phase(RoundPhase::Resolving);
        if self.resolved.swap(true, Ordering::AcqRel) {
            debug!("round already resolved");
        } else {
            self.resolve_round();
        }
        self.schedule(now + RESOLVING_HOLD_MS, Task::EnterRoundEnd);
    }

    fn resolve_round(&self) {
        let (dealer_value, dealer_blackjack, dealer_bust) = {
            let dealer_hand = self.dealer_hand.lock();
            (
                dealer_hand.value(),
                dealer_hand.is_blackjack(),
                dealer_hand.is_bust(),
            )
        };
        let blackjack_pays = self.options.blackjack_pays;

        let mut human_bet = 0u32;
        let mut human_payout = 0u32;
        let mut human_present = false;

        {
            let mut seats = self.seats.lock();
            for (index, seat) in seats.iter_mut().enumerate() {
                match seat {
                    Seat::Ai(ai) if ai.hand.bet() > 0 => {
                        let outcome =
                            hand_outcome(&ai.hand, dealer_value, dealer_blackjack, dealer_bust);
                        let payout = outcome.payout(ai.hand.bet(), blackjack_pays);
                        ai.chips += payout;
                        if dealer_blackjack && ai.insurance_bet > 0 {
                            // Insurance pays 2:1 on top of the returned stake.
                            ai.chips += ai.insurance_bet * 3;
                        }
                        ai.insurance_bet = 0;
                        ai.hand.set_result(outcome);
                        self.push_event(TableEvent::HandSettled {
                            seat: index,
                            outcome,
                            payout,
                        });
                    }
                    Seat::Human(human) => {
                        human_present = true;
                        for hand in &mut human.hands {
                            let outcome =
                                hand_outcome(hand, dealer_value, dealer_blackjack, dealer_bust);
                            let payout = outcome.payout(hand.bet(), blackjack_pays);
                            human.chips += payout;
                            hand.set_result(outcome);
                            human_bet += hand.bet();
                            human_payout += payout;
                            self.push_event(TableEvent::HandSettled {
                                seat: index,
                                outcome,
                                payout,
                            });
                        }
                        if dealer_blackjack && human.insurance_bet > 0 {
                            human.chips += human.insurance_bet * 3;
                            human_payout += human.insurance_bet * 3;
                        }
                        human.insurance_bet = 0;
                    }
                    _ => {}
                }
            }
        }

        if human_present && human_bet > 0 {
            let true_count = self.shoe.lock().true_count();
            let dealer = *self.dealer.lock();
            let reported = self.heat.lock().on_resolution(
                HeatInput {
                    bet: human_bet,
                    payout: human_payout,
                    true_count,
                    detection_skill: dealer.detection_skill,
                    dealer_on_your_side: dealer.on_your_side,
                },
                &mut self.rng.lock(),
            );
            if reported {
                self.push_event(TableEvent::DealerReported);
            }
        }
    }
}

/// Standard blackjack comparison for one settled hand.
///
/// A natural beats any dealer 21 built from three or more cards; a dealer
/// natural pushes only against another natural.
fn hand_outcome(
    hand: &Hand,
    dealer_value: u8,
    dealer_blackjack: bool,
    dealer_bust: bool,
) -> HandOutcome {
    if hand.status() == HandStatus::Bust {
        return HandOutcome::Bust;
    }
    if hand.is_blackjack() {
        return if dealer_blackjack {
            HandOutcome::Push
        } else {
            HandOutcome::Blackjack
        };
    }
    if dealer_blackjack {
        return HandOutcome::Lose;
    }
    if dealer_bust {
        return HandOutcome::Win;
    }
    match hand.value().cmp(&dealer_value) {
        CmpOrdering::Greater => HandOutcome::Win,
        CmpOrdering::Equal => HandOutcome::Push,
        CmpOrdering::Less => HandOutcome::Lose,
    }
}

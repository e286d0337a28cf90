//! The dealer's reveal, settle, and draw loop.

use core::sync::atomic::Ordering;

use log::debug;
use rand::Rng;

use crate::dealer::{dealer_decision, payout_callout, DealerAction};
use crate::dialogue::LineKind;
use crate::events::TableEvent;

use super::sched::Task;
use super::{
    RoundPhase, Table, CALLOUT_HOLD_MS, DEALER_DRAW_GAP_MS, DEALER_REMARK_DELAY_MS,
    DEALER_SETTLE_MS,
};

impl Table {
    /// Reveals the hole card and arms the settle delay before drawing.
    pub(crate) fn enter_dealer_turn(&self, now: u64) {
        self.set_phase(RoundPhase::DealerTurn);

        let hole = {
            let mut dealer_hand = self.dealer_hand.lock();
            dealer_hand.reveal_hole();
            dealer_hand.cards().get(1).copied()
        };
        if let Some(card) = hole {
            self.push_event(TableEvent::HoleRevealed(card));
        }

        // Dealers chat once in a while.
        if self.rng.lock().random_range(0..100) < 10 {
            self.schedule(now + DEALER_REMARK_DELAY_MS, Task::DealerRemark);
        }

        self.schedule(now + DEALER_SETTLE_MS, Task::BeginDealerPlay);
    }

    pub(crate) fn dealer_remark(&self) {
        let id = self.dealer.lock().id;
        self.speak(id, LineKind::DealerRemark);
    }

    /// Kicks off the draw loop once the settle delay has passed. The
    /// processing flag keeps a second pass from starting while one is
    /// already in flight.
    pub(crate) fn begin_dealer_play(&self, now: u64) {
        if self.dealer_drawing.swap(true, Ordering::AcqRel) {
            debug!("dealer draw loop already running");
            return;
        }
        self.dealer_draw(now);
    }

    /// One step of the draw loop: apply the house policy, draw on a hit,
    /// and pause between cards.
    pub(crate) fn dealer_draw(&self, now: u64) {
        let action = {
            let dealer_hand = self.dealer_hand.lock();
            dealer_decision(dealer_hand.cards(), self.options.dealer_hits_soft_17)
        };

        match action {
            DealerAction::Hit => {
                let busted = {
                    let mut dealer_hand = self.dealer_hand.lock();
                    if let Some(card) = self.shoe.lock().draw() {
                        dealer_hand.add_card(card);
                    }
                    dealer_hand.is_bust()
                };
                if busted {
                    self.finish_dealer_play(now);
                } else {
                    self.schedule(now + DEALER_DRAW_GAP_MS, Task::DealerDraw);
                }
            }
            DealerAction::Stand => self.finish_dealer_play(now),
        }
    }

    /// Puts the settlement callout up and holds it before resolving.
    fn finish_dealer_play(&self, now: u64) {
        self.dealer_drawing.store(false, Ordering::Release);

        let (value, busted) = {
            let dealer_hand = self.dealer_hand.lock();
            (dealer_hand.value(), dealer_hand.is_bust())
        };
        let line = payout_callout(value, busted);
        *self.callout.lock() = Some(line.clone());
        self.push_event(TableEvent::Callout(line));

        self.schedule(now + CALLOUT_HOLD_MS, Task::EnterResolving);
    }
}

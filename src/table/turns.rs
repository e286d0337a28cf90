//! Driving player and AI turns in seat order.

use log::debug;

use crate::hand::HandStatus;
use crate::roster::AiAction;

use super::sched::Task;
use super::{RoundPhase, Seat, Table, AI_ACTION_GAP_MS, MAX_SEATS};

impl Table {
    /// Enters the player-turn phase and hands the action to the first
    /// seat with a live hand.
    pub(crate) fn begin_player_turns(&self, now: u64) {
        self.set_phase(RoundPhase::PlayerTurn);
        *self.turn.lock() = None;
        self.advance_turn(now);
    }

    /// Moves the action to the next seat with an active hand, or on to the
    /// dealer when nobody is left. AI seats act on a short timer; a human
    /// seat waits for intents.
    pub(crate) fn advance_turn(&self, now: u64) {
        let next = {
            let turn = self.turn.lock();
            let seats = self.seats.lock();
            let start = turn.map_or(0, |seat| seat + 1);
            let mut found = None;
            for seat in start..MAX_SEATS {
                match &seats[seat] {
                    Seat::Ai(ai)
                        if ai.hand.bet() > 0 && ai.hand.status() == HandStatus::Active =>
                    {
                        found = Some((seat, true));
                        break;
                    }
                    Seat::Human(human) if human.has_active_hand() => {
                        found = Some((seat, false));
                        break;
                    }
                    _ => {}
                }
            }
            found
        };

        match next {
            Some((seat, is_ai)) => {
                *self.turn.lock() = Some(seat);
                if is_ai {
                    self.schedule(now + AI_ACTION_GAP_MS, Task::AiTurn { seat });
                }
            }
            None => {
                *self.turn.lock() = None;
                self.enter_dealer_turn(now);
            }
        }
    }

    /// One AI action: decide, apply, and either keep the turn (after a hit
    /// that leaves the hand live) or pass it on.
    pub(crate) fn ai_turn(&self, seat: usize, now: u64) {
        if *self.phase.lock() != RoundPhase::PlayerTurn || *self.turn.lock() != Some(seat) {
            debug!("ignoring stale AI turn for seat {seat}");
            return;
        }
        let Some(up_card) = self.dealer_hand.lock().up_card().copied() else {
            return;
        };

        let action = {
            let seats = self.seats.lock();
            let Seat::Ai(ai) = &seats[seat] else {
                return;
            };
            ai.decide(up_card, &mut self.rng.lock())
        };

        match action {
            AiAction::Hit => {
                let still_active = {
                    let mut seats = self.seats.lock();
                    let Seat::Ai(ai) = &mut seats[seat] else {
                        return;
                    };
                    if let Some(card) = self.shoe.lock().draw() {
                        ai.hand.add_card(card);
                    }
                    ai.hand.status() == HandStatus::Active
                };
                if still_active {
                    self.schedule(now + AI_ACTION_GAP_MS, Task::AiTurn { seat });
                } else {
                    self.advance_turn(now);
                }
            }
            AiAction::Stand => {
                {
                    let mut seats = self.seats.lock();
                    if let Seat::Ai(ai) = &mut seats[seat] {
                        ai.hand.set_status(HandStatus::Stand);
                    }
                }
                self.advance_turn(now);
            }
        }
    }

    /// Called after every human intent; passes the turn on once all of the
    /// human's hands are done.
    pub(crate) fn after_human_action(&self, now: u64) {
        let done = {
            let seats = self.seats.lock();
            seats
                .iter()
                .find_map(|seat| match seat {
                    Seat::Human(human) => Some(!human.has_active_hand()),
                    _ => None,
                })
                .unwrap_or(true)
        };
        if done {
            self.advance_turn(now);
        }
    }
}

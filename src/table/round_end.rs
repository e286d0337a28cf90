//! Between-rounds housekeeping: roster churn, banter, reshuffle.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use rand::Rng;

use crate::dialogue::LineKind;
use crate::events::TableEvent;
use crate::roster::{AiPlayer, DealerCharacter, AI_CHARACTERS, DEALERS};
use crate::shoe::Shoe;

use super::sched::Task;
use super::{
    RoundPhase, Seat, Table, MAX_AI, MIN_AI, RESHUFFLE_PAUSE_MS, ROUND_END_DELAY_MS,
};

/// Chips a newly seated AI player sits down with.
const AI_BUY_IN: u32 = 500;

impl Table {
    /// Clears the callout and enters the round-end pause.
    pub(crate) fn enter_round_end(&self, now: u64) {
        *self.callout.lock() = None;
        self.push_event(TableEvent::CalloutCleared);
        self.set_phase(RoundPhase::RoundEnd);
        self.schedule(now + ROUND_END_DELAY_MS, Task::FinishRoundEnd);
    }

    /// Runs the between-rounds housekeeping, then opens the next betting
    /// phase (after an extra pause when the shoe was reshuffled).
    pub(crate) fn finish_round_end(&self, now: u64) {
        self.churn_roster();
        self.maybe_banter();
        if self.maybe_reshuffle() {
            self.schedule(now + RESHUFFLE_PAUSE_MS, Task::StartBetting);
        } else {
            self.start_betting(now);
        }
    }

    /// 15% of rounds the roster changes: a coin flip between seating a new
    /// AI (respecting the seven-AI cap) and sending one home (never below
    /// two).
    fn churn_roster(&self) {
        let (roll, add) = {
            let mut rng = self.rng.lock();
            (rng.random_range(0..100u32), rng.random_bool(0.5))
        };
        if roll >= 15 {
            return;
        }

        if add {
            self.seat_new_ai();
        } else {
            self.remove_random_ai();
        }
    }

    fn seat_new_ai(&self) {
        let seated_event = {
            let mut seats = self.seats.lock();
            let ai_count = seats
                .iter()
                .filter(|seat| matches!(seat, Seat::Ai(_)))
                .count();
            if ai_count >= MAX_AI {
                return;
            }

            let seated_ids: Vec<&str> = seats
                .iter()
                .filter_map(|seat| match seat {
                    Seat::Ai(ai) => Some(ai.character.id),
                    _ => None,
                })
                .collect();
            let candidates: Vec<_> = AI_CHARACTERS
                .iter()
                .copied()
                .filter(|character| !seated_ids.contains(&character.id))
                .collect();
            let free: Vec<usize> = seats
                .iter()
                .enumerate()
                .filter(|(_, seat)| matches!(seat, Seat::Empty))
                .map(|(index, _)| index)
                .collect();
            if candidates.is_empty() || free.is_empty() {
                return;
            }

            let (character, seat) = {
                let mut rng = self.rng.lock();
                (
                    candidates[rng.random_range(0..candidates.len())],
                    free[rng.random_range(0..free.len())],
                )
            };
            seats[seat] = Seat::Ai(AiPlayer::new(character, AI_BUY_IN));
            (seat, character.id)
        };

        let (seat, id) = seated_event;
        self.push_event(TableEvent::SeatJoined {
            seat,
            character: id.to_string(),
        });
        self.speak(id, LineKind::Joining);
    }

    fn remove_random_ai(&self) {
        let removed = {
            let mut seats = self.seats.lock();
            let ai_seats: Vec<usize> = seats
                .iter()
                .enumerate()
                .filter(|(_, seat)| matches!(seat, Seat::Ai(_)))
                .map(|(index, _)| index)
                .collect();
            if ai_seats.len() <= MIN_AI {
                return;
            }

            let seat = ai_seats[self.rng.lock().random_range(0..ai_seats.len())];
            let id = match &seats[seat] {
                Seat::Ai(ai) => ai.character.id,
                _ => return,
            };
            seats[seat] = Seat::Empty;
            (seat, id)
        };

        let (seat, id) = removed;
        self.speak(id, LineKind::Leaving);
        self.push_event(TableEvent::SeatLeft {
            seat,
            character: id.to_string(),
        });
    }

    /// A quarter of rounds, someone at the table says something, as long
    /// as there are at least two AI players to talk to each other.
    fn maybe_banter(&self) {
        if self.rng.lock().random_range(0..100u32) >= 25 {
            return;
        }
        let speaker = {
            let seats = self.seats.lock();
            let ids: Vec<&str> = seats
                .iter()
                .filter_map(|seat| match seat {
                    Seat::Ai(ai) => Some(ai.character.id),
                    _ => None,
                })
                .collect();
            if ids.len() < 2 {
                return;
            }
            ids[self.rng.lock().random_range(0..ids.len())]
        };
        self.speak(speaker, LineKind::Banter);
    }

    /// Rebuilds the shoe once the cut card has been reached. A fresh shoe
    /// occasionally comes with a fresh dealer.
    fn maybe_reshuffle(&self) -> bool {
        if !self
            .shoe
            .lock()
            .cut_card_reached(self.options.penetration)
        {
            return false;
        }

        {
            let mut rng = self.rng.lock();
            *self.shoe.lock() =
                Shoe::build(self.options.decks, self.options.counting_system, &mut rng);
        }
        let shoes_dealt = {
            let mut counters = self.counters.lock();
            counters.shoes_dealt += 1;
            counters.shoes_dealt
        };
        self.push_event(TableEvent::Reshuffled { shoes_dealt });

        if self.rng.lock().random_range(0..100u32) < 20 {
            self.rotate_dealer();
        }
        true
    }

    fn rotate_dealer(&self) {
        let current = self.dealer.lock().id;
        let candidates: Vec<DealerCharacter> = DEALERS
            .iter()
            .copied()
            .filter(|dealer| dealer.id != current)
            .collect();
        if candidates.is_empty() {
            return;
        }
        let next = candidates[self.rng.lock().random_range(0..candidates.len())];
        *self.dealer.lock() = next;
        // A new dealer starts with a clean read on the player.
        self.heat.lock().reset_dealer_suspicion();
        self.push_event(TableEvent::DealerChanged {
            character: next.id.to_string(),
        });
    }
}

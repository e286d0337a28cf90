//! The round lifecycle engine.
//!
//! [`Table`] owns the whole state of one blackjack table: shoe, seats,
//! dealer, heat model, and the timer queue that drives phase transitions.
//! It is single-threaded and cooperative: the host calls
//! [`Table::tick`] with a monotonic millisecond clock and every deferred
//! transition fires from there. Player input arrives through the intent
//! methods and is applied synchronously, never racing a timer.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::debug;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::dialogue::{BuiltinDialogue, DialogueSource, LineKind};
use crate::events::TableEvent;
use crate::hand::{DealerHand, Hand, HandStatus};
use crate::heat::HeatState;
use crate::options::TableOptions;
use crate::roster::{AiPlayer, DealerCharacter, AI_CHARACTERS, DEALERS};
use crate::shoe::Shoe;
use crate::sync::Mutex;

mod dealer_turn;
mod dealing;
mod intents;
mod phase;
mod resolve;
mod round_end;
mod sched;
mod turns;

pub use phase::RoundPhase;

use sched::{Scheduler, Task};

/// Seats at the table, including the human's.
pub const MAX_SEATS: usize = 8;

/// At most seven AI players; one seat is always left for the human.
const MAX_AI: usize = 7;
/// The table never empties out below two AI players.
const MIN_AI: usize = 2;
/// Flat AI wager per round.
const AI_BET: u32 = 25;

/// Betting grace period while a human is seated.
const BETTING_SEATED_MS: u64 = 10_000;
/// Betting pause with no human at the table.
const BETTING_UNSEATED_MS: u64 = 500;
/// How long insurance decisions stay open.
const INSURANCE_WINDOW_MS: u64 = 5_000;
/// Pause between AI actions.
const AI_ACTION_GAP_MS: u64 = 1_000;
/// Dealer settle delay after revealing the hole card.
const DEALER_SETTLE_MS: u64 = 1_500;
/// Pause between dealer hits.
const DEALER_DRAW_GAP_MS: u64 = 1_000;
/// How long the settlement callout stays up before resolving.
const CALLOUT_HOLD_MS: u64 = 10_000;
/// How long results stay on display.
const RESOLVING_HOLD_MS: u64 = 11_000;
/// Pause in round end before housekeeping runs.
const ROUND_END_DELAY_MS: u64 = 4_000;
/// Extra pause after a reshuffle announcement.
const RESHUFFLE_PAUSE_MS: u64 = 3_000;
/// Delay before the dealer's flavor remark.
const DEALER_REMARK_DELAY_MS: u64 = 500;

/// One position at the table.
#[derive(Debug, Clone)]
pub enum Seat {
    /// Nobody here.
    Empty,
    /// An AI player.
    Ai(AiPlayer),
    /// The human player.
    Human(HumanPlayer),
}

impl Seat {
    const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The human player's seat state.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    /// Chip stack.
    pub chips: u32,
    /// Pending bet for the next deal.
    pub bet: u32,
    /// Whether the bet was confirmed early this betting phase.
    pub confirmed: bool,
    /// Hands in play this round (two after a split).
    pub hands: Vec<Hand>,
    /// Index of the hand currently being played.
    pub active_hand: usize,
    /// One split per round.
    pub split_used: bool,
    /// Insurance wager, zero if none.
    pub insurance_bet: u32,
    /// Whether the insurance decision was made this round.
    pub insurance_decided: bool,
}

impl HumanPlayer {
    fn new(chips: u32) -> Self {
        Self {
            chips,
            bet: 0,
            confirmed: false,
            hands: Vec::new(),
            active_hand: 0,
            split_used: false,
            insurance_bet: 0,
            insurance_decided: false,
        }
    }

    pub(crate) fn has_active_hand(&self) -> bool {
        self.hands
            .iter()
            .any(|hand| hand.status() == HandStatus::Active)
    }

    /// Moves `active_hand` past any hand that is no longer playable.
    pub(crate) fn settle_active_hand(&mut self) {
        while self.active_hand < self.hands.len()
            && self.hands[self.active_hand].status() != HandStatus::Active
        {
            self.active_hand += 1;
        }
    }
}

/// Round and shoe counters.
#[derive(Debug, Clone, Copy)]
struct Counters {
    hand_number: u64,
    shoes_dealt: u32,
}

/// A multi-seat blackjack table with heat simulation.
///
/// # Example
///
/// ```no_run
/// use backcount::{Table, TableOptions};
///
/// let table = Table::new(TableOptions::default(), 42);
/// table.tick(0);
/// let _ = table.snapshot();
/// ```
pub struct Table {
    /// Immutable rule configuration.
    pub options: TableOptions,
    /// The shoe in play.
    pub shoe: Mutex<Shoe>,
    phase: Mutex<RoundPhase>,
    /// Every seat, in position order.
    pub seats: Mutex<Vec<Seat>>,
    /// The dealer's hand.
    pub dealer_hand: Mutex<DealerHand>,
    /// Who is dealing.
    pub dealer: Mutex<DealerCharacter>,
    /// Detection-risk state.
    pub heat: Mutex<HeatState>,
    /// Seat whose hand is currently acting, if any.
    turn: Mutex<Option<usize>>,
    callout: Mutex<Option<String>>,
    counters: Mutex<Counters>,
    sched: Mutex<Scheduler>,
    events: Mutex<VecDeque<TableEvent>>,
    rng: Mutex<ChaCha8Rng>,
    dialogue: Box<dyn DialogueSource + Send>,
    /// Bumped on every phase change; timers from older generations no-op.
    generation: AtomicU64,
    /// Guards the dealer's multi-step draw loop.
    dealer_drawing: AtomicBool,
    /// Resolution runs exactly once per round.
    resolved: AtomicBool,
}

impl Table {
    /// Opens a table with three AI players seated and betting armed.
    ///
    /// The same `seed` always produces the same shoe, roster churn, and
    /// drift sequence.
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        Self::with_dialogue(options, seed, Box::new(BuiltinDialogue))
    }

    /// Opens a table with an external dialogue source.
    #[must_use]
    pub fn with_dialogue(
        options: TableOptions,
        seed: u64,
        dialogue: Box<dyn DialogueSource + Send>,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::build(options.decks, options.counting_system, &mut rng);

        let mut seats = alloc::vec![Seat::Empty; MAX_SEATS];
        // Three regulars are already at the table when the player walks up.
        let mut characters = AI_CHARACTERS.to_vec();
        for seat in [1, 3, 5] {
            let index = rng.random_range(0..characters.len());
            seats[seat] = Seat::Ai(AiPlayer::new(characters.swap_remove(index), 500));
        }

        let dealer = *DEALERS
            .choose(&mut rng)
            .unwrap_or(&DEALERS[0]);

        let table = Self {
            options,
            shoe: Mutex::new(shoe),
            phase: Mutex::new(RoundPhase::Betting),
            seats: Mutex::new(seats),
            dealer_hand: Mutex::new(DealerHand::new()),
            dealer: Mutex::new(dealer),
            heat: Mutex::new(HeatState::new()),
            turn: Mutex::new(None),
            callout: Mutex::new(None),
            counters: Mutex::new(Counters {
                hand_number: 1,
                shoes_dealt: 1,
            }),
            sched: Mutex::new(Scheduler::new()),
            events: Mutex::new(VecDeque::new()),
            rng: Mutex::new(rng),
            dialogue,
            generation: AtomicU64::new(0),
            dealer_drawing: AtomicBool::new(false),
            resolved: AtomicBool::new(false),
        };

        table.schedule(table.betting_delay(), Task::BettingTimeout);
        table
    }

    /// Advances the engine to `now` (milliseconds, monotonic), firing every
    /// timer that has come due. Each timer fires with its scheduled due
    /// time as the logical clock, so cascaded delays stay exact however
    /// coarsely the host ticks. Timers armed before the last phase change
    /// are discarded unfired.
    pub fn tick(&self, now: u64) {
        loop {
            let entry = self.sched.lock().pop_due(now);
            let Some(entry) = entry else {
                break;
            };
            if entry.generation != self.generation.load(Ordering::Acquire) {
                debug!("discarding stale timer {:?}", entry.task);
                continue;
            }
            let at = entry.due;
            match entry.task {
                Task::BettingTimeout => self.start_dealing(at),
                Task::FinishInsurance => self.finish_insurance(at),
                Task::AiTurn { seat } => self.ai_turn(seat, at),
                Task::BeginDealerPlay => self.begin_dealer_play(at),
                Task::DealerDraw => self.dealer_draw(at),
                Task::DealerRemark => self.dealer_remark(),
                Task::EnterResolving => self.enter_resolving(at),
                Task::EnterRoundEnd => self.enter_round_end(at),
                Task::FinishRoundEnd => self.finish_round_end(at),
                Task::StartBetting => self.start_betting(at),
            }
        }
    }

    /// When the next timer fires, if any. Lets hosts sleep precisely
    /// instead of polling.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.sched.lock().next_due()
    }

    /// The current round phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        *self.phase.lock()
    }

    /// Hands accumulated events to the rendering layer, in order.
    #[must_use]
    pub fn drain_events(&self) -> Vec<TableEvent> {
        self.events.lock().drain(..).collect()
    }

    /// A point-in-time view of everything the rendering layer shows.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        let phase = *self.phase.lock();
        let shoe = self.shoe.lock();
        let heat = self.heat.lock();
        let counters = *self.counters.lock();
        let dealer_hand = self.dealer_hand.lock();
        let seats = self.seats.lock();

        let dealer_cards = if dealer_hand.is_hole_revealed() {
            dealer_hand.cards().to_vec()
        } else {
            dealer_hand.up_card().copied().into_iter().collect()
        };

        TableSnapshot {
            phase,
            hand_number: counters.hand_number,
            shoes_dealt: counters.shoes_dealt,
            cards_dealt: shoe.cards_dealt(),
            running_count: shoe.running_count(),
            true_count: shoe.true_count(),
            suspicion_level: heat.suspicion_level,
            pit_boss_distance: heat.pit_boss_distance,
            dealer_cards,
            dealer_value: dealer_hand.visible_value(),
            callout: self.callout.lock().clone(),
            turn_seat: *self.turn.lock(),
            seats: seats.iter().map(SeatView::from).collect(),
        }
    }

    // ---- internal helpers shared by the phase submodules ----

    pub(crate) fn set_phase(&self, phase: RoundPhase) {
        *self.phase.lock() = phase;
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.push_event(TableEvent::PhaseChanged(phase));
    }

    pub(crate) fn schedule(&self, due: u64, task: Task) {
        let generation = self.generation.load(Ordering::Acquire);
        self.sched.lock().schedule(due, generation, task);
    }

    pub(crate) fn push_event(&self, event: TableEvent) {
        self.events.lock().push_back(event);
    }

    /// Picks a random line for this character and emits it as speech.
    /// Stays quiet when the dialogue source has nothing.
    pub(crate) fn speak(&self, character_id: &str, kind: LineKind) {
        let lines = self.dialogue.lines(character_id, kind);
        if lines.is_empty() {
            return;
        }
        let index = self.rng.lock().random_range(0..lines.len());
        self.push_event(TableEvent::Speech {
            speaker: character_id.to_string(),
            line: lines[index].to_string(),
        });
    }

    pub(crate) fn betting_delay(&self) -> u64 {
        if self.human_seated() {
            BETTING_SEATED_MS
        } else {
            BETTING_UNSEATED_MS
        }
    }

    pub(crate) fn human_seated(&self) -> bool {
        human_seat(&self.seats.lock()).is_some()
    }
}

/// Seat index of the human player, if seated.
pub(crate) fn human_seat(seats: &[Seat]) -> Option<usize> {
    seats
        .iter()
        .position(|seat| matches!(seat, Seat::Human(_)))
}

/// Mutable access to the human player's seat state, if seated.
pub(crate) fn human_mut(seats: &mut [Seat]) -> Option<&mut HumanPlayer> {
    seats.iter_mut().find_map(|seat| match seat {
        Seat::Human(human) => Some(human),
        _ => None,
    })
}

/// What one seat looks like from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatView {
    /// Nobody here.
    Empty,
    /// An AI player.
    Ai {
        /// Character id.
        character: &'static str,
        /// Cards showing.
        cards: Vec<Card>,
        /// Current hand value.
        value: u8,
        /// Chip stack.
        chips: u32,
    },
    /// The human player.
    Human {
        /// All hands in play (two after a split).
        hands: Vec<Vec<Card>>,
        /// Index of the hand being played.
        active_hand: usize,
        /// Chip stack.
        chips: u32,
        /// Pending or riding bet.
        bet: u32,
    },
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        match seat {
            Seat::Empty => Self::Empty,
            Seat::Ai(ai) => Self::Ai {
                character: ai.character.id,
                cards: ai.hand.cards().to_vec(),
                value: ai.hand.value(),
                chips: ai.chips,
            },
            Seat::Human(human) => Self::Human {
                hands: human
                    .hands
                    .iter()
                    .map(|hand| hand.cards().to_vec())
                    .collect(),
                active_hand: human.active_hand,
                chips: human.chips,
                bet: human.bet,
            },
        }
    }
}

/// Point-in-time view of the table for rendering.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    /// Current phase.
    pub phase: RoundPhase,
    /// 1-based hand counter.
    pub hand_number: u64,
    /// Shoes dealt so far, including the one in play.
    pub shoes_dealt: u32,
    /// Cards drawn from the current shoe.
    pub cards_dealt: usize,
    /// Running count of the current shoe.
    pub running_count: i32,
    /// True count of the current shoe.
    pub true_count: f64,
    /// Cumulative detection risk, 0 to 100.
    pub suspicion_level: f64,
    /// Pit boss distance, 0 (on top of you) to 100.
    pub pit_boss_distance: f64,
    /// Dealer cards currently visible.
    pub dealer_cards: Vec<Card>,
    /// Dealer's visible hand value.
    pub dealer_value: u8,
    /// Settlement callout, while one is up.
    pub callout: Option<String>,
    /// Seat currently acting, if any.
    pub turn_seat: Option<usize>,
    /// Every seat, in position order.
    pub seats: Vec<SeatView>,
}

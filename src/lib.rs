//! A multi-seat blackjack table engine for card-counting practice, with
//! optional `no_std` support.
//!
//! The crate provides a [`Table`] type that runs the full round cycle —
//! betting, dealing, insurance, player and AI turns, the dealer's draw,
//! resolution, and between-round housekeeping — on a host-supplied
//! millisecond clock, while tracking the running count and a detection
//! model (pit boss distance and suspicion) that reacts to how the player
//! sizes bets against the count. A standalone [`AudioQueue`] orders and
//! preempts spoken lines by priority.
//!
//! # Example
//!
//! ```no_run
//! use backcount::{Table, TableOptions};
//!
//! let table = Table::new(TableOptions::default(), 42);
//! table.sit(0).unwrap();
//! table.place_bet(50).unwrap();
//! table.confirm_bet(0).unwrap();
//! table.tick(30_000);
//! for event in table.drain_events() {
//!     let _ = event;
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod audio;
pub mod card;
pub mod dealer;
pub mod dialogue;
pub mod error;
pub mod events;
pub mod hand;
pub mod heat;
pub mod options;
pub mod result;
pub mod roster;
pub mod shoe;
mod sync;
pub mod table;

// Re-export main types
pub use audio::{AssetSource, AudioCommand, AudioCue, AudioPriority, AudioQueue};
pub use card::{Card, CountingSystem, Suit, DECK_SIZE};
pub use dealer::{dealer_decision, payout_callout, DealerAction};
pub use dialogue::{BuiltinDialogue, DialogueSource, LineKind};
pub use error::{ActionError, BetError, InsuranceError, SeatError};
pub use events::TableEvent;
pub use hand::{DealerHand, Hand, HandStatus};
pub use heat::{HeatInput, HeatState};
pub use options::TableOptions;
pub use result::HandOutcome;
pub use roster::{AiCharacter, AiPlayer, DealerCharacter, AI_CHARACTERS, DEALERS};
pub use shoe::{cut_card_position, Shoe};
pub use table::{
    HumanPlayer, RoundPhase, Seat, SeatView, Table, TableSnapshot, MAX_SEATS,
};

//! Outbound events for the rendering layer.

extern crate alloc;

use alloc::string::String;

use crate::card::Card;
use crate::result::HandOutcome;
use crate::table::RoundPhase;

/// Something the rendering layer should show or react to.
///
/// Events accumulate inside the table and are handed over in order through
/// [`Table::drain_events`](crate::Table::drain_events).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TableEvent {
    /// The round moved to a new phase.
    PhaseChanged(RoundPhase),
    /// Someone at the table said something.
    Speech {
        /// Character id of the speaker.
        speaker: String,
        /// The line, verbatim from the dialogue source.
        line: String,
    },
    /// The dealer's settlement callout went up.
    Callout(String),
    /// The settlement callout came down.
    CalloutCleared,
    /// The dealer turned over the hole card.
    HoleRevealed(Card),
    /// Insurance is being offered (dealer shows an ace).
    InsuranceOffered,
    /// A hand settled.
    HandSettled {
        /// Seat the hand belongs to.
        seat: usize,
        /// How it settled.
        outcome: HandOutcome,
        /// Chips credited back (bet plus winnings; zero on a loss).
        payout: u32,
    },
    /// An AI player sat down.
    SeatJoined {
        /// The seat they took.
        seat: usize,
        /// Character id.
        character: String,
    },
    /// An AI player left.
    SeatLeft {
        /// The seat they vacated.
        seat: usize,
        /// Character id.
        character: String,
    },
    /// The shoe was rebuilt; counts reset.
    Reshuffled {
        /// Total shoes dealt so far, including the fresh one.
        shoes_dealt: u32,
    },
    /// A new dealer took over the table.
    DealerChanged {
        /// Character id of the incoming dealer.
        character: String,
    },
    /// The dealer flagged the player to the pit.
    DealerReported,
}

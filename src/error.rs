//! Error types for player-facing table operations.

use thiserror::Error;

/// Errors from sitting down at or leaving the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeatError {
    /// The requested seat index is outside the table.
    #[error("seat index out of range")]
    OutOfRange,
    /// Another player already occupies that seat.
    #[error("seat is already taken")]
    SeatTaken,
    /// The player is already seated.
    #[error("already seated")]
    AlreadySeated,
    /// The player is not seated.
    #[error("not seated at the table")]
    NotSeated,
    /// Seats can only be vacated between rounds.
    #[error("cannot leave mid-round")]
    MidRound,
}

/// Errors from placing or confirming a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bets are only accepted during the betting phase.
    #[error("bets are only accepted during betting")]
    WrongPhase,
    /// The player is not seated.
    #[error("not seated at the table")]
    NotSeated,
    /// A bet must be positive.
    #[error("bet must be greater than zero")]
    ZeroBet,
    /// The player cannot cover the bet.
    #[error("insufficient chips")]
    InsufficientChips,
    /// The bet was already confirmed this round.
    #[error("bet already confirmed")]
    AlreadyConfirmed,
}

/// Errors from in-round hand actions (hit, stand, double, split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Actions are only accepted during the player-turn phase.
    #[error("not the player-turn phase")]
    WrongPhase,
    /// It is not this seat's turn to act.
    #[error("not your turn")]
    NotYourTurn,
    /// The acting hand is no longer active.
    #[error("hand is not active")]
    HandNotActive,
    /// Doubling is only allowed on the first two cards.
    #[error("can only double on the first two cards")]
    NotFirstTwoCards,
    /// Splitting requires a matching pair.
    #[error("hand is not a splittable pair")]
    NotAPair,
    /// Only one split per round is allowed.
    #[error("already split this round")]
    AlreadySplit,
    /// The player cannot cover the additional bet.
    #[error("insufficient chips")]
    InsufficientChips,
}

/// Errors from insurance decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// Insurance is not currently offered.
    #[error("insurance is not offered")]
    NotOffered,
    /// The insurance decision was already made.
    #[error("insurance already decided")]
    AlreadyDecided,
    /// The player cannot cover the insurance bet.
    #[error("insufficient chips")]
    InsufficientChips,
}

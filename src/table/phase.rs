//! Round phases.

/// Where the table currently is in the round cycle.
///
/// The cycle is `Betting → Dealing → (Insurance?) → PlayerTurn →
/// DealerTurn → Resolving → RoundEnd → Betting`; there is no terminal
/// phase while the table stays open. `Insurance` is entered only when the
/// dealer's up-card is an ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    /// Waiting for bets; a timer (or an early confirmation) starts the deal.
    Betting,
    /// Opening cards are going out.
    Dealing,
    /// Dealer shows an ace; insurance decisions are open.
    Insurance,
    /// Seats act in position order.
    PlayerTurn,
    /// The dealer reveals and draws out their hand.
    DealerTurn,
    /// Results are computed and paid; the callout stays up.
    Resolving,
    /// Between-rounds housekeeping: roster churn, banter, reshuffle check.
    RoundEnd,
}

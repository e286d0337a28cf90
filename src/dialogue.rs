//! Dialogue lookup boundary.
//!
//! The engine never interprets line content; it asks a [`DialogueSource`]
//! for candidates, picks one at random, and passes the string through to
//! the rendering layer.

/// What kind of line is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LineKind {
    /// An AI player sitting down.
    Joining,
    /// An AI player leaving the table.
    Leaving,
    /// Idle chatter between AI players.
    Banter,
    /// A dealer aside during their draw.
    DealerRemark,
}

/// Keyed lookup from (character id, line kind) to candidate lines.
///
/// Implementations own all content authoring. Returning an empty slice is
/// fine; the engine simply stays quiet.
pub trait DialogueSource {
    /// Candidate lines for this character and situation.
    fn lines(&self, character_id: &str, kind: LineKind) -> &[&str];
}

/// Minimal built-in lines so the engine is usable without external content.
///
/// Ignores the character id; every speaker shares the same small pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDialogue;

impl DialogueSource for BuiltinDialogue {
    fn lines(&self, _character_id: &str, kind: LineKind) -> &[&str] {
        match kind {
            LineKind::Joining => &[
                "Mind if I join?",
                "Is this seat taken?",
                "Deal me in next hand.",
            ],
            LineKind::Leaving => &[
                "That's it for me.",
                "Cashing out while I'm ahead.",
                "This table's cold. I'm out.",
            ],
            LineKind::Banter => &[
                "You believe this shoe?",
                "Should've doubled that one.",
                "Dealer's been hot all night.",
            ],
            LineKind::DealerRemark => &[
                "Let's see what we've got.",
                "Moment of truth.",
                "Good luck, everyone.",
            ],
        }
    }
}

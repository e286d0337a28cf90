//! Table personalities: AI players and dealers.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::hand::Hand;

/// A recurring AI player archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiCharacter {
    /// Stable identifier, used for dialogue lookup.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Play skill, 0 to 100. Skilled players deviate from hit-below-17
    /// toward basic strategy on stiff hands.
    pub skill_level: u8,
}

/// The cast of AI players that can join the table.
pub const AI_CHARACTERS: &[AiCharacter] = &[
    AiCharacter {
        id: "drunk-danny",
        name: "Danny",
        skill_level: 15,
    },
    AiCharacter {
        id: "clumsy-claire",
        name: "Claire",
        skill_level: 35,
    },
    AiCharacter {
        id: "chatty-carlos",
        name: "Carlos",
        skill_level: 50,
    },
    AiCharacter {
        id: "superstitious-susan",
        name: "Susan",
        skill_level: 40,
    },
    AiCharacter {
        id: "cocky-kyle",
        name: "Kyle",
        skill_level: 60,
    },
    AiCharacter {
        id: "methodical-mei",
        name: "Mei",
        skill_level: 80,
    },
    AiCharacter {
        id: "weekend-walt",
        name: "Walt",
        skill_level: 25,
    },
];

/// A dealer archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerCharacter {
    /// Stable identifier, used for dialogue lookup.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// How good this dealer is at spotting a counter, 0 to 100.
    pub detection_skill: u8,
    /// Sympathetic dealers never accrue or report suspicion.
    pub on_your_side: bool,
}

/// The dealers that can work the table.
pub const DEALERS: &[DealerCharacter] = &[
    DealerCharacter {
        id: "maria-counter",
        name: "Maria",
        detection_skill: 95,
        on_your_side: true,
    },
    DealerCharacter {
        id: "rookie-jenny",
        name: "Jenny",
        detection_skill: 15,
        on_your_side: false,
    },
    DealerCharacter {
        id: "strict-harold",
        name: "Harold",
        detection_skill: 85,
        on_your_side: false,
    },
    DealerCharacter {
        id: "friendly-marcus",
        name: "Marcus",
        detection_skill: 40,
        on_your_side: true,
    },
    DealerCharacter {
        id: "oblivious-frank",
        name: "Frank",
        detection_skill: 20,
        on_your_side: false,
    },
];

/// What an AI player wants to do with its active hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Draw a card.
    Hit,
    /// Stop.
    Stand,
}

/// A seated AI player.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    /// Which archetype is sitting here.
    pub character: AiCharacter,
    /// The AI's current hand.
    pub hand: Hand,
    /// Chip stack.
    pub chips: u32,
    /// Insurance wager this round, zero if none.
    pub insurance_bet: u32,
}

impl AiPlayer {
    /// Seats a character with a starting stack and an empty hand.
    #[must_use]
    pub const fn new(character: AiCharacter, chips: u32) -> Self {
        Self {
            character,
            hand: Hand::new(0),
            chips,
            insurance_bet: 0,
        }
    }

    /// Picks the next action for the current hand.
    ///
    /// The baseline is hit-below-17. With probability `skill_level / 100`,
    /// a stiff hard 12-16 against a weak dealer up-card (2-6) stands
    /// instead, which is the basic-strategy line.
    pub fn decide(&self, dealer_up: Card, rng: &mut ChaCha8Rng) -> AiAction {
        let value = self.hand.value();
        if value >= 17 {
            return AiAction::Stand;
        }

        let stiff = (12..=16).contains(&value) && !self.hand.is_soft();
        let dealer_weak = (2..=6).contains(&dealer_up.rank);
        if stiff && dealer_weak && rng.random_range(0..100) < u32::from(self.character.skill_level)
        {
            return AiAction::Stand;
        }

        AiAction::Hit
    }

    /// Whether this AI takes insurance when offered. A flat one-in-ten
    /// regardless of skill; insurance is a gut call at this table.
    pub fn takes_insurance(&self, rng: &mut ChaCha8Rng) -> bool {
        rng.random_range(0..100) < 10
    }
}

//! Pit-boss proximity and suspicion accounting.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "std")]
fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(not(feature = "std"))]
fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[cfg(feature = "std")]
fn abs(x: f64) -> f64 {
    x.abs()
}

#[cfg(not(feature = "std"))]
fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Threshold at which an attentive dealer reports the player to the pit.
const DEALER_REPORT_THRESHOLD: f64 = 70.0;

/// Per-round input to the heat model.
#[derive(Debug, Clone, Copy)]
pub struct HeatInput {
    /// The bet that just settled.
    pub bet: u32,
    /// Total chips credited back for the round (bet plus winnings).
    pub payout: u32,
    /// True count at resolution time.
    pub true_count: f64,
    /// Dealer's attentiveness, 0 to 100.
    pub detection_skill: u8,
    /// Sympathetic dealers never accrue or report suspicion.
    pub dealer_on_your_side: bool,
}

/// Detection-risk state carried across rounds.
///
/// `pit_boss_distance` is in-fiction scrutiny: lower means closer.
/// `suspicion_level` is cumulative risk. Both stay within `[0, 100]`.
#[derive(Debug, Clone, Copy)]
pub struct HeatState {
    /// How far away the pit boss currently is (0 = breathing down your neck).
    pub pit_boss_distance: f64,
    /// Cumulative detection risk.
    pub suspicion_level: f64,
    /// What the current dealer has personally noticed so far.
    pub dealer_suspicion: f64,
    /// Last round's settled bet, the baseline for bet variation.
    pub previous_bet: u32,
}

impl HeatState {
    /// Fresh state: pit boss at a neutral middle distance, nothing noticed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pit_boss_distance: 50.0,
            suspicion_level: 0.0,
            dealer_suspicion: 0.0,
            previous_bet: 0,
        }
    }

    /// Applies one round's observation. Returns `true` when the dealer
    /// reported the player to the pit this round.
    ///
    /// The first observed round only records the baseline bet; there is no
    /// variation to judge against yet.
    pub fn on_resolution(&mut self, input: HeatInput, rng: &mut ChaCha8Rng) -> bool {
        if self.previous_bet == 0 {
            self.previous_bet = input.bet;
            return false;
        }

        let previous = f64::from(self.previous_bet);
        let bet_variation = abs(f64::from(input.bet) - previous) / previous;

        let net_gain = f64::from(input.payout) - f64::from(input.bet);
        let is_big_win = net_gain > 1.5 * f64::from(input.bet);

        // Bet sizing that tracks the count is the signature of a counter.
        let suspicious_betting = (input.bet > self.previous_bet && input.true_count >= 2.0)
            || (input.bet < self.previous_bet && input.true_count <= -1.0);

        let mut suspicion_increase = suspicion_increase(
            bet_variation,
            input.detection_skill,
            suspicious_betting,
            input.true_count,
        );

        let proximity_penalty = if bet_variation > 0.5 {
            (bet_variation * 20.0).min(20.0)
        } else {
            0.0
        };
        // Slight outward bias: the pit boss wanders away absent a trigger.
        let drift = rng.random_range(-3.0..7.0);
        let proximity_change = if is_big_win { -15.0 } else { 0.0 } - proximity_penalty + drift;

        self.pit_boss_distance = (self.pit_boss_distance + proximity_change).clamp(0.0, 100.0);

        if self.pit_boss_distance < 30.0 && (is_big_win || bet_variation > 0.5) {
            suspicion_increase += if is_big_win {
                5.0
            } else {
                floor(bet_variation * 10.0)
            };
        }

        self.suspicion_level = (self.suspicion_level + suspicion_increase).clamp(0.0, 100.0);
        self.previous_bet = input.bet;

        if input.dealer_on_your_side {
            return false;
        }

        self.dealer_suspicion += suspicion_increase * f64::from(input.detection_skill) / 100.0;
        if self.dealer_suspicion >= DEALER_REPORT_THRESHOLD {
            self.suspicion_level =
                (self.suspicion_level + (self.dealer_suspicion / 2.0).min(30.0)).clamp(0.0, 100.0);
            self.pit_boss_distance = (self.pit_boss_distance - 25.0).clamp(0.0, 100.0);
            self.dealer_suspicion = 0.0;
            return true;
        }

        false
    }

    /// Resets what the dealer has noticed, e.g. on a dealer change.
    pub const fn reset_dealer_suspicion(&mut self) {
        self.dealer_suspicion = 0.0;
    }
}

impl Default for HeatState {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-round suspicion delta before any proximity bonus.
///
/// Zero below the 30% bet-variation threshold; above it, scaled by the
/// dealer's attentiveness, whether the sizing tracked the count, and the
/// count's magnitude, capped at 25.
fn suspicion_increase(
    bet_variation: f64,
    detection_skill: u8,
    suspicious_betting: bool,
    true_count: f64,
) -> f64 {
    if bet_variation <= 0.3 {
        return 0.0;
    }

    let skill = f64::from(detection_skill) / 100.0;
    let pattern = if suspicious_betting { 1.5 } else { 0.5 };
    let count_weight = 1.0 + 0.2 * abs(true_count);

    (bet_variation * 15.0 * skill * pattern * count_weight).min(25.0)
}

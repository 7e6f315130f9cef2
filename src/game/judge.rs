//! Hit classification: timing delta -> score tier.

/// A strike counts as a hit when the matching note's timing is strictly within
/// this many milliseconds of the current elapsed time.
pub const HIT_WINDOW_MS: f64 = 300.0;

/// Milliseconds a hit-effect annotation stays on screen.
pub const HIT_EFFECT_MS: f64 = 500.0;

/// Accuracy tier of a successful hit. Only the tightest tier announces itself
/// as perfect; the two looser tiers share the "GOOD!" label but score
/// differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Perfect,
    Great,
    Good,
}

impl Tier {
    pub fn base_points(self) -> i64 {
        match self {
            Tier::Perfect => 300,
            Tier::Great => 200,
            Tier::Good => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Perfect => "PERFECT!",
            Tier::Great | Tier::Good => "GOOD!",
        }
    }
}

/// Classify an absolute timing delta. `None` means the strike is outside the
/// hit window entirely (a miss, handled by the caller as a combo reset).
pub fn classify(delta_ms: f64) -> Option<Tier> {
    if delta_ms < 100.0 {
        Some(Tier::Perfect)
    } else if delta_ms < 200.0 {
        Some(Tier::Great)
    } else if delta_ms < HIT_WINDOW_MS {
        Some(Tier::Good)
    } else {
        None
    }
}

//! Note scheduling and the active-window filter.
//!
//! A session's full note sequence is generated once at start from the chosen
//! level: roughly one note per two beats, each nominally 2 s after the previous
//! one with up to 0.5 s of jitter, on a random lane. The active-window filter
//! then selects, every tick, the slice of that sequence that is currently
//! visible and hittable.

use serde::Serialize;

use super::catalog::Level;

/// One of the two symbolic input channels a note belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Red,
    Blue,
}

/// A scheduled note. `position` is cosmetic only (lateral placement for the
/// renderer, in [20, 80]); judgment looks at `lane` and `timing_ms` alone.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Note {
    pub id: u32,
    pub lane: Lane,
    pub timing_ms: f64,
    pub position: f64,
}

/// Notes become visible this far ahead of their hit time...
pub const LOOKAHEAD_MS: f64 = 3000.0;
/// ...and stay in the active set this long past it.
pub const LOOKBEHIND_MS: f64 = 500.0;

const NOTE_SPACING_MS: f64 = 2000.0;
const JITTER_MS: f64 = 500.0;

/// Uniform random source for note generation. Injectable so tests can pin the
/// layout while the browser seeds a fresh generator per session.
pub trait NoteRng {
    /// Uniform value in [0, 1).
    fn next_f64(&mut self) -> f64;
}

/// Small 64-bit linear congruential generator (not crypto secure; note layout
/// only). Seedable for deterministic tests.
#[derive(Clone, Debug)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    pub fn seeded(seed: u64) -> Self {
        // One warm-up step so nearby seeds diverge immediately.
        let mut rng = Self { state: seed ^ 0x9e37_79b9_7f4a_7c15 };
        rng.step();
        rng
    }

    /// Seed from OS/browser entropy when the `rng` feature is enabled,
    /// otherwise scramble the caller's clock reading.
    pub fn from_clock(now_ms: f64) -> Self {
        #[cfg(feature = "rng")]
        {
            let mut buf = [0u8; 8];
            if getrandom::getrandom(&mut buf).is_ok() {
                return Self::seeded(u64::from_le_bytes(buf));
            }
        }
        Self::seeded((now_ms as u64).wrapping_mul(1664525).wrapping_add(1013904223))
    }

    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

impl NoteRng for Lcg64 {
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits -> [0, 1).
        (self.step() >> 11) as f64 * (1.0 / 9007199254740992.0)
    }
}

/// Number of notes a level yields: one per two beats, floored.
pub fn note_count(level: &Level) -> usize {
    if level.duration_s <= 0.0 || level.bpm <= 0.0 {
        return 0;
    }
    (level.duration_s * level.bpm / 60.0 / 2.0).floor() as usize
}

/// Generate the full note sequence for a session, sorted ascending by timing.
/// Ids are sequential in generation order and unique within the session.
pub fn generate(level: &Level, rng: &mut dyn NoteRng) -> Vec<Note> {
    let count = note_count(level);
    let mut notes = Vec::with_capacity(count);
    for i in 0..count {
        let lane = if rng.next_f64() > 0.5 { Lane::Red } else { Lane::Blue };
        notes.push(Note {
            id: i as u32,
            lane,
            timing_ms: i as f64 * NOTE_SPACING_MS + rng.next_f64() * JITTER_MS,
            position: rng.next_f64() * 60.0 + 20.0,
        });
    }
    // Jitter can locally reorder adjacent notes; the rest of the system relies
    // on non-decreasing timings.
    notes.sort_by(|a, b| a.timing_ms.total_cmp(&b.timing_ms));
    notes
}

/// Active-window membership: visible/hittable 3 s before the hit time until
/// 0.5 s after. Lower bound exclusive, upper bound inclusive.
pub fn is_active(note: &Note, elapsed_ms: f64) -> bool {
    note.timing_ms <= elapsed_ms + LOOKAHEAD_MS && note.timing_ms > elapsed_ms - LOOKBEHIND_MS
}

/// Recompute the active subset for the current elapsed time.
pub fn active_window(notes: &[Note], elapsed_ms: f64) -> Vec<Note> {
    notes.iter().copied().filter(|n| is_active(n, elapsed_ms)).collect()
}

/// How far an active note has visually traveled, 0 at window entry, 1 at the
/// judgment line. Values outside that range never render because the window
/// membership test already excludes them.
pub fn progress(note: &Note, elapsed_ms: f64) -> f64 {
    (elapsed_ms - (note.timing_ms - LOOKAHEAD_MS)) / LOOKAHEAD_MS
}

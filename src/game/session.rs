//! Session state machine: menu -> game -> results.
//!
//! All gameplay state lives in one [`Session`] container. Every external
//! trigger (frame tick, lane strike, navigation) is a `&mut self` method that
//! mutates the session atomically, so the single-threaded cooperative callers
//! always observe a consistent snapshot between calls.

use serde::Serialize;

use super::catalog::{self, Level};
use super::clock::{GameClock, Tick};
use super::judge::{self, HIT_EFFECT_MS, Tier};
use super::notes::{self, Lane, Note, NoteRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Menu,
    Game,
    Results,
}

/// Transient judgment annotation shown after a successful hit. Expires
/// [`HIT_EFFECT_MS`] after it was set; a later hit simply replaces it.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct HitEffect {
    pub label: &'static str,
    pub position: f64,
    #[serde(skip)]
    shown_at_ms: f64,
}

pub struct Session {
    screen: Screen,
    level: Option<&'static Level>,
    score: i64,
    combo: u32,
    max_combo: u32,
    elapsed_ms: f64,
    notes: Vec<Note>,
    active: Vec<Note>,
    hit_effect: Option<HitEffect>,
    clock: Option<GameClock>,
    // Bumped whenever the current game run ends or is superseded; frame
    // callbacks capture the value they were scheduled under and bail if it
    // has moved on.
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
            level: None,
            score: 0,
            combo: 0,
            max_combo: 0,
            elapsed_ms: 0.0,
            notes: Vec::new(),
            active: Vec::new(),
            hit_effect: None,
            clock: None,
            epoch: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }
    pub fn level(&self) -> Option<&'static Level> {
        self.level
    }
    pub fn score(&self) -> i64 {
        self.score
    }
    pub fn combo(&self) -> u32 {
        self.combo
    }
    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
    pub fn active_notes(&self) -> &[Note] {
        &self.active
    }
    pub fn hit_effect(&self) -> Option<&HitEffect> {
        self.hit_effect.as_ref()
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Menu -> Game: pick a level from the catalog and start playing it.
    /// Unknown ids and calls outside the menu are no-ops.
    pub fn select_level(&mut self, id: u32, rng: &mut dyn NoteRng, now_ms: f64) {
        if self.screen != Screen::Menu {
            return;
        }
        if let Some(level) = catalog::find(id) {
            self.begin(level, rng, now_ms);
        }
    }

    /// Results -> Game: replay the same level with a freshly generated layout.
    pub fn retry(&mut self, rng: &mut dyn NoteRng, now_ms: f64) {
        if self.screen != Screen::Results {
            return;
        }
        if let Some(level) = self.level {
            self.begin(level, rng, now_ms);
        }
    }

    fn begin(&mut self, level: &'static Level, rng: &mut dyn NoteRng, now_ms: f64) {
        self.level = Some(level);
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.elapsed_ms = 0.0;
        self.notes = notes::generate(level, rng);
        self.active.clear();
        self.hit_effect = None;
        self.clock = Some(GameClock::started_at(now_ms));
        self.epoch += 1;
        self.screen = Screen::Game;
    }

    /// Per-frame tick: advance the clock, recompute the active window, expire
    /// the hit effect, and end the session once the level duration is reached.
    /// Returns whether the driver should schedule another frame.
    pub fn tick(&mut self, now_ms: f64) -> Tick {
        if self.screen != Screen::Game {
            return Tick::Finished;
        }
        let (Some(level), Some(clock)) = (self.level, self.clock) else {
            return Tick::Finished;
        };
        self.elapsed_ms = clock.elapsed_ms(now_ms);
        self.active = notes::active_window(&self.notes, self.elapsed_ms);
        // Notes past the look-behind can never be hit or re-enter the window;
        // drop them from the master sequence. Aging out is not a miss: only a
        // failed strike resets combo.
        let cutoff = self.elapsed_ms - notes::LOOKBEHIND_MS;
        self.notes.retain(|n| n.timing_ms > cutoff);
        if let Some(fx) = &self.hit_effect {
            if self.elapsed_ms - fx.shown_at_ms >= HIT_EFFECT_MS {
                self.hit_effect = None;
            }
        }
        if self.elapsed_ms >= level.duration_ms() {
            self.finish();
            return Tick::Finished;
        }
        Tick::Running
    }

    /// Judge a lane strike against the active window. First matching-lane note
    /// in encounter order wins; ties are not broken by closeness. Outside a
    /// game, or with nothing hittable, this only resets the combo (strikes are
    /// never errors).
    pub fn strike(&mut self, lane: Lane) {
        if self.screen != Screen::Game {
            return;
        }
        let mut hit: Option<(usize, Tier)> = None;
        for (i, note) in self.active.iter().enumerate() {
            if note.lane != lane {
                continue;
            }
            if let Some(tier) = judge::classify((note.timing_ms - self.elapsed_ms).abs()) {
                hit = Some((i, tier));
                break;
            }
        }
        let Some((idx, tier)) = hit else {
            self.combo = 0;
            return;
        };
        let note = self.active.remove(idx);
        // Combo bonus uses the streak as it stood before this hit.
        self.score += tier.base_points() + self.combo as i64 * 10;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.hit_effect = Some(HitEffect {
            label: tier.label(),
            position: note.position,
            shown_at_ms: self.elapsed_ms,
        });
        // Consumed for good: it must not be hit or re-windowed again.
        self.notes.retain(|n| n.id != note.id);
    }

    /// Game -> Menu: the player bailed out; the run is discarded entirely.
    pub fn cancel(&mut self) {
        if self.screen != Screen::Game {
            return;
        }
        self.screen = Screen::Menu;
        self.level = None;
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.elapsed_ms = 0.0;
        self.notes.clear();
        self.active.clear();
        self.hit_effect = None;
        self.clock = None;
        self.epoch += 1;
    }

    /// Results -> Menu. Score/combo have served their display purpose.
    pub fn to_menu(&mut self) {
        if self.screen != Screen::Results {
            return;
        }
        self.screen = Screen::Menu;
        self.level = None;
    }

    fn finish(&mut self) {
        self.screen = Screen::Results;
        // Score, combo and max combo survive for the results display; the
        // note state does not outlive the game screen.
        self.notes.clear();
        self.active.clear();
        self.hit_effect = None;
        self.clock = None;
        self.epoch += 1;
    }

    /// Everything the rendering collaborator needs, as one serializable view.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.screen,
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            elapsed_ms: self.elapsed_ms,
            level: self.level.map(|l| LevelView {
                id: l.id,
                name: l.name,
                difficulty: l.difficulty,
                bpm: l.bpm,
                duration_s: l.duration_s,
            }),
            active_notes: self
                .active
                .iter()
                .map(|n| NoteView {
                    id: n.id,
                    lane: n.lane,
                    position: n.position,
                    progress: notes::progress(n, self.elapsed_ms),
                })
                .collect(),
            hit_effect: self.hit_effect,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub score: i64,
    pub combo: u32,
    pub max_combo: u32,
    pub elapsed_ms: f64,
    pub level: Option<LevelView>,
    pub active_notes: Vec<NoteView>,
    pub hit_effect: Option<HitEffect>,
}

#[derive(Debug, Serialize)]
pub struct LevelView {
    pub id: u32,
    pub name: &'static str,
    pub difficulty: u8,
    pub bpm: f64,
    pub duration_s: f64,
}

#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: u32,
    pub lane: Lane,
    pub position: f64,
    pub progress: f64,
}

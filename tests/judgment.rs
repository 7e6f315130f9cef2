// Judgment engine tests (native): tier boundaries, combo scaling, miss
// handling and hit-effect lifecycle, driven through the public session API
// with a scripted random source so note timings are exact.

use cookie_rhythm::game::judge::{self, Tier};
use cookie_rhythm::game::notes::NoteRng;
use cookie_rhythm::{Lane, Screen, Session};

/// Cycles through fixed draws in generation order (lane, timing jitter,
/// position), producing all-red notes at exactly i * 2000 ms, position 50.
struct ScriptRng {
    i: usize,
}

impl ScriptRng {
    fn new() -> Self {
        Self { i: 0 }
    }
}

impl NoteRng for ScriptRng {
    fn next_f64(&mut self) -> f64 {
        const DRAWS: [f64; 3] = [0.9, 0.0, 0.5];
        let v = DRAWS[self.i % DRAWS.len()];
        self.i += 1;
        v
    }
}

const START: f64 = 100_000.0;

/// Session on level 1 (30 red notes at 0, 2000, 4000, ... ms), ticked so that
/// elapsed time equals `elapsed_ms`.
fn session_at(elapsed_ms: f64) -> Session {
    let mut s = Session::new();
    s.select_level(1, &mut ScriptRng::new(), START);
    s.tick(START + elapsed_ms);
    assert_eq!(s.elapsed_ms(), elapsed_ms);
    s
}

#[test]
fn classify_tier_boundaries() {
    assert_eq!(judge::classify(0.0), Some(Tier::Perfect));
    assert_eq!(judge::classify(99.9), Some(Tier::Perfect));
    assert_eq!(judge::classify(100.0), Some(Tier::Great));
    assert_eq!(judge::classify(199.9), Some(Tier::Great));
    assert_eq!(judge::classify(200.0), Some(Tier::Good));
    assert_eq!(judge::classify(299.9), Some(Tier::Good));
    assert_eq!(judge::classify(300.0), None);
    assert_eq!(judge::classify(1000.0), None);
}

#[test]
fn tier_points_and_labels() {
    assert_eq!(Tier::Perfect.base_points(), 300);
    assert_eq!(Tier::Great.base_points(), 200);
    assert_eq!(Tier::Good.base_points(), 100);
    assert_eq!(Tier::Perfect.label(), "PERFECT!");
    // Both non-perfect tiers display the same label.
    assert_eq!(Tier::Great.label(), "GOOD!");
    assert_eq!(Tier::Good.label(), "GOOD!");
}

#[test]
fn exact_hit_awards_perfect_points() {
    // Note at 2000, struck at elapsed 2000: delta 0.
    let mut s = session_at(2000.0);
    s.strike(Lane::Red);
    assert_eq!(s.score(), 300);
    assert_eq!(s.combo(), 1);
}

#[test]
fn score_tiers_by_delta() {
    // First red candidate is the note at 2000 ms in each case.
    let cases = [(50.0, 300), (150.0, 200), (250.0, 100)];
    for (delta, expected) in cases {
        let mut s = session_at(2000.0 - delta);
        s.strike(Lane::Red);
        assert_eq!(s.score(), expected, "delta {delta} should award {expected}");
        assert_eq!(s.combo(), 1);
    }
}

#[test]
fn delta_of_300_is_a_miss() {
    let mut s = session_at(1700.0);
    // Note at 2000 is active but 300 ms away: strictly outside the hit window.
    s.strike(Lane::Red);
    assert_eq!(s.score(), 0);
    assert_eq!(s.combo(), 0);
}

#[test]
fn wrong_lane_resets_combo_and_leaves_score() {
    let mut s = session_at(2000.0);
    s.strike(Lane::Red);
    assert_eq!(s.combo(), 1);
    s.tick(START + 4000.0);
    s.strike(Lane::Blue); // all notes are red
    assert_eq!(s.combo(), 0);
    assert_eq!(s.score(), 300);
}

#[test]
fn combo_bonus_uses_pre_increment_streak() {
    let mut s = Session::new();
    s.select_level(1, &mut ScriptRng::new(), START);
    // Build a 4-streak with perfect hits on notes at 2000..8000.
    for t in [2000.0, 4000.0, 6000.0, 8000.0] {
        s.tick(START + t);
        s.strike(Lane::Red);
    }
    assert_eq!(s.combo(), 4);
    let before = s.score();
    // 200-tier hit at combo 4: 200 + 4*10 = 240.
    s.tick(START + 10_000.0 - 150.0);
    s.strike(Lane::Red);
    assert_eq!(s.score() - before, 240);
    assert_eq!(s.combo(), 5);
    assert_eq!(s.max_combo(), 5);
}

#[test]
fn hit_removes_note_from_master_sequence() {
    let mut s = session_at(2000.0);
    let active_before = s.active_notes().len();
    let hit_id = s
        .active_notes()
        .iter()
        .find(|n| (n.timing_ms - 2000.0).abs() < 300.0)
        .map(|n| n.id)
        .expect("a hittable note");
    s.strike(Lane::Red);
    assert!(s.notes().iter().all(|n| n.id != hit_id));
    assert_eq!(s.active_notes().len(), active_before - 1);
    // A second strike cannot consume the same note again.
    s.strike(Lane::Red);
    assert_eq!(s.score(), 300);
    assert_eq!(s.combo(), 0, "second strike found nothing and reset the streak");
}

#[test]
fn strike_with_no_active_notes_is_safe() {
    let mut s = Session::new();
    // Menu screen: nothing to judge.
    s.strike(Lane::Red);
    s.strike(Lane::Blue);
    assert_eq!(s.score(), 0);
    assert_eq!(s.screen(), Screen::Menu);
}

#[test]
fn hit_effect_is_set_and_expires() {
    let mut s = session_at(2000.0);
    s.strike(Lane::Red);
    let fx = s.hit_effect().expect("hit effect after a hit");
    assert_eq!(fx.label, "PERFECT!");
    assert_eq!(fx.position, 50.0);
    // Still visible 499 ms later, gone at 500.
    s.tick(START + 2499.0);
    assert!(s.hit_effect().is_some());
    s.tick(START + 2500.0);
    assert!(s.hit_effect().is_none());
}

#[test]
fn effect_timer_runs_from_the_most_recent_hit() {
    let mut s = session_at(2000.0);
    s.strike(Lane::Red);
    // Land a 100-tier hit on the note at 4000; the new annotation replaces
    // whatever was showing.
    s.tick(START + 3750.0);
    s.strike(Lane::Red);
    let fx = s.hit_effect().expect("effect after second hit");
    assert_eq!(fx.label, "GOOD!");
    // The replacement runs on its own 500 ms clock.
    s.tick(START + 4249.0);
    assert!(s.hit_effect().is_some());
    s.tick(START + 4250.0);
    assert!(s.hit_effect().is_none());
}

//! Static level catalog. Levels are fixed at compile time and never mutated;
//! everything downstream borrows them as `&'static Level`.

/// Playable level descriptor (immutable).
#[derive(Debug)]
pub struct Level {
    pub id: u32,
    pub name: &'static str,
    /// Star rating shown on the menu, 1..=5.
    pub difficulty: u8,
    pub bpm: f64,
    pub duration_s: f64,
}

impl Level {
    /// Session length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_s * 1000.0
    }
}

pub static LEVELS: [Level; 3] = [
    Level { id: 1, name: "Cookie Melody", difficulty: 2, bpm: 120.0, duration_s: 30.0 },
    Level { id: 2, name: "Sweet Beat", difficulty: 3, bpm: 140.0, duration_s: 35.0 },
    Level { id: 3, name: "Sugar Rush", difficulty: 5, bpm: 180.0, duration_s: 40.0 },
];

pub fn all() -> &'static [Level] {
    &LEVELS
}

/// Look up a level by id. Unknown ids are simply absent (selection is a no-op).
pub fn find(id: u32) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.id == id)
}

//! Cookie Rhythm core crate.
//!
//! A two-lane browser rhythm minigame: pick a level, then strike the red/blue
//! lanes in time with the scrolling notes. The gameplay core under [`game`] is
//! pure Rust and runs natively; [`browser`] holds the wasm glue (frame loop,
//! keyboard mapping, exported commands) and hands state snapshots to the host
//! page, which owns all rendering.

use wasm_bindgen::prelude::*;

pub mod browser;
pub mod game;

pub use game::{Lane, Lcg64, Level, Note, NoteRng, Screen, Session, Snapshot, Tick, Tier};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Wire input listeners; the session starts on the menu screen.
    browser::mount()
}

//! Browser driver: the only module that talks to the DOM.
//!
//! The session lives in a thread-local cell; a requestAnimationFrame loop
//! drives the game clock while a game is running, and a keydown listener maps
//! physical keys onto lane strikes. Rendering itself is the host page's job —
//! it polls [`snapshot_json`] each frame and draws whatever it likes.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::game::{Lane, Lcg64, Screen, Session, Tick};

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::new());
    static KEYS_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Wire up input listeners and leave the session on the menu screen. Safe to
/// call more than once; the listener is only installed the first time.
pub fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if KEYS_INSTALLED.with(|c| c.replace(true)) {
        return Ok(());
    }

    // Two trigger keys per lane, plus the ЙЦУКЕН variants sitting on the same
    // physical keys. Anything unmapped is ignored.
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let key = evt.key();
        SESSION.with(|cell| {
            let mut session = cell.borrow_mut();
            match key.as_str() {
                "d" | "f" | "в" | "а" => session.strike(Lane::Red),
                "j" | "k" | "о" | "л" => session.strike(Lane::Blue),
                "Escape" => session.cancel(),
                _ => {}
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Start playing a catalog level. Unknown ids do nothing.
#[wasm_bindgen]
pub fn select_level(id: u32) {
    let now = now_ms();
    let mut rng = Lcg64::from_clock(now);
    let started = SESSION.with(|cell| {
        let mut session = cell.borrow_mut();
        session.select_level(id, &mut rng, now);
        (session.screen() == Screen::Game).then(|| session.epoch())
    });
    if let Some(epoch) = started {
        start_tick_loop(epoch);
    }
}

/// Replay the level shown on the results screen with a fresh note layout.
#[wasm_bindgen]
pub fn retry() {
    let now = now_ms();
    let mut rng = Lcg64::from_clock(now);
    let started = SESSION.with(|cell| {
        let mut session = cell.borrow_mut();
        session.retry(&mut rng, now);
        (session.screen() == Screen::Game).then(|| session.epoch())
    });
    if let Some(epoch) = started {
        start_tick_loop(epoch);
    }
}

/// Strike a lane from a page button ("red" / "blue"; anything else ignored).
#[wasm_bindgen]
pub fn strike_lane(lane: &str) {
    let lane = match lane {
        "red" => Lane::Red,
        "blue" => Lane::Blue,
        _ => return,
    };
    SESSION.with(|cell| cell.borrow_mut().strike(lane));
}

/// Abandon the current run and return to the menu.
#[wasm_bindgen]
pub fn cancel_to_menu() {
    SESSION.with(|cell| cell.borrow_mut().cancel());
}

/// Leave the results screen for the menu.
#[wasm_bindgen]
pub fn return_to_menu() {
    SESSION.with(|cell| cell.borrow_mut().to_menu());
}

/// Current session state as JSON for the host page's renderer.
#[wasm_bindgen]
pub fn snapshot_json() -> String {
    SESSION.with(|cell| serde_json::to_string(&cell.borrow().snapshot()).unwrap_or_default())
}

type FrameCallback = std::rc::Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// One loop per game run. The closure captures the epoch it was scheduled
// under; if the session has since been restarted or left the game screen, the
// stale callback must not touch it (and must not reschedule itself).
fn start_tick_loop(epoch: u64) {
    let f: FrameCallback = std::rc::Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = SESSION.with(|cell| {
            let mut session = cell.borrow_mut();
            if session.epoch() != epoch || session.screen() != Screen::Game {
                return false;
            }
            session.tick(ts) == Tick::Running
        });
        if keep_going {
            if let Some(w) = window() {
                let _ =
                    w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

//! Gameplay core: level catalog, note scheduling, the game clock, judgment and
//! the session state machine. Nothing in here touches the browser; the whole
//! module runs (and is tested) natively.

pub mod catalog;
pub mod clock;
pub mod judge;
pub mod notes;
pub mod session;

pub use catalog::Level;
pub use clock::Tick;
pub use judge::Tier;
pub use notes::{Lane, Lcg64, Note, NoteRng};
pub use session::{Screen, Session, Snapshot};

//! Journal append-only de invocaciones del motor.
//!
//! Cada invocación emite eventos a un [`EventJournal`]; el estado de la
//! invocación (fase, conteos, error final) se reconstruye por replay de
//! esos eventos, sin estructuras mutables paralelas.

pub mod replay;
pub mod store;
pub mod types;

pub use replay::{replay, variants, InvocationSnapshot, TransferPhase};
pub use store::{EventJournal, InMemoryJournal};
pub use types::{TransferEvent, TransferEventKind};

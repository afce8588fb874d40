//! bim-adapters: implementaciones en memoria de los contratos del anfitrión.
//!
//! Este crate provee:
//! - `InMemoryDocument`: documento con transacción por snapshot, apto para
//!   pruebas, demos y la CLI.
//! - `DocumentBuilder` / `ElementSpec`: construcción declarativa de
//!   documentos de fixture.
//! - `ScriptedSelection`: prompts de selección respondidos por guion.
//! - `faults::FailingDocument`: decorador que inyecta fallos del anfitrión
//!   para ejercitar la atomicidad del lote.
//!
//! Nota: el core sólo conoce los traits de `bim_core::host`; nada de lo que
//! hay acá se filtra hacia el motor.

pub mod document;
pub mod faults;
pub mod selection;

pub use document::{DocumentBuilder, ElementSpec, InMemoryDocument};
pub use selection::{ScriptedReply, ScriptedSelection};

//! bim-core: motor de transferencia de parámetros entre elementos.
//!
//! El motor lee el valor de un parámetro en un elemento de origen y lo
//! propaga a un conjunto de elementos destino dentro de una única
//! transacción del documento anfitrión. Los fallos por parámetro se
//! acumulan en un reporte por (parámetro, categoría); los fallos del
//! anfitrión abortan el lote completo con rollback.
//!
//! El crate no conoce ningún anfitrión concreto: el documento, la
//! transacción y la selección interactiva entran por los traits de
//! [`host`], y toda invocación queda registrada en un [`journal`]
//! append-only que permite reconstruir su estado por replay.

pub mod access;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod flows;
pub mod hashing;
pub mod host;
pub mod journal;
pub mod report;
pub mod request;

pub use access::{ReadFailure, SourceReading, WriteFailure};
pub use engine::TransferEngine;
pub use errors::{HostError, TransferError, WriteError};
pub use host::{
    ParamFilter, ParamSlot, ParameterStore, SelectionError, SelectionFilter, SelectionProvider,
    TransactionGuard, Transactional,
};
pub use journal::{
    replay, variants, EventJournal, InMemoryJournal, InvocationSnapshot, TransferEvent,
    TransferEventKind, TransferPhase,
};
pub use report::{FailureKey, FailureReason, FailureTally, TransferReport};
pub use request::{TransferMode, TransferRequest, TransferScope};

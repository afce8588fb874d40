//! Errores del motor de transferencia.
//!
//! Hay dos familias con destinos distintos:
//! - [`TransferError`]: errores fatales de una invocación completa. Cortan
//!   el lote y, si había transacción abierta, fuerzan rollback.
//! - [`WriteError`] / [`HostError`]: errores del documento anfitrión. Una
//!   escritura rechazada por el propio parámetro (no existe, clase
//!   incompatible, sólo lectura) NO es fatal: se cuenta en el reporte y el
//!   lote continúa. Sólo un [`HostError`] escala a fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bim_domain::{ElementId, ParamName, StorageKind};

/// Error fatal de una invocación del motor.
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransferError {
    /// El usuario cerró un prompt de selección sin elegir nada.
    #[error("operación cancelada por el usuario")]
    Cancelled,
    /// El parámetro de lectura no existe en el elemento de origen.
    #[error("el parámetro de lectura '{name}' no existe en el origen")]
    SourceParameterMissing { name: ParamName },
    /// El parámetro de lectura existe pero no tiene valor utilizable.
    #[error("el parámetro de lectura '{name}' está vacío en el origen")]
    SourceValueEmpty { name: ParamName },
    /// La selección no cumple el filtro del flujo (vínculos, elementos
    /// inexistentes, sin parámetros que ofrecer).
    #[error("selección inválida: {detail}")]
    InvalidSelection { detail: String },
    /// Solicitud sin nombres de parámetro o sin elementos destino.
    #[error("solicitud sin parámetros o sin destinos")]
    EmptyRequest,
    /// Ningún parámetro del conjunto pudo leerse en el origen.
    #[error("ningún parámetro legible en el elemento de origen")]
    NothingToCopy,
    /// Fallo inesperado del documento anfitrión. El detalle se propaga
    /// textual, sin reinterpretar.
    #[error("fallo del documento anfitrión: {detail}")]
    Host { detail: String },
}

impl From<HostError> for TransferError {
    fn from(e: HostError) -> Self {
        TransferError::Host { detail: e.to_string() }
    }
}

/// Fallo interno del documento anfitrión. Siempre fatal para el lote.
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum HostError {
    #[error("el elemento {0} no existe en el documento")]
    UnknownElement(ElementId),
    #[error("transacción ya iniciada")]
    TransactionAlreadyStarted,
    #[error("no hay transacción activa")]
    NoActiveTransaction,
    #[error("escritura fuera de transacción")]
    WriteOutsideTransaction,
    #[error("fallo interno del documento: {0}")]
    Internal(String),
}

/// Resultado negativo de una escritura individual sobre un parámetro.
///
/// Las cuatro primeras variantes son locales al parámetro: el accesor las
/// convierte en una entrada del reporte. `Host` escala a [`TransferError`].
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum WriteError {
    #[error("el parámetro no existe en el elemento")]
    NotFound,
    #[error("clase de almacenamiento esperada {expected}, recibida {found}")]
    KindMismatch { expected: StorageKind, found: StorageKind },
    #[error("el parámetro es de sólo lectura")]
    ReadOnly,
    #[error("el elemento proviene de un vínculo y no admite escrituras")]
    LinkedElement,
    #[error(transparent)]
    Host(#[from] HostError),
}

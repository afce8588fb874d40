//! Tipos de evento de una invocación y estructura `TransferEvent`.
//!
//! Rol en el motor:
//! - Cada invocación emite eventos a un `EventJournal` append-only.
//! - El replay de esos eventos reconstruye la fase y los conteos de la
//!   invocación sin estado mutable adicional.
//! - El enum `TransferEventKind` es el contrato observable del motor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bim_domain::{CategoryLabel, ParamName, StorageKind};

use crate::errors::TransferError;
use crate::report::FailureReason;
use crate::request::TransferScope;

/// Eventos soportados por el journal de invocaciones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransferEventKind {
    /// Apertura de una invocación. Invariante: debe ser el primer evento de
    /// un `invocation_id`.
    InvocationStarted {
        label: String,
        scope: TransferScope,
        names: Vec<ParamName>,
    },
    /// El parámetro de origen se leyó con valor utilizable.
    SourceRead { name: ParamName, kind: StorageKind },
    /// Un parámetro del conjunto espejo se omitió por ilegible o vacío en
    /// el origen. No aborta la invocación.
    SourceSkipped { name: ParamName },
    /// Destinos resueltos tras selección y filtrado.
    TargetsPicked { count: usize },
    /// Una escritura individual quedó rechazada y contada en el reporte.
    WriteFailed {
        name: ParamName,
        category: CategoryLabel,
        reason: FailureReason,
    },
    /// La transacción confirmó. Cierra la invocación con su huella.
    Committed {
        updated: usize,
        writes: usize,
        fingerprint: String,
    },
    /// La transacción se revirtió por un fallo fatal durante el lote.
    RolledBack { error: TransferError },
    /// La invocación terminó antes de abrir transacción.
    Aborted { error: TransferError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub seq: u64, // asignado por el journal (orden de append)
    pub invocation_id: Uuid,
    pub kind: TransferEventKind,
    pub ts: DateTime<Utc>, // metadato, no participa de la huella
}

//! Reconstrucción del estado de una invocación a partir de sus eventos.
//!
//! La máquina de estados observable es:
//! Idle -> ReadingSource -> (Aborted | WritingTargets)
//! WritingTargets -> (Committed | RolledBack)
//! Los cuatro estados finales son terminales; no hay transición que salga
//! de ellos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TransferError;

use super::types::{TransferEvent, TransferEventKind};

/// Fase de una invocación según su prefijo de eventos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferPhase {
    /// Sin eventos: la invocación no empezó.
    Idle,
    /// Abierta, leyendo el origen.
    ReadingSource,
    /// Destinos resueltos, transacción en curso.
    WritingTargets,
    /// Terminal: transacción confirmada.
    Committed,
    /// Terminal: transacción revertida por fallo fatal.
    RolledBack,
    /// Terminal: terminó antes de abrir transacción.
    Aborted,
}

impl TransferPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferPhase::Committed | TransferPhase::RolledBack | TransferPhase::Aborted
        )
    }
}

/// Estado reconstruido de una invocación.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationSnapshot {
    pub id: Uuid,
    pub phase: TransferPhase,
    /// Lecturas de origen con valor utilizable.
    pub source_reads: usize,
    /// Nombres omitidos durante la lectura espejo.
    pub source_skips: usize,
    /// Escrituras rechazadas registradas durante el lote.
    pub write_failures: usize,
    /// Destinos del lote, si la invocación llegó a resolverlos.
    pub targets: Option<usize>,
    /// Conteo final de elementos actualizados, sólo si confirmó.
    pub updated: Option<usize>,
    /// Huella del lote confirmado.
    pub fingerprint: Option<String>,
    /// Error terminal, si la invocación no confirmó.
    pub error: Option<TransferError>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Reproduce los eventos de una invocación y devuelve su estado.
pub fn replay(invocation_id: Uuid, events: &[TransferEvent]) -> InvocationSnapshot {
    let mut snap = InvocationSnapshot {
        id: invocation_id,
        phase: TransferPhase::Idle,
        source_reads: 0,
        source_skips: 0,
        write_failures: 0,
        targets: None,
        updated: None,
        fingerprint: None,
        error: None,
        started_at: None,
        finished_at: None,
    };
    for ev in events {
        match &ev.kind {
            TransferEventKind::InvocationStarted { .. } => {
                snap.phase = TransferPhase::ReadingSource;
                snap.started_at = Some(ev.ts);
            }
            TransferEventKind::SourceRead { .. } => snap.source_reads += 1,
            TransferEventKind::SourceSkipped { .. } => snap.source_skips += 1,
            TransferEventKind::TargetsPicked { count } => {
                snap.phase = TransferPhase::WritingTargets;
                snap.targets = Some(*count);
            }
            TransferEventKind::WriteFailed { .. } => snap.write_failures += 1,
            TransferEventKind::Committed { updated, fingerprint, .. } => {
                snap.phase = TransferPhase::Committed;
                snap.updated = Some(*updated);
                snap.fingerprint = Some(fingerprint.clone());
                snap.finished_at = Some(ev.ts);
            }
            TransferEventKind::RolledBack { error } => {
                snap.phase = TransferPhase::RolledBack;
                snap.error = Some(error.clone());
                snap.finished_at = Some(ev.ts);
            }
            TransferEventKind::Aborted { error } => {
                snap.phase = TransferPhase::Aborted;
                snap.error = Some(error.clone());
                snap.finished_at = Some(ev.ts);
            }
        }
    }
    snap
}

/// Secuencia compacta de variantes, una letra por evento. Útil para
/// asserts de pruebas y trazas de demo.
pub fn variants(events: &[TransferEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|ev| match ev.kind {
            TransferEventKind::InvocationStarted { .. } => "I",
            TransferEventKind::SourceRead { .. } => "R",
            TransferEventKind::SourceSkipped { .. } => "K",
            TransferEventKind::TargetsPicked { .. } => "T",
            TransferEventKind::WriteFailed { .. } => "W",
            TransferEventKind::Committed { .. } => "C",
            TransferEventKind::RolledBack { .. } => "X",
            TransferEventKind::Aborted { .. } => "A",
        })
        .collect()
}

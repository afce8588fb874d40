use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{TransferEvent, TransferEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventJournal {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts asignados).
    fn append_kind(&mut self, invocation_id: Uuid, kind: TransferEventKind) -> TransferEvent;
    /// Lista los eventos de una invocación en orden ascendente por seq.
    fn list(&self, invocation_id: Uuid) -> Vec<TransferEvent>;
}

/// Journal en memoria, un vector de eventos por invocación.
pub struct InMemoryJournal {
    pub inner: HashMap<Uuid, Vec<TransferEvent>>,
}

impl Default for InMemoryJournal {
    fn default() -> Self {
        Self { inner: HashMap::new() }
    }
}

impl EventJournal for InMemoryJournal {
    fn append_kind(&mut self, invocation_id: Uuid, kind: TransferEventKind) -> TransferEvent {
        let vec = self.inner.entry(invocation_id).or_default();
        let seq = vec.len() as u64;
        let ev = TransferEvent { seq, invocation_id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, invocation_id: Uuid) -> Vec<TransferEvent> {
        self.inner.get(&invocation_id).cloned().unwrap_or_default()
    }
}

//! Documento anfitrión en memoria.
//!
//! Modela lo mínimo que el motor necesita de un documento real: elementos
//! con categoría, parámetros tipados por clase de almacenamiento, elementos
//! de tipo y marcas de vínculo. La transacción se implementa por snapshot:
//! `begin` clona el estado completo, `rollback` lo restituye y `commit` lo
//! descarta. Con documentos de fixture el costo del clon es irrelevante y
//! el rollback queda trivialmente correcto.

mod builder;

pub use builder::{DocumentBuilder, ElementSpec};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bim_core::{HostError, ParamFilter, ParamSlot, ParameterStore, Transactional, WriteError};
use bim_domain::{CategoryLabel, ElementId, ParamName, ParamValue, StorageKind};

/// Celda de parámetro: clase fija, bandera de sólo lectura y valor actual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ParamCell {
    pub kind: StorageKind,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub value: Option<ParamValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ElementState {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub linked: bool,
    #[serde(default)]
    pub type_id: Option<ElementId>,
    #[serde(default)]
    pub params: BTreeMap<ParamName, ParamCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TxState {
    backup: Option<BTreeMap<ElementId, ElementState>>,
    label: Option<String>,
    started: bool,
    ended: bool,
}

/// Documento en memoria. Serializable a JSON para snapshots de demo; el
/// estado transaccional no viaja en el snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryDocument {
    elements: BTreeMap<ElementId, ElementState>,
    #[serde(skip)]
    tx: TxState,
}

impl InMemoryDocument {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Ids presentes, en orden ascendente.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.elements.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Etiqueta de la última transacción abierta, si hubo alguna.
    pub fn last_transaction_label(&self) -> Option<&str> {
        self.tx.label.as_deref()
    }

    pub(crate) fn insert_state(&mut self, id: ElementId, state: ElementState) {
        self.elements.insert(id, state);
    }

    fn element(&self, id: ElementId) -> Result<&ElementState, HostError> {
        self.elements.get(&id).ok_or(HostError::UnknownElement(id))
    }

    fn read_cell(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<&ParamCell>, HostError> {
        Ok(self.element(element)?.params.get(name))
    }

    /// Localiza la celda y valida todas las precondiciones de escritura.
    fn writable_cell(
        &mut self,
        element: ElementId,
        name: &ParamName,
        kind: StorageKind,
    ) -> Result<&mut ParamCell, WriteError> {
        if !self.tx.started {
            return Err(WriteError::Host(HostError::WriteOutsideTransaction));
        }
        let state = self
            .elements
            .get_mut(&element)
            .ok_or(WriteError::Host(HostError::UnknownElement(element)))?;
        if state.linked {
            return Err(WriteError::LinkedElement);
        }
        let cell = state.params.get_mut(name).ok_or(WriteError::NotFound)?;
        if cell.read_only {
            return Err(WriteError::ReadOnly);
        }
        if cell.kind != kind {
            return Err(WriteError::KindMismatch { expected: cell.kind, found: kind });
        }
        Ok(cell)
    }
}

impl ParameterStore for InMemoryDocument {
    fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    fn category(&self, element: ElementId) -> CategoryLabel {
        match self.elements.get(&element) {
            Some(state) => CategoryLabel::from_option(state.category.as_deref()),
            None => CategoryLabel::Missing,
        }
    }

    fn is_linked(&self, element: ElementId) -> bool {
        self.elements.get(&element).map(|s| s.linked).unwrap_or(false)
    }

    fn type_of(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(&element).and_then(|s| s.type_id)
    }

    fn parameter_names(&self, element: ElementId, filter: ParamFilter) -> Vec<ParamName> {
        match self.elements.get(&element) {
            // Las claves del BTreeMap ya vienen en orden alfabético.
            Some(state) => state
                .params
                .iter()
                .filter(|(_, cell)| match filter {
                    ParamFilter::All => true,
                    ParamFilter::Writable => !cell.read_only,
                })
                .map(|(name, _)| name.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    fn slot(&self, element: ElementId, name: &ParamName) -> Option<ParamSlot> {
        self.elements
            .get(&element)
            .and_then(|state| state.params.get(name))
            .map(|cell| ParamSlot { kind: cell.kind, read_only: cell.read_only })
    }

    fn text_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<String>, HostError> {
        Ok(self.read_cell(element, name)?.and_then(|cell| match &cell.value {
            Some(ParamValue::Text(s)) => Some(s.clone()),
            _ => None,
        }))
    }

    fn reference_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<ElementId>, HostError> {
        Ok(self.read_cell(element, name)?.and_then(|cell| match cell.value {
            Some(ParamValue::Reference(id)) => Some(id),
            _ => None,
        }))
    }

    fn integer_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<i64>, HostError> {
        Ok(self.read_cell(element, name)?.and_then(|cell| match cell.value {
            Some(ParamValue::Integer(n)) => Some(n),
            _ => None,
        }))
    }

    fn real_value(&self, element: ElementId, name: &ParamName) -> Result<Option<f64>, HostError> {
        Ok(self.read_cell(element, name)?.and_then(|cell| match cell.value {
            Some(ParamValue::Real(x)) => Some(x),
            _ => None,
        }))
    }

    fn set_text(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: &str,
    ) -> Result<(), WriteError> {
        let cell = self.writable_cell(element, name, StorageKind::Text)?;
        cell.value = Some(ParamValue::Text(value.to_string()));
        Ok(())
    }

    fn set_reference(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: ElementId,
    ) -> Result<(), WriteError> {
        let cell = self.writable_cell(element, name, StorageKind::Reference)?;
        cell.value = Some(ParamValue::Reference(value));
        Ok(())
    }

    fn set_integer(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: i64,
    ) -> Result<(), WriteError> {
        let cell = self.writable_cell(element, name, StorageKind::Integer)?;
        cell.value = Some(ParamValue::Integer(value));
        Ok(())
    }

    fn set_real(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: f64,
    ) -> Result<(), WriteError> {
        let cell = self.writable_cell(element, name, StorageKind::Real)?;
        cell.value = Some(ParamValue::Real(value));
        Ok(())
    }

    fn elements_with_nonempty(&self, name: &ParamName) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, state)| !state.linked)
            .filter(|(_, state)| {
                matches!(
                    state.params.get(name).and_then(|cell| cell.value.as_ref()),
                    Some(ParamValue::Text(s)) if !s.is_empty()
                )
            })
            .map(|(&id, _)| id)
            .collect()
    }
}

impl Transactional for InMemoryDocument {
    fn begin(&mut self, label: &str) -> Result<(), HostError> {
        if self.tx.started {
            return Err(HostError::TransactionAlreadyStarted);
        }
        self.tx.backup = Some(self.elements.clone());
        self.tx.label = Some(label.to_string());
        self.tx.started = true;
        self.tx.ended = false;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), HostError> {
        if !self.tx.started {
            return Err(HostError::NoActiveTransaction);
        }
        self.tx.backup = None;
        self.tx.started = false;
        self.tx.ended = true;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), HostError> {
        if !self.tx.started {
            return Err(HostError::NoActiveTransaction);
        }
        if let Some(backup) = self.tx.backup.take() {
            self.elements = backup;
        }
        self.tx.started = false;
        self.tx.ended = true;
        Ok(())
    }

    fn has_started(&self) -> bool {
        self.tx.started
    }

    fn has_ended(&self) -> bool {
        self.tx.ended
    }
}

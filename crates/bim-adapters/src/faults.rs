//! Inyección de fallos del anfitrión.
//!
//! `FailingDocument` envuelve cualquier documento y hace fallar la n-ésima
//! escritura con un error interno del anfitrión. Sirve para ejercitar la
//! atomicidad del lote: el motor debe revertir todo lo escrito antes del
//! fallo.

use bim_core::{HostError, ParamFilter, ParamSlot, ParameterStore, Transactional, WriteError};
use bim_domain::{CategoryLabel, ElementId, ParamName};

pub struct FailingDocument<D> {
    inner: D,
    fail_on_write: Option<u32>,
    writes_seen: u32,
}

impl<D> FailingDocument<D> {
    pub fn new(inner: D) -> Self {
        FailingDocument { inner, fail_on_write: None, writes_seen: 0 }
    }

    /// Programa un fallo interno en la n-ésima escritura (base 1). El fallo
    /// ocurre antes de aplicar el valor.
    pub fn fail_on_write(mut self, nth: u32) -> Self {
        self.fail_on_write = Some(nth);
        self
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    fn bump(&mut self) -> Result<(), WriteError> {
        self.writes_seen += 1;
        if self.fail_on_write == Some(self.writes_seen) {
            return Err(WriteError::Host(HostError::Internal(format!(
                "fallo inyectado en la escritura {}",
                self.writes_seen
            ))));
        }
        Ok(())
    }
}

impl<D: ParameterStore> ParameterStore for FailingDocument<D> {
    fn contains(&self, element: ElementId) -> bool {
        self.inner.contains(element)
    }

    fn category(&self, element: ElementId) -> CategoryLabel {
        self.inner.category(element)
    }

    fn is_linked(&self, element: ElementId) -> bool {
        self.inner.is_linked(element)
    }

    fn type_of(&self, element: ElementId) -> Option<ElementId> {
        self.inner.type_of(element)
    }

    fn parameter_names(&self, element: ElementId, filter: ParamFilter) -> Vec<ParamName> {
        self.inner.parameter_names(element, filter)
    }

    fn slot(&self, element: ElementId, name: &ParamName) -> Option<ParamSlot> {
        self.inner.slot(element, name)
    }

    fn text_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<String>, HostError> {
        self.inner.text_value(element, name)
    }

    fn reference_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<ElementId>, HostError> {
        self.inner.reference_value(element, name)
    }

    fn integer_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<i64>, HostError> {
        self.inner.integer_value(element, name)
    }

    fn real_value(&self, element: ElementId, name: &ParamName) -> Result<Option<f64>, HostError> {
        self.inner.real_value(element, name)
    }

    fn set_text(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: &str,
    ) -> Result<(), WriteError> {
        self.bump()?;
        self.inner.set_text(element, name, value)
    }

    fn set_reference(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: ElementId,
    ) -> Result<(), WriteError> {
        self.bump()?;
        self.inner.set_reference(element, name, value)
    }

    fn set_integer(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: i64,
    ) -> Result<(), WriteError> {
        self.bump()?;
        self.inner.set_integer(element, name, value)
    }

    fn set_real(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: f64,
    ) -> Result<(), WriteError> {
        self.bump()?;
        self.inner.set_real(element, name, value)
    }

    fn elements_with_nonempty(&self, name: &ParamName) -> Vec<ElementId> {
        self.inner.elements_with_nonempty(name)
    }
}

impl<D: Transactional> Transactional for FailingDocument<D> {
    fn begin(&mut self, label: &str) -> Result<(), HostError> {
        self.inner.begin(label)
    }

    fn commit(&mut self) -> Result<(), HostError> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<(), HostError> {
        self.inner.rollback()
    }

    fn has_started(&self) -> bool {
        self.inner.has_started()
    }

    fn has_ended(&self) -> bool {
        self.inner.has_ended()
    }
}

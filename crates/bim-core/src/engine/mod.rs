//! Módulo del motor de transferencia.
//!
//! Expone el motor y los tipos que participan de una invocación completa:
//! journal, reporte y solicitud.

pub mod core;

pub use core::TransferEngine;

pub use crate::journal::{EventJournal, InMemoryJournal, TransferEvent, TransferEventKind};
pub use crate::report::TransferReport;
pub use crate::request::{TransferMode, TransferRequest, TransferScope};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{HostError, TransferError, WriteError};
    use crate::host::store::{ParamFilter, ParamSlot, ParameterStore};
    use crate::host::transaction::Transactional;
    use bim_domain::{CategoryLabel, ElementId, ParamName};

    // Documento vacío de ejemplo: no conoce ningún elemento y registra el
    // ciclo transaccional. Suficiente para los caminos de aborto; los
    // recorridos completos viven en tests/ sobre el documento de memoria.
    #[derive(Default)]
    struct EmptyDoc {
        started: bool,
        ended: bool,
    }

    impl ParameterStore for EmptyDoc {
        fn contains(&self, _element: ElementId) -> bool {
            false
        }
        fn category(&self, _element: ElementId) -> CategoryLabel {
            CategoryLabel::Missing
        }
        fn is_linked(&self, _element: ElementId) -> bool {
            false
        }
        fn type_of(&self, _element: ElementId) -> Option<ElementId> {
            None
        }
        fn parameter_names(&self, _element: ElementId, _filter: ParamFilter) -> Vec<ParamName> {
            Vec::new()
        }
        fn slot(&self, _element: ElementId, _name: &ParamName) -> Option<ParamSlot> {
            None
        }
        fn text_value(
            &self,
            element: ElementId,
            _name: &ParamName,
        ) -> Result<Option<String>, HostError> {
            Err(HostError::UnknownElement(element))
        }
        fn reference_value(
            &self,
            element: ElementId,
            _name: &ParamName,
        ) -> Result<Option<ElementId>, HostError> {
            Err(HostError::UnknownElement(element))
        }
        fn integer_value(
            &self,
            element: ElementId,
            _name: &ParamName,
        ) -> Result<Option<i64>, HostError> {
            Err(HostError::UnknownElement(element))
        }
        fn real_value(
            &self,
            element: ElementId,
            _name: &ParamName,
        ) -> Result<Option<f64>, HostError> {
            Err(HostError::UnknownElement(element))
        }
        fn set_text(
            &mut self,
            _element: ElementId,
            _name: &ParamName,
            _value: &str,
        ) -> Result<(), WriteError> {
            Err(WriteError::NotFound)
        }
        fn set_reference(
            &mut self,
            _element: ElementId,
            _name: &ParamName,
            _value: ElementId,
        ) -> Result<(), WriteError> {
            Err(WriteError::NotFound)
        }
        fn set_integer(
            &mut self,
            _element: ElementId,
            _name: &ParamName,
            _value: i64,
        ) -> Result<(), WriteError> {
            Err(WriteError::NotFound)
        }
        fn set_real(
            &mut self,
            _element: ElementId,
            _name: &ParamName,
            _value: f64,
        ) -> Result<(), WriteError> {
            Err(WriteError::NotFound)
        }
        fn elements_with_nonempty(&self, _name: &ParamName) -> Vec<ElementId> {
            Vec::new()
        }
    }

    impl Transactional for EmptyDoc {
        fn begin(&mut self, _label: &str) -> Result<(), HostError> {
            if self.started {
                return Err(HostError::TransactionAlreadyStarted);
            }
            self.started = true;
            self.ended = false;
            Ok(())
        }
        fn commit(&mut self) -> Result<(), HostError> {
            if !self.started {
                return Err(HostError::NoActiveTransaction);
            }
            self.started = false;
            self.ended = true;
            Ok(())
        }
        fn rollback(&mut self) -> Result<(), HostError> {
            if !self.started {
                return Err(HostError::NoActiveTransaction);
            }
            self.started = false;
            self.ended = true;
            Ok(())
        }
        fn has_started(&self) -> bool {
            self.started
        }
        fn has_ended(&self) -> bool {
            self.ended
        }
    }

    fn name(raw: &str) -> ParamName {
        ParamName::new(raw).unwrap()
    }

    #[test]
    fn test_origen_inexistente_aborta_sin_transaccion() {
        let mut engine = TransferEngine::new(EmptyDoc::default());
        let request = TransferRequest::fan_out(
            "Copy Parameters",
            TransferScope::Instance,
            ElementId::new(1),
            vec![ElementId::new(2)],
            name("Comments"),
            vec![name("Mark")],
        )
        .unwrap();

        let err = engine.run_transfer(&request).unwrap_err();
        assert!(matches!(err, TransferError::InvalidSelection { .. }));
        // Nunca se llegó a abrir transacción.
        assert!(!engine.document().has_started());
        assert!(!engine.document().has_ended());
        assert_eq!(engine.event_variants().unwrap(), vec!["I", "A"]);
    }

    #[test]
    fn test_lote_sin_destinos_aborta() {
        let mut engine = TransferEngine::new(EmptyDoc::default());
        let id = engine.open_invocation("Copy Parameters", TransferScope::Instance, &[name("Mark")]);
        let cached = vec![(name("Mark"), bim_domain::ParamValue::Text("x".into()))];

        let err = engine
            .apply_writes(id, &[], TransferScope::Instance, &cached, "Copy Parameters")
            .unwrap_err();
        assert_eq!(err, TransferError::EmptyRequest);
        assert_eq!(engine.event_variants().unwrap(), vec!["I", "A"]);
        assert!(!engine.document().has_ended());
    }

    #[test]
    fn test_abort_devuelve_el_mismo_error() {
        let mut engine = TransferEngine::new(EmptyDoc::default());
        let id = engine.open_invocation("Copy Parameters", TransferScope::Instance, &[name("Mark")]);
        let err = engine.abort(id, TransferError::Cancelled);
        assert_eq!(err, TransferError::Cancelled);
        let snap = engine.snapshot().unwrap();
        assert_eq!(snap.error, Some(TransferError::Cancelled));
    }
}

//! Accesor de parámetros consciente de la clase de almacenamiento.
//!
//! Toda lectura y escritura del motor pasa por aquí. El accesor inspecciona
//! el slot del parámetro y despacha al getter o setter de su clase con un
//! match exhaustivo sobre [`StorageKind`]; no hay coerción entre clases. Un
//! valor `Real` jamás se escribe en un slot `Text`: esa escritura se
//! rechaza como incompatible y queda contada en el reporte.

use bim_domain::{ElementId, ParamName, ParamValue, StorageKind};

use crate::errors::{HostError, WriteError};
use crate::host::store::ParameterStore;
use crate::report::FailureReason;
use crate::request::TransferScope;

/// Lectura de un parámetro de origen: el valor (si lo hay) y la clase del
/// slot. La clase se informa incluso cuando el valor está ausente, para que
/// el invocador pueda decidir qué hacer con un parámetro sin asignar.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReading {
    pub value: Option<ParamValue>,
    pub kind: StorageKind,
}

/// Fallo de lectura sobre el origen.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadFailure {
    /// El parámetro no existe en el elemento resuelto.
    Missing,
    /// Alcance de tipo sobre una instancia sin elemento de tipo.
    NoTypeElement,
    /// Fallo del anfitrión: siempre fatal.
    Fatal(HostError),
}

/// Fallo de escritura sobre un destino, ya clasificado por destino final:
/// `Local` se acumula en el reporte, `Fatal` aborta el lote con rollback.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteFailure {
    Local(FailureReason),
    Fatal(HostError),
}

/// Resuelve el elemento sujeto según el alcance: la instancia misma o su
/// elemento de tipo.
fn resolve_scope<D: ParameterStore + ?Sized>(
    store: &D,
    element: ElementId,
    scope: TransferScope,
) -> Option<ElementId> {
    match scope {
        TransferScope::Instance => Some(element),
        TransferScope::Type => store.type_of(element),
    }
}

/// Lee el parámetro `name` del elemento bajo el alcance dado.
pub fn read<D: ParameterStore + ?Sized>(
    store: &D,
    element: ElementId,
    scope: TransferScope,
    name: &ParamName,
) -> Result<SourceReading, ReadFailure> {
    let subject = resolve_scope(store, element, scope).ok_or(ReadFailure::NoTypeElement)?;
    let slot = store.slot(subject, name).ok_or(ReadFailure::Missing)?;
    let value = match slot.kind {
        StorageKind::Text => store
            .text_value(subject, name)
            .map_err(ReadFailure::Fatal)?
            .map(ParamValue::Text),
        StorageKind::Reference => store
            .reference_value(subject, name)
            .map_err(ReadFailure::Fatal)?
            .map(ParamValue::Reference),
        StorageKind::Integer => store
            .integer_value(subject, name)
            .map_err(ReadFailure::Fatal)?
            .map(ParamValue::Integer),
        StorageKind::Real => store
            .real_value(subject, name)
            .map_err(ReadFailure::Fatal)?
            .map(ParamValue::Real),
    };
    Ok(SourceReading { value, kind: slot.kind })
}

/// Escribe `value` en el parámetro `name` del elemento bajo el alcance
/// dado. La verificación de clase ocurre antes de tocar el setter; el
/// rechazo del propio setter se reclasifica por si la implementación es más
/// estricta que el slot.
pub fn write<D: ParameterStore + ?Sized>(
    store: &mut D,
    element: ElementId,
    scope: TransferScope,
    name: &ParamName,
    value: &ParamValue,
) -> Result<(), WriteFailure> {
    let subject = match resolve_scope(store, element, scope) {
        Some(s) => s,
        None => return Err(WriteFailure::Local(FailureReason::NoTypeElement)),
    };
    let slot = match store.slot(subject, name) {
        Some(s) => s,
        None => return Err(WriteFailure::Local(FailureReason::Missing)),
    };
    if slot.read_only {
        return Err(WriteFailure::Local(FailureReason::ReadOnly));
    }
    if slot.kind != value.kind() {
        return Err(WriteFailure::Local(FailureReason::KindMismatch));
    }
    let outcome = match value {
        ParamValue::Text(s) => store.set_text(subject, name, s),
        ParamValue::Reference(id) => store.set_reference(subject, name, *id),
        ParamValue::Integer(n) => store.set_integer(subject, name, *n),
        ParamValue::Real(x) => store.set_real(subject, name, *x),
    };
    outcome.map_err(|e| match e {
        WriteError::NotFound => WriteFailure::Local(FailureReason::Missing),
        WriteError::KindMismatch { .. } => WriteFailure::Local(FailureReason::KindMismatch),
        WriteError::ReadOnly => WriteFailure::Local(FailureReason::ReadOnly),
        WriteError::LinkedElement => WriteFailure::Local(FailureReason::Linked),
        WriteError::Host(h) => WriteFailure::Fatal(h),
    })
}

//! Contrato transaccional del documento y guard RAII de lote.
//!
//! Una invocación del motor abre exactamente una transacción. Todas las
//! escrituras del lote viven dentro de ella y sólo hay dos salidas: commit
//! explícito o rollback. No existe un estado intermedio observable.

use crate::errors::HostError;

/// Alcance transaccional del documento anfitrión.
pub trait Transactional {
    /// Abre una transacción con la etiqueta dada. Falla si ya hay una
    /// activa: el motor no anida transacciones.
    fn begin(&mut self, label: &str) -> Result<(), HostError>;

    /// Confirma la transacción activa y publica sus escrituras.
    fn commit(&mut self) -> Result<(), HostError>;

    /// Revierte la transacción activa y descarta sus escrituras.
    fn rollback(&mut self) -> Result<(), HostError>;

    /// ¿Hay una transacción abierta sin cerrar?
    fn has_started(&self) -> bool;

    /// ¿Terminó la última transacción (por commit o rollback)?
    fn has_ended(&self) -> bool;
}

/// Guard RAII sobre una transacción del documento.
///
/// Invariante: toda salida del alcance que no pase por [`commit`] revierte
/// la transacción, incluido un panic del llamador. El resultado del
/// rollback de emergencia se descarta: en ese punto ya se está propagando
/// un error más informativo.
///
/// [`commit`]: TransactionGuard::commit
pub struct TransactionGuard<'a, D: Transactional> {
    doc: &'a mut D,
    committed: bool,
}

impl<'a, D: Transactional> TransactionGuard<'a, D> {
    /// Abre la transacción y devuelve el guard que la custodia.
    pub fn begin(doc: &'a mut D, label: &str) -> Result<Self, HostError> {
        doc.begin(label)?;
        Ok(Self { doc, committed: false })
    }

    /// Acceso al documento mientras la transacción sigue abierta.
    pub fn doc(&mut self) -> &mut D {
        self.doc
    }

    /// Confirma la transacción y desarma el rollback del guard.
    pub fn commit(mut self) -> Result<(), HostError> {
        self.doc.commit()?;
        self.committed = true;
        Ok(())
    }
}

impl<D: Transactional> Drop for TransactionGuard<'_, D> {
    fn drop(&mut self) {
        if !self.committed && self.doc.has_started() {
            let _ = self.doc.rollback();
        }
    }
}

//! Solicitud de transferencia: qué leer, dónde escribir, bajo qué alcance.
//!
//! Una solicitud es efímera: se construye, se ejecuta y se descarta. No se
//! persiste nunca; lo que sobrevive de una invocación son sus eventos en el
//! journal y el reporte devuelto.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use bim_domain::{ElementId, ParamName};

use crate::errors::TransferError;

/// Alcance de lectura y escritura de la transferencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferScope {
    /// Opera sobre los parámetros de la instancia seleccionada.
    Instance,
    /// Opera sobre los parámetros del elemento de tipo de cada instancia.
    Type,
}

impl fmt::Display for TransferScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferScope::Instance => f.write_str("instance"),
            TransferScope::Type => f.write_str("type"),
        }
    }
}

/// Forma de la transferencia.
///
/// Los nombres se guardan como conjuntos ordenados: conservan el orden de
/// llegada y descartan duplicados, de modo que cada parámetro se escriba a
/// lo sumo una vez por elemento destino.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferMode {
    /// Lee un único parámetro y reparte su valor entre varios nombres de
    /// escritura. La falta o vacío del parámetro de lectura es fatal.
    FanOut {
        read: ParamName,
        write: IndexSet<ParamName>,
    },
    /// Copia cada nombre 1:1 del origen a los destinos. Los nombres
    /// ilegibles en el origen se omiten sin abortar.
    Mirror { names: IndexSet<ParamName> },
}

/// Solicitud completa, lista para ejecutar en una sola transacción.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub label: String,
    pub scope: TransferScope,
    pub source: ElementId,
    pub targets: Vec<ElementId>,
    pub mode: TransferMode,
}

impl TransferRequest {
    /// Solicitud de abanico: un parámetro de lectura, varios de escritura.
    pub fn fan_out(
        label: impl Into<String>,
        scope: TransferScope,
        source: ElementId,
        targets: Vec<ElementId>,
        read: ParamName,
        write: impl IntoIterator<Item = ParamName>,
    ) -> Result<Self, TransferError> {
        let write: IndexSet<ParamName> = write.into_iter().collect();
        if write.is_empty() || targets.is_empty() {
            return Err(TransferError::EmptyRequest);
        }
        Ok(TransferRequest {
            label: label.into(),
            scope,
            source,
            targets,
            mode: TransferMode::FanOut { read, write },
        })
    }

    /// Solicitud espejo: los mismos nombres se leen y se escriben.
    pub fn mirror(
        label: impl Into<String>,
        scope: TransferScope,
        source: ElementId,
        targets: Vec<ElementId>,
        names: impl IntoIterator<Item = ParamName>,
    ) -> Result<Self, TransferError> {
        let names: IndexSet<ParamName> = names.into_iter().collect();
        if names.is_empty() || targets.is_empty() {
            return Err(TransferError::EmptyRequest);
        }
        Ok(TransferRequest {
            label: label.into(),
            scope,
            source,
            targets,
            mode: TransferMode::Mirror { names },
        })
    }

    /// Nombres del lado de escritura, en el orden de la solicitud.
    pub fn write_names(&self) -> Vec<ParamName> {
        match &self.mode {
            TransferMode::FanOut { write, .. } => write.iter().cloned().collect(),
            TransferMode::Mirror { names } => names.iter().cloned().collect(),
        }
    }
}

//! Valores de parámetro etiquetados por su clase de almacenamiento.
//!
//! Rol en el flujo:
//! - El accesor inspecciona la clase del parámetro en el origen y extrae el
//!   valor con el accesor propio de esa clase.
//! - La clase queda fijada en el valor leído y restringe qué escritura es
//!   legal sobre el destino: no existe coerción entre clases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ElementId;

/// Clase de almacenamiento de un parámetro: determina el accesor legal para
/// leerlo o escribirlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageKind {
    Text,
    Reference,
    Integer,
    Real,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StorageKind::Text => "text",
            StorageKind::Reference => "reference",
            StorageKind::Integer => "integer",
            StorageKind::Real => "real",
        };
        f.write_str(label)
    }
}

/// Valor leído de un parámetro, etiquetado por su clase.
///
/// Invariante: la clase es inmutable una vez construido el valor. Un `Real`
/// se conserva en la unidad interna del documento anfitrión (no hay
/// conversión de unidades).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Text(String),
    Reference(ElementId),
    Integer(i64),
    Real(f64),
}

impl ParamValue {
    pub fn kind(&self) -> StorageKind {
        match self {
            ParamValue::Text(_) => StorageKind::Text,
            ParamValue::Reference(_) => StorageKind::Reference,
            ParamValue::Integer(_) => StorageKind::Integer,
            ParamValue::Real(_) => StorageKind::Real,
        }
    }

    /// Sólo un texto vacío cuenta como "sin valor": las demás clases siempre
    /// portan un valor concreto (cero y el id nulo son valores legítimos).
    pub fn is_empty(&self) -> bool {
        matches!(self, ParamValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Reference(id) => write!(f, "#{id}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Real(r) => write!(f, "{r}"),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador opaco de un elemento del documento anfitrión.
///
/// El motor nunca interpreta el valor: sólo lo usa como clave estable para
/// localizar el elemento al leer o escribir parámetros. El documento real
/// expone ids enteros con signo, por eso se conserva el entero crudo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(i64);

impl ElementId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ElementId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

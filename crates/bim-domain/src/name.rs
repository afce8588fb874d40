use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Nombre de un parámetro del documento.
///
/// No se garantiza que el nombre exista en todos los elementos: la resolución
/// ocurre recién al leer/escribir contra el store. La validación aquí es
/// mínima porque los nombres son opacos para el motor; sólo un nombre vacío
/// (tras recortar espacios) se rechaza, ya que nunca identifica nada.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamName(String);

impl ParamName {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "el nombre de parámetro no puede estar vacío".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

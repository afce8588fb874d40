//! Errores de configuración.
//! Cada caso fatal del archivo (ausente, vacío, JSON inválido, sin
//! parámetros) conserva su propio mensaje de cara al usuario.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no existe el archivo de configuración '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("el archivo de configuración '{}' está vacío", .0.display())]
    Empty(PathBuf),
    #[error("el archivo de configuración contiene JSON inválido: {0}")]
    Invalid(String),
    #[error("la configuración no define ningún parámetro")]
    NoParameters,
    #[error("error de E/S sobre la configuración: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

//! bim-persistence
//!
//! Persistencia de la configuración de transferencia en archivos JSON
//! locales. Conserva las dos formas de archivo ya establecidas: el par
//! lectura/escritura como objeto y el conjunto espejo como arreglo plano,
//! de modo que un archivo existente siga siendo válido tal cual.
//!
//! Módulos:
//! - `file`: almacén sobre el sistema de archivos (lectura estricta,
//!   escritura en dos pasos).
//! - `config`: resolución de rutas desde variables de entorno / .env.
//! - `error`: errores semánticos de configuración.

pub mod config;
pub mod error;
pub mod file;

pub use config::{init_dotenv, StorePaths};
pub use error::ConfigError;
pub use file::{FileConfigStore, MirrorConfig, PairConfig};

//! Resolución de rutas de configuración desde variables de entorno.
//! Usa convención `BIMFLOW_PAIR_CONFIG` / `BIMFLOW_MIRROR_CONFIG` con
//! valores por defecto en el directorio de trabajo.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

const DEFAULT_PAIR_PATH: &str = "config.json";
const DEFAULT_MIRROR_PATH: &str = "params.json";

/// Rutas de los dos archivos de configuración.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub pair_path: PathBuf,
    pub mirror_path: PathBuf,
}

impl StorePaths {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let pair_path = env::var("BIMFLOW_PAIR_CONFIG")
            .unwrap_or_else(|_| DEFAULT_PAIR_PATH.to_string())
            .into();
        let mirror_path = env::var("BIMFLOW_MIRROR_CONFIG")
            .unwrap_or_else(|_| DEFAULT_MIRROR_PATH.to_string())
            .into();
        StorePaths { pair_path, mirror_path }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

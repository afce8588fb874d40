//! Almacén de configuración sobre archivos JSON.
//!
//! Dos formas conviven, cada una en su propio archivo:
//! - par lectura/escritura: objeto `{"read_param": ..., "write_param": [...]}`.
//! - conjunto espejo: arreglo plano de nombres `["Mark", ...]`.
//!
//! La lectura es estricta: archivo ausente, vacío, con JSON inválido o sin
//! parámetros son fallos fatales distintos, nunca un valor por defecto
//! silencioso. El par por defecto existe pero sólo se materializa con
//! [`FileConfigStore::seed_pair`], una acción explícita del invocador.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use bim_domain::ParamName;

use crate::error::ConfigError;

/// Par de lectura/escritura persistido. Los campos replican el JSON
/// histórico para que los archivos existentes sigan cargando.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    pub read_param: String,
    pub write_param: Vec<String>,
}

impl Default for PairConfig {
    fn default() -> Self {
        PairConfig {
            read_param: "Comments".into(),
            write_param: vec!["Mark".into()],
        }
    }
}

impl PairConfig {
    /// Valida y convierte a nombres de dominio.
    pub fn names(&self) -> Result<(ParamName, Vec<ParamName>), ConfigError> {
        if self.write_param.is_empty() {
            return Err(ConfigError::NoParameters);
        }
        let read = parse(&self.read_param)?;
        let mut write = Vec::with_capacity(self.write_param.len());
        for raw in &self.write_param {
            write.push(parse(raw)?);
        }
        Ok((read, write))
    }
}

/// Conjunto espejo persistido como arreglo JSON plano.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorConfig(pub Vec<String>);

impl MirrorConfig {
    pub fn names(&self) -> Result<Vec<ParamName>, ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::NoParameters);
        }
        let mut names = Vec::with_capacity(self.0.len());
        for raw in &self.0 {
            names.push(parse(raw)?);
        }
        Ok(names)
    }
}

impl From<Vec<ParamName>> for MirrorConfig {
    fn from(names: Vec<ParamName>) -> Self {
        MirrorConfig(names.into_iter().map(|n| n.to_string()).collect())
    }
}

fn parse(raw: &str) -> Result<ParamName, ConfigError> {
    ParamName::new(raw).map_err(|e| ConfigError::Invalid(e.to_string()))
}

/// Almacén sobre un archivo concreto del sistema de archivos.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_pair(&self) -> Result<PairConfig, ConfigError> {
        let raw = self.read_raw()?;
        let config: PairConfig = serde_json::from_str(&raw)?;
        debug!(
            "par leído de {}: '{}' -> {:?}",
            self.path.display(),
            config.read_param,
            config.write_param
        );
        Ok(config)
    }

    pub fn save_pair(&self, config: &PairConfig) -> Result<(), ConfigError> {
        self.write_atomic(&serde_json::to_string_pretty(config)?)
    }

    pub fn load_mirror(&self) -> Result<MirrorConfig, ConfigError> {
        let raw = self.read_raw()?;
        let config: MirrorConfig = serde_json::from_str(&raw)?;
        debug!("conjunto leído de {}: {:?}", self.path.display(), config.0);
        Ok(config)
    }

    pub fn save_mirror(&self, config: &MirrorConfig) -> Result<(), ConfigError> {
        self.write_atomic(&serde_json::to_string_pretty(config)?)
    }

    /// Crea el archivo con el par por defecto si aún no existe y devuelve
    /// el par vigente.
    pub fn seed_pair(&self) -> Result<PairConfig, ConfigError> {
        if self.path.exists() {
            return self.load_pair();
        }
        let config = PairConfig::default();
        warn!(
            "sin configuración en {}: se escribe el par por defecto",
            self.path.display()
        );
        self.save_pair(&config)?;
        Ok(config)
    }

    fn read_raw(&self) -> Result<String, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Err(ConfigError::Empty(self.path.clone()));
        }
        Ok(raw)
    }

    // Escritura en dos pasos para no dejar nunca un archivo a medias.
    fn write_atomic(&self, json: &str) -> Result<(), ConfigError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

//! Contrato de selección interactiva.
//!
//! Los flujos piden elementos y opciones al usuario a través de este trait.
//! Cancelar un prompt no es un fallo del sistema: produce
//! [`SelectionError::Cancelled`] y el flujo termina sin abrir transacción.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bim_domain::ElementId;

use super::store::ParameterStore;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionError {
    #[error("selección cancelada por el usuario")]
    Cancelled,
}

/// Prompts de selección del anfitrión.
pub trait SelectionProvider {
    /// Pide un único elemento al usuario.
    fn pick_one(&mut self, prompt: &str) -> Result<ElementId, SelectionError>;

    /// Pide un conjunto de elementos. Puede devolver un vector vacío si el
    /// usuario confirma sin seleccionar nada; decidir qué hacer con eso es
    /// responsabilidad del flujo.
    fn pick_many(&mut self, prompt: &str) -> Result<Vec<ElementId>, SelectionError>;

    /// Pide elegir entre opciones de texto. Con `multi` en falso se espera
    /// a lo sumo una opción en la respuesta.
    fn choose(
        &mut self,
        prompt: &str,
        options: &[String],
        multi: bool,
    ) -> Result<Vec<String>, SelectionError>;
}

/// Filtro que los flujos aplican sobre lo seleccionado.
///
/// El filtrado ocurre después del pick, contra el store: el contrato de
/// selección no sabe distinguir elementos vinculados por sí mismo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFilter {
    /// Cualquier elemento del documento.
    Any,
    /// Excluye elementos provenientes de vínculos (destinos de escritura).
    ExcludeLinked,
    /// Sólo elementos provenientes de vínculos (orígenes de lectura remota).
    LinkedOnly,
}

impl SelectionFilter {
    pub fn allows<D: ParameterStore + ?Sized>(&self, store: &D, element: ElementId) -> bool {
        match self {
            SelectionFilter::Any => true,
            SelectionFilter::ExcludeLinked => !store.is_linked(element),
            SelectionFilter::LinkedOnly => store.is_linked(element),
        }
    }
}

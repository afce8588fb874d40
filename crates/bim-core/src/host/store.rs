//! Contrato de acceso a elementos y parámetros del documento.
//!
//! Los accesores de valor son específicos por clase de almacenamiento: el
//! anfitrión expone un getter y un setter por clase, y el accesor del motor
//! (módulo `access`) decide cuál usar tras inspeccionar el [`ParamSlot`].
//! Un getter invocado sobre un parámetro de otra clase devuelve `Ok(None)`;
//! un setter de clase equivocada devuelve [`WriteError::KindMismatch`]. La
//! asimetría es deliberada: leer de más no daña, escribir de más sí.

use bim_domain::{CategoryLabel, ElementId, ParamName};

use crate::errors::{HostError, WriteError};

/// Filtro para el listado de nombres de parámetros de un elemento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFilter {
    /// Todos los parámetros visibles del elemento.
    All,
    /// Sólo los modificables por el usuario.
    Writable,
}

/// Descriptor de un parámetro presente en un elemento.
///
/// La clase de almacenamiento de un slot es inmutable durante toda la vida
/// del elemento; el accesor confía en ella para elegir getter y setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSlot {
    pub kind: bim_domain::StorageKind,
    pub read_only: bool,
}

/// Acceso de sólo-contrato al documento anfitrión.
///
/// Garantías que toda implementación debe cumplir:
/// - `parameter_names` devuelve los nombres en orden alfabético ascendente.
/// - `category` devuelve [`CategoryLabel::Missing`] para elementos sin
///   categoría o inexistentes, nunca falla.
/// - los getters de valor distinguen elemento inexistente (`Err`) de
///   parámetro sin valor (`Ok(None)`).
/// - los setters sólo aceptan escrituras dentro de una transacción activa.
pub trait ParameterStore {
    /// ¿Existe el elemento en el documento?
    fn contains(&self, element: ElementId) -> bool;

    /// Etiqueta de categoría del elemento, para agrupar fallos del reporte.
    fn category(&self, element: ElementId) -> CategoryLabel;

    /// ¿Proviene el elemento de un documento vinculado? Los elementos
    /// vinculados se leen pero nunca se escriben.
    fn is_linked(&self, element: ElementId) -> bool;

    /// Elemento de tipo asociado a una instancia, si lo hay.
    fn type_of(&self, element: ElementId) -> Option<ElementId>;

    /// Nombres de parámetros del elemento según `filter`, orden alfabético.
    fn parameter_names(&self, element: ElementId, filter: ParamFilter) -> Vec<ParamName>;

    /// Descriptor del parámetro `name` en el elemento, o `None` si no existe.
    fn slot(&self, element: ElementId, name: &ParamName) -> Option<ParamSlot>;

    /// Valor textual de un parámetro de clase `Text`.
    fn text_value(&self, element: ElementId, name: &ParamName)
        -> Result<Option<String>, HostError>;

    /// Valor de referencia de un parámetro de clase `Reference`.
    fn reference_value(
        &self,
        element: ElementId,
        name: &ParamName,
    ) -> Result<Option<ElementId>, HostError>;

    /// Valor entero de un parámetro de clase `Integer`.
    fn integer_value(&self, element: ElementId, name: &ParamName)
        -> Result<Option<i64>, HostError>;

    /// Valor numérico de un parámetro de clase `Real`, en unidades internas
    /// del documento. El motor no convierte unidades.
    fn real_value(&self, element: ElementId, name: &ParamName) -> Result<Option<f64>, HostError>;

    fn set_text(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: &str,
    ) -> Result<(), WriteError>;

    fn set_reference(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: ElementId,
    ) -> Result<(), WriteError>;

    fn set_integer(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: i64,
    ) -> Result<(), WriteError>;

    fn set_real(
        &mut self,
        element: ElementId,
        name: &ParamName,
        value: f64,
    ) -> Result<(), WriteError>;

    /// Ids (orden ascendente) de los elementos no vinculados cuyo parámetro
    /// `name` es un texto no vacío. Colector de la limpieza masiva.
    fn elements_with_nonempty(&self, name: &ParamName) -> Vec<ElementId>;
}

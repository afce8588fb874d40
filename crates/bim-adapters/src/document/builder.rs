//! Construcción declarativa de documentos de fixture.

use std::collections::BTreeMap;

use bim_domain::{DomainError, ElementId, ParamName, ParamValue, StorageKind};

use super::{ElementState, InMemoryDocument, ParamCell};

/// Especificación de un elemento del documento. Los nombres de parámetro se
/// validan recién en [`DocumentBuilder::build`], para que el armado encadene
/// sin `Result` intermedios.
pub struct ElementSpec {
    id: ElementId,
    category: Option<String>,
    linked: bool,
    type_id: Option<ElementId>,
    params: Vec<(String, ParamCell)>,
}

impl ElementSpec {
    pub fn new(id: i64) -> Self {
        ElementSpec {
            id: ElementId::new(id),
            category: None,
            linked: false,
            type_id: None,
            params: Vec::new(),
        }
    }

    pub fn category(mut self, name: &str) -> Self {
        self.category = Some(name.to_string());
        self
    }

    /// Marca el elemento como proveniente de un documento vinculado.
    pub fn linked(mut self) -> Self {
        self.linked = true;
        self
    }

    /// Asocia la instancia a su elemento de tipo. El elemento de tipo se
    /// declara aparte, como cualquier otro elemento.
    pub fn with_type(mut self, type_id: i64) -> Self {
        self.type_id = Some(ElementId::new(type_id));
        self
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.cell(name, StorageKind::Text, false, Some(ParamValue::Text(value.to_string())))
    }

    /// Parámetro de texto presente pero sin valor asignado.
    pub fn unset_text(self, name: &str) -> Self {
        self.cell(name, StorageKind::Text, false, None)
    }

    pub fn read_only_text(self, name: &str, value: &str) -> Self {
        self.cell(name, StorageKind::Text, true, Some(ParamValue::Text(value.to_string())))
    }

    pub fn integer(self, name: &str, value: i64) -> Self {
        self.cell(name, StorageKind::Integer, false, Some(ParamValue::Integer(value)))
    }

    pub fn real(self, name: &str, value: f64) -> Self {
        self.cell(name, StorageKind::Real, false, Some(ParamValue::Real(value)))
    }

    pub fn reference(self, name: &str, target: i64) -> Self {
        self.cell(
            name,
            StorageKind::Reference,
            false,
            Some(ParamValue::Reference(ElementId::new(target))),
        )
    }

    /// Parámetro presente sin valor, de la clase indicada.
    pub fn unset(self, name: &str, kind: StorageKind) -> Self {
        self.cell(name, kind, false, None)
    }

    /// Forma general: clase, sólo-lectura y valor inicial a elección.
    pub fn param(
        self,
        name: &str,
        kind: StorageKind,
        read_only: bool,
        value: Option<ParamValue>,
    ) -> Self {
        self.cell(name, kind, read_only, value)
    }

    fn cell(
        mut self,
        name: &str,
        kind: StorageKind,
        read_only: bool,
        value: Option<ParamValue>,
    ) -> Self {
        self.params.push((name.to_string(), ParamCell { kind, read_only, value }));
        self
    }
}

/// Acumula especificaciones y arma el documento. Un nombre de parámetro
/// inválido (vacío) corta el armado con el error de dominio.
pub struct DocumentBuilder {
    specs: Vec<ElementSpec>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder { specs: Vec::new() }
    }

    pub fn element(mut self, spec: ElementSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn build(self) -> Result<InMemoryDocument, DomainError> {
        let mut doc = InMemoryDocument::default();
        for spec in self.specs {
            let mut params = BTreeMap::new();
            for (raw, cell) in spec.params {
                params.insert(ParamName::new(&raw)?, cell);
            }
            doc.insert_state(
                spec.id,
                ElementState {
                    category: spec.category,
                    linked: spec.linked,
                    type_id: spec.type_id,
                    params,
                },
            );
        }
        Ok(doc)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Etiqueta centinela para elementos sin categoría.
pub const NO_CATEGORY: &str = "N/A";

/// Categoría de un elemento tal como se agrupa en los reportes de fallo.
///
/// Un elemento puede no tener categoría en el documento anfitrión; esos casos
/// se reportan bajo el centinela `N/A` en lugar de abortar el conteo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryLabel {
    Named(String),
    Missing,
}

impl CategoryLabel {
    pub fn from_option(name: Option<&str>) -> Self {
        match name {
            Some(n) => CategoryLabel::Named(n.to_string()),
            None => CategoryLabel::Missing,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryLabel::Named(n) => n,
            CategoryLabel::Missing => NO_CATEGORY,
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

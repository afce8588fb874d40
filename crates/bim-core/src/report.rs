//! Reporte estructurado de una invocación de transferencia.
//!
//! Los fallos locales no interrumpen el lote: se acumulan aquí, agregados
//! por (parámetro, categoría del destino). El contador crece de a uno por
//! escritura rechazada; la razón registrada es la primera observada para
//! esa clave. Elementos sin categoría se agrupan bajo la etiqueta `N/A`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use bim_domain::{CategoryLabel, ParamName};

/// Razón por la que una escritura individual quedó sin aplicar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FailureReason {
    /// El parámetro no existe en el elemento destino.
    Missing,
    /// La clase de almacenamiento del destino no coincide con la del valor.
    KindMismatch,
    /// El parámetro existe pero es de sólo lectura.
    ReadOnly,
    /// El destino es una instancia sin elemento de tipo asociado.
    NoTypeElement,
    /// El destino proviene de un vínculo.
    Linked,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureReason::Missing => "no existe",
            FailureReason::KindMismatch => "clase incompatible",
            FailureReason::ReadOnly => "sólo lectura",
            FailureReason::NoTypeElement => "sin elemento de tipo",
            FailureReason::Linked => "elemento vinculado",
        };
        f.write_str(label)
    }
}

/// Clave de agregación de fallos: parámetro más categoría del destino.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FailureKey {
    pub param: ParamName,
    pub category: CategoryLabel,
}

/// Conteo de fallos de una clave, con la primera razón observada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureTally {
    pub count: u32,
    pub reason: FailureReason,
}

/// Resultado de un lote de escrituras.
///
/// `targets` es la cantidad de elementos destino del lote, `updated` los
/// que recibieron al menos una escritura efectiva y `writes` el total de
/// escrituras aplicadas (un elemento puede recibir varias).
#[derive(Debug, Clone, Default)]
pub struct TransferReport {
    pub failures: BTreeMap<FailureKey, FailureTally>,
    pub targets: usize,
    pub updated: usize,
    pub writes: usize,
}

impl TransferReport {
    pub fn new(targets: usize) -> Self {
        TransferReport { targets, ..Default::default() }
    }

    /// Suma un fallo a la clave (param, categoría). Conserva la razón de la
    /// primera observación; las siguientes sólo incrementan el contador.
    pub fn record_failure(
        &mut self,
        param: ParamName,
        category: CategoryLabel,
        reason: FailureReason,
    ) {
        let key = FailureKey { param, category };
        self.failures
            .entry(key)
            .and_modify(|t| t.count += 1)
            .or_insert(FailureTally { count: 1, reason });
    }

    /// ¿Terminó el lote sin ningún fallo local?
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total de escrituras rechazadas, sumado sobre todas las claves.
    pub fn failure_total(&self) -> u32 {
        self.failures.values().map(|t| t.count).sum()
    }

    /// Línea de resumen para la salida del invocador.
    pub fn summary_line(&self) -> String {
        format!(
            "{} de {} destino(s) actualizados, {} escritura(s), {} fallo(s)",
            self.updated,
            self.targets,
            self.writes,
            self.failure_total()
        )
    }
}

/// Una línea por parámetro con sus categorías afectadas. Un reporte limpio
/// no imprime nada.
impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current: Option<&ParamName> = None;
        for (key, tally) in &self.failures {
            if current != Some(&key.param) {
                if current.is_some() {
                    writeln!(f)?;
                }
                write!(f, "Parámetro '{}':", key.param)?;
                current = Some(&key.param);
            } else {
                write!(f, ";")?;
            }
            write!(
                f,
                " {} ({} objeto(s), {})",
                key.category, tally.count, tally.reason
            )?;
        }
        Ok(())
    }
}

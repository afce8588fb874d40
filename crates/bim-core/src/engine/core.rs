//! Motor de transferencia: coordina lectura del origen, lote transaccional
//! de escrituras y journal de la invocación.
//!
//! El motor es dueño del documento y del journal. Reglas del lote:
//! - una invocación abre a lo sumo una transacción, nunca anidada;
//! - los fallos locales de escritura se cuentan y el lote sigue;
//! - un lote con fallos locales igualmente confirma lo que sí escribió;
//! - un fallo del anfitrión revierte el lote completo.

use serde_json::json;
use uuid::Uuid;

use bim_domain::{ElementId, ParamName, ParamValue};

use crate::access::{self, ReadFailure, SourceReading, WriteFailure};
use crate::constants::ENGINE_VERSION;
use crate::errors::TransferError;
use crate::hashing;
use crate::host::store::ParameterStore;
use crate::host::transaction::{TransactionGuard, Transactional};
use crate::journal::replay::{replay, variants, InvocationSnapshot};
use crate::journal::store::{EventJournal, InMemoryJournal};
use crate::journal::types::{TransferEvent, TransferEventKind};
use crate::report::TransferReport;
use crate::request::{TransferMode, TransferRequest, TransferScope};

/// Motor de transferencia parametrizado por documento y journal.
pub struct TransferEngine<D, J>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
{
    document: D,
    journal: J,
    last_invocation: Option<Uuid>,
}

impl<D> TransferEngine<D, InMemoryJournal>
where
    D: ParameterStore + Transactional,
{
    /// Motor con journal en memoria, el arranque habitual.
    pub fn new(document: D) -> Self {
        Self::with_journal(document, InMemoryJournal::default())
    }
}

impl<D, J> TransferEngine<D, J>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
{
    pub fn with_journal(document: D, journal: J) -> Self {
        TransferEngine { document, journal, last_invocation: None }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }

    pub fn last_invocation(&self) -> Option<Uuid> {
        self.last_invocation
    }

    /// Eventos de la última invocación, en orden de append.
    pub fn events(&self) -> Vec<TransferEvent> {
        self.last_invocation
            .map(|id| self.journal.list(id))
            .unwrap_or_default()
    }

    /// Secuencia compacta de variantes de la última invocación.
    pub fn event_variants(&self) -> Option<Vec<&'static str>> {
        self.last_invocation.map(|id| variants(&self.journal.list(id)))
    }

    /// Estado reconstruido por replay de la última invocación.
    pub fn snapshot(&self) -> Option<InvocationSnapshot> {
        self.last_invocation.map(|id| replay(id, &self.journal.list(id)))
    }

    /// Abre una invocación y registra su evento inicial.
    pub fn open_invocation(
        &mut self,
        label: &str,
        scope: TransferScope,
        names: &[ParamName],
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.last_invocation = Some(id);
        self.journal.append_kind(
            id,
            TransferEventKind::InvocationStarted {
                label: label.to_string(),
                scope,
                names: names.to_vec(),
            },
        );
        id
    }

    /// Cierra la invocación sin haber abierto transacción, registrando el
    /// error terminal. Devuelve el mismo error para encadenar en `Err`.
    pub fn abort(&mut self, id: Uuid, error: TransferError) -> TransferError {
        self.journal
            .append_kind(id, TransferEventKind::Aborted { error: error.clone() });
        error
    }

    /// Lee el parámetro designado del origen y arma el caché de abanico:
    /// el mismo valor bajo cada nombre de escritura, sin duplicados. La
    /// falta o el vacío del parámetro de lectura abortan la invocación.
    pub fn cache_fan_out(
        &mut self,
        id: Uuid,
        source: ElementId,
        scope: TransferScope,
        read: &ParamName,
        write: &[ParamName],
    ) -> Result<Vec<(ParamName, ParamValue)>, TransferError> {
        let reading = match access::read(&self.document, source, scope, read) {
            Ok(r) => r,
            Err(ReadFailure::Missing) | Err(ReadFailure::NoTypeElement) => {
                let err = TransferError::SourceParameterMissing { name: read.clone() };
                return Err(self.abort(id, err));
            }
            Err(ReadFailure::Fatal(host)) => return Err(self.abort(id, host.into())),
        };
        let value = match reading.value {
            Some(v) if !v.is_empty() => v,
            _ => {
                let err = TransferError::SourceValueEmpty { name: read.clone() };
                return Err(self.abort(id, err));
            }
        };
        self.journal.append_kind(
            id,
            TransferEventKind::SourceRead { name: read.clone(), kind: reading.kind },
        );
        let mut seen = indexmap::IndexSet::new();
        for w in write {
            seen.insert(w.clone());
        }
        Ok(seen.into_iter().map(|w| (w, value.clone())).collect())
    }

    /// Lee cada nombre del conjunto espejo sobre el origen. Los nombres
    /// ilegibles o vacíos se omiten con su evento; si ninguno aporta valor
    /// la invocación aborta.
    pub fn cache_mirror(
        &mut self,
        id: Uuid,
        source: ElementId,
        scope: TransferScope,
        names: &[ParamName],
    ) -> Result<Vec<(ParamName, ParamValue)>, TransferError> {
        let mut seen = indexmap::IndexSet::new();
        for n in names {
            seen.insert(n.clone());
        }
        let mut cached = Vec::new();
        for name in seen {
            match access::read(&self.document, source, scope, &name) {
                Ok(SourceReading { value: Some(v), kind }) if !v.is_empty() => {
                    self.journal.append_kind(
                        id,
                        TransferEventKind::SourceRead { name: name.clone(), kind },
                    );
                    cached.push((name, v));
                }
                Ok(_) | Err(ReadFailure::Missing) | Err(ReadFailure::NoTypeElement) => {
                    self.journal
                        .append_kind(id, TransferEventKind::SourceSkipped { name });
                }
                Err(ReadFailure::Fatal(host)) => return Err(self.abort(id, host.into())),
            }
        }
        if cached.is_empty() {
            return Err(self.abort(id, TransferError::NothingToCopy));
        }
        Ok(cached)
    }

    /// Ejecuta el lote de escrituras dentro de una única transacción.
    ///
    /// El lote confirma siempre que el anfitrión no falle, haya o no
    /// fallos locales acumulados: lo escrito con éxito se publica y los
    /// rechazos quedan en el reporte. Un fallo del anfitrión en cualquier
    /// punto revierte todo, sin escrituras parciales visibles.
    pub fn apply_writes(
        &mut self,
        id: Uuid,
        targets: &[ElementId],
        scope: TransferScope,
        cached: &[(ParamName, ParamValue)],
        label: &str,
    ) -> Result<TransferReport, TransferError> {
        if targets.is_empty() || cached.is_empty() {
            return Err(self.abort(id, TransferError::EmptyRequest));
        }
        self.journal
            .append_kind(id, TransferEventKind::TargetsPicked { count: targets.len() });

        let mut report = TransferReport::new(targets.len());
        let mut guard = match TransactionGuard::begin(&mut self.document, label) {
            Ok(g) => g,
            Err(host) => {
                let err = TransferError::from(host);
                self.journal
                    .append_kind(id, TransferEventKind::Aborted { error: err.clone() });
                return Err(err);
            }
        };

        for &target in targets {
            let category = guard.doc().category(target);
            let mut touched = false;
            for (name, value) in cached {
                match access::write(guard.doc(), target, scope, name, value) {
                    Ok(()) => {
                        report.writes += 1;
                        touched = true;
                    }
                    Err(WriteFailure::Local(reason)) => {
                        report.record_failure(name.clone(), category.clone(), reason);
                        self.journal.append_kind(
                            id,
                            TransferEventKind::WriteFailed {
                                name: name.clone(),
                                category: category.clone(),
                                reason,
                            },
                        );
                    }
                    Err(WriteFailure::Fatal(host)) => {
                        // El guard revierte la transacción al soltarse.
                        drop(guard);
                        let err = TransferError::from(host);
                        self.journal
                            .append_kind(id, TransferEventKind::RolledBack { error: err.clone() });
                        return Err(err);
                    }
                }
            }
            if touched {
                report.updated += 1;
            }
        }

        let fingerprint = batch_fingerprint(label, scope, targets, cached);
        match guard.commit() {
            Ok(()) => {
                self.journal.append_kind(
                    id,
                    TransferEventKind::Committed {
                        updated: report.updated,
                        writes: report.writes,
                        fingerprint,
                    },
                );
                Ok(report)
            }
            Err(host) => {
                let err = TransferError::from(host);
                self.journal
                    .append_kind(id, TransferEventKind::RolledBack { error: err.clone() });
                Err(err)
            }
        }
    }

    /// Ejecuta una solicitud completa no interactiva: apertura, lectura
    /// del origen según el modo y lote de escrituras.
    pub fn run_transfer(
        &mut self,
        request: &TransferRequest,
    ) -> Result<TransferReport, TransferError> {
        let names = request.write_names();
        let id = self.open_invocation(&request.label, request.scope, &names);
        if !self.document.contains(request.source) {
            let err = TransferError::InvalidSelection {
                detail: format!("el elemento de origen {} no existe", request.source),
            };
            return Err(self.abort(id, err));
        }
        let cached = match &request.mode {
            TransferMode::FanOut { read, write } => {
                let write: Vec<ParamName> = write.iter().cloned().collect();
                self.cache_fan_out(id, request.source, request.scope, read, &write)?
            }
            TransferMode::Mirror { names } => {
                let names: Vec<ParamName> = names.iter().cloned().collect();
                self.cache_mirror(id, request.source, request.scope, &names)?
            }
        };
        self.apply_writes(id, &request.targets, request.scope, &cached, &request.label)
    }
}

/// Huella determinista del lote confirmado: versión del motor, etiqueta,
/// alcance, destinos y pares (nombre, valor). El timestamp queda fuera.
fn batch_fingerprint(
    label: &str,
    scope: TransferScope,
    targets: &[ElementId],
    cached: &[(ParamName, ParamValue)],
) -> String {
    let writes: Vec<serde_json::Value> = cached
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();
    let input = json!({
        "engine_version": ENGINE_VERSION,
        "label": label,
        "scope": scope,
        "targets": targets,
        "writes": writes,
    });
    hashing::hash_value(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> ParamName {
        ParamName::new(raw).unwrap()
    }

    #[test]
    fn test_huella_de_lote_es_determinista() {
        let targets = [ElementId::new(2), ElementId::new(3)];
        let cached = [(name("Mark"), ParamValue::Text("norte".into()))];
        let a = batch_fingerprint("Copy Parameters", TransferScope::Instance, &targets, &cached);
        let b = batch_fingerprint("Copy Parameters", TransferScope::Instance, &targets, &cached);
        assert_eq!(a, b);
    }

    #[test]
    fn test_huella_cambia_con_destinos_y_alcance() {
        let cached = [(name("Mark"), ParamValue::Text("norte".into()))];
        let base = batch_fingerprint(
            "Copy Parameters",
            TransferScope::Instance,
            &[ElementId::new(2)],
            &cached,
        );
        let otros_destinos = batch_fingerprint(
            "Copy Parameters",
            TransferScope::Instance,
            &[ElementId::new(3)],
            &cached,
        );
        let otro_alcance = batch_fingerprint(
            "Copy Parameters",
            TransferScope::Type,
            &[ElementId::new(2)],
            &cached,
        );
        assert_ne!(base, otros_destinos);
        assert_ne!(base, otro_alcance);
    }
}

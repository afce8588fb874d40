//! Flujos interactivos sobre el motor.
//!
//! Cada flujo encadena prompts de selección con una invocación del motor,
//! en el mismo orden en que los vería un usuario: primero el origen,
//! después la lectura, recién entonces los destinos. Así un origen
//! inutilizable aborta antes de molestar al usuario con el picker de
//! destinos. Cancelar cualquier prompt termina el flujo sin transacción.

use uuid::Uuid;

use bim_domain::{ElementId, ParamName};

use crate::engine::TransferEngine;
use crate::errors::TransferError;
use crate::host::selection::{SelectionError, SelectionFilter, SelectionProvider};
use crate::host::store::{ParamFilter, ParameterStore};
use crate::host::transaction::Transactional;
use crate::journal::store::EventJournal;
use crate::report::TransferReport;
use crate::request::TransferScope;

pub const LABEL_COPY_PAIR: &str = "Copy Parameters";
pub const LABEL_COPY_LINK: &str = "Copy Parameters from Link";
pub const LABEL_MIRROR: &str = "Copy Parameter Set";
pub const LABEL_CLEAR: &str = "Clear Parameter Values";

const PROMPT_SOURCE: &str = "Seleccione el elemento de origen";
const PROMPT_LINK_SOURCE: &str = "Seleccione el elemento de origen en el vínculo";
const PROMPT_TARGETS: &str = "Seleccione los elementos destino";
const PROMPT_SAMPLE: &str = "Seleccione un elemento de muestra";
const PROMPT_READ_NAME: &str = "Elija el parámetro de lectura";
const PROMPT_WRITE_NAMES: &str = "Elija los parámetros de escritura";
const PROMPT_MIRROR_NAMES: &str = "Elija los parámetros a copiar";

/// Copia el valor de un parámetro de lectura hacia uno o más parámetros de
/// escritura, sobre los destinos que el usuario seleccione.
pub fn copy_pair<D, J, S>(
    engine: &mut TransferEngine<D, J>,
    selection: &mut S,
    read: &ParamName,
    write: &[ParamName],
    scope: TransferScope,
) -> Result<TransferReport, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
    S: SelectionProvider + ?Sized,
{
    run_pair(
        engine,
        selection,
        read,
        write,
        scope,
        SelectionFilter::Any,
        PROMPT_SOURCE,
        LABEL_COPY_PAIR,
    )
}

/// Variante con origen en un documento vinculado: se lee del vínculo y se
/// escribe en elementos propios. Siempre alcance de instancia.
pub fn copy_from_link<D, J, S>(
    engine: &mut TransferEngine<D, J>,
    selection: &mut S,
    read: &ParamName,
    write: &[ParamName],
) -> Result<TransferReport, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
    S: SelectionProvider + ?Sized,
{
    run_pair(
        engine,
        selection,
        read,
        write,
        TransferScope::Instance,
        SelectionFilter::LinkedOnly,
        PROMPT_LINK_SOURCE,
        LABEL_COPY_LINK,
    )
}

#[allow(clippy::too_many_arguments)]
fn run_pair<D, J, S>(
    engine: &mut TransferEngine<D, J>,
    selection: &mut S,
    read: &ParamName,
    write: &[ParamName],
    scope: TransferScope,
    source_filter: SelectionFilter,
    source_prompt: &str,
    label: &str,
) -> Result<TransferReport, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
    S: SelectionProvider + ?Sized,
{
    let id = engine.open_invocation(label, scope, write);
    let source = pick_source(engine, selection, id, source_prompt, source_filter)?;
    let cached = engine.cache_fan_out(id, source, scope, read, write)?;
    let targets = pick_targets(engine, selection, id)?;
    engine.apply_writes(id, &targets, scope, &cached, label)
}

/// Copia un conjunto de parámetros 1:1 desde un origen hacia los destinos
/// seleccionados. Los nombres ilegibles en el origen se omiten.
pub fn mirror_parameters<D, J, S>(
    engine: &mut TransferEngine<D, J>,
    selection: &mut S,
    names: &[ParamName],
    scope: TransferScope,
) -> Result<TransferReport, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
    S: SelectionProvider + ?Sized,
{
    let id = engine.open_invocation(LABEL_MIRROR, scope, names);
    let source = pick_source(engine, selection, id, PROMPT_SOURCE, SelectionFilter::Any)?;
    let cached = engine.cache_mirror(id, source, scope, names)?;
    let targets = pick_targets(engine, selection, id)?;
    engine.apply_writes(id, &targets, scope, &cached, LABEL_MIRROR)
}

/// Limpia (escribe texto vacío en) el parámetro dado. Sin lista explícita
/// de destinos usa el colector: todo elemento no vinculado cuyo parámetro
/// tenga texto no vacío.
pub fn clear_parameter<D, J>(
    engine: &mut TransferEngine<D, J>,
    name: &ParamName,
    targets: Option<Vec<ElementId>>,
) -> Result<TransferReport, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
{
    let id = engine.open_invocation(LABEL_CLEAR, TransferScope::Instance, &[name.clone()]);
    let targets = match targets {
        Some(mut explicit) => {
            explicit.retain(|&t| {
                engine.document().contains(t)
                    && SelectionFilter::ExcludeLinked.allows(engine.document(), t)
            });
            explicit
        }
        None => engine.document().elements_with_nonempty(name),
    };
    if targets.is_empty() {
        return Err(engine.abort(id, TransferError::EmptyRequest));
    }
    let cached = vec![(name.clone(), bim_domain::ParamValue::Text(String::new()))];
    engine.apply_writes(id, &targets, TransferScope::Instance, &cached, LABEL_CLEAR)
}

/// Define interactivamente un par lectura/escritura: toma un elemento de
/// muestra, ofrece sus parámetros y devuelve los nombres elegidos para que
/// el invocador los persista.
pub fn define_pair<D, S>(
    store: &D,
    selection: &mut S,
) -> Result<(ParamName, Vec<ParamName>), TransferError>
where
    D: ParameterStore + ?Sized,
    S: SelectionProvider + ?Sized,
{
    let sample = selection.pick_one(PROMPT_SAMPLE).map_err(cancelled)?;
    ensure_known(store, sample)?;
    let all = store.parameter_names(sample, ParamFilter::All);
    if all.is_empty() {
        return Err(TransferError::InvalidSelection {
            detail: "el elemento no expone parámetros".into(),
        });
    }
    let options: Vec<String> = all.iter().map(|n| n.to_string()).collect();
    let chosen = selection
        .choose(PROMPT_READ_NAME, &options, false)
        .map_err(cancelled)?;
    let read = match chosen.into_iter().next() {
        Some(raw) => parse_name(&raw)?,
        None => return Err(TransferError::Cancelled),
    };

    let writable = store.parameter_names(sample, ParamFilter::Writable);
    if writable.is_empty() {
        return Err(TransferError::InvalidSelection {
            detail: "el elemento no expone parámetros modificables".into(),
        });
    }
    let options: Vec<String> = writable.iter().map(|n| n.to_string()).collect();
    let chosen = selection
        .choose(PROMPT_WRITE_NAMES, &options, true)
        .map_err(cancelled)?;
    if chosen.is_empty() {
        return Err(TransferError::EmptyRequest);
    }
    let mut write = Vec::with_capacity(chosen.len());
    for raw in chosen {
        write.push(parse_name(&raw)?);
    }
    Ok((read, write))
}

/// Define interactivamente el conjunto de nombres de una copia espejo.
pub fn define_mirror<D, S>(store: &D, selection: &mut S) -> Result<Vec<ParamName>, TransferError>
where
    D: ParameterStore + ?Sized,
    S: SelectionProvider + ?Sized,
{
    let sample = selection.pick_one(PROMPT_SAMPLE).map_err(cancelled)?;
    ensure_known(store, sample)?;
    let writable = store.parameter_names(sample, ParamFilter::Writable);
    if writable.is_empty() {
        return Err(TransferError::InvalidSelection {
            detail: "el elemento no expone parámetros modificables".into(),
        });
    }
    let options: Vec<String> = writable.iter().map(|n| n.to_string()).collect();
    let chosen = selection
        .choose(PROMPT_MIRROR_NAMES, &options, true)
        .map_err(cancelled)?;
    if chosen.is_empty() {
        return Err(TransferError::EmptyRequest);
    }
    let mut names = Vec::with_capacity(chosen.len());
    for raw in chosen {
        names.push(parse_name(&raw)?);
    }
    Ok(names)
}

fn pick_source<D, J, S>(
    engine: &mut TransferEngine<D, J>,
    selection: &mut S,
    id: Uuid,
    prompt: &str,
    filter: SelectionFilter,
) -> Result<ElementId, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
    S: SelectionProvider + ?Sized,
{
    let source = match selection.pick_one(prompt) {
        Ok(s) => s,
        Err(SelectionError::Cancelled) => {
            return Err(engine.abort(id, TransferError::Cancelled))
        }
    };
    if !engine.document().contains(source) {
        let err = TransferError::InvalidSelection {
            detail: format!("el elemento {source} no existe en el documento"),
        };
        return Err(engine.abort(id, err));
    }
    if !filter.allows(engine.document(), source) {
        let detail = match filter {
            SelectionFilter::LinkedOnly => "el elemento no proviene de un vínculo".to_string(),
            _ => format!("el elemento {source} no cumple el filtro de selección"),
        };
        return Err(engine.abort(id, TransferError::InvalidSelection { detail }));
    }
    Ok(source)
}

/// Pide los destinos y aplica el filtro de escritura: elementos existentes
/// y no vinculados, sin duplicados, en el orden del pick.
fn pick_targets<D, J, S>(
    engine: &mut TransferEngine<D, J>,
    selection: &mut S,
    id: Uuid,
) -> Result<Vec<ElementId>, TransferError>
where
    D: ParameterStore + Transactional,
    J: EventJournal,
    S: SelectionProvider + ?Sized,
{
    let picked = match selection.pick_many(PROMPT_TARGETS) {
        Ok(t) => t,
        Err(SelectionError::Cancelled) => {
            return Err(engine.abort(id, TransferError::Cancelled))
        }
    };
    let mut seen = indexmap::IndexSet::new();
    for t in picked {
        if engine.document().contains(t)
            && SelectionFilter::ExcludeLinked.allows(engine.document(), t)
        {
            seen.insert(t);
        }
    }
    if seen.is_empty() {
        return Err(engine.abort(id, TransferError::EmptyRequest));
    }
    Ok(seen.into_iter().collect())
}

fn ensure_known<D: ParameterStore + ?Sized>(
    store: &D,
    element: ElementId,
) -> Result<(), TransferError> {
    if store.contains(element) {
        Ok(())
    } else {
        Err(TransferError::InvalidSelection {
            detail: format!("el elemento {element} no existe en el documento"),
        })
    }
}

fn parse_name(raw: &str) -> Result<ParamName, TransferError> {
    ParamName::new(raw).map_err(|e| TransferError::InvalidSelection { detail: e.to_string() })
}

fn cancelled(_: SelectionError) -> TransferError {
    TransferError::Cancelled
}

//! Abortos por origen inutilizable: sin transacción y sin molestar al
//! usuario con el picker de destinos.

use bim_adapters::{DocumentBuilder, ElementSpec, InMemoryDocument, ScriptedReply, ScriptedSelection};
use bim_core::{flows, TransferEngine, TransferError, TransferPhase, TransferScope, Transactional};
use bim_domain::{ElementId, ParamName};

fn name(raw: &str) -> ParamName {
    ParamName::new(raw).unwrap()
}

fn doc_con_origen(comments: Option<&str>) -> InMemoryDocument {
    let source = match comments {
        Some(value) => ElementSpec::new(10).category("Walls").text("Comments", value),
        None => ElementSpec::new(10).category("Walls").unset_text("Comments"),
    };
    DocumentBuilder::new()
        .element(source)
        .element(ElementSpec::new(20).category("Walls").unset_text("Mark"))
        .build()
        .unwrap()
}

#[test]
fn test_origen_con_texto_vacio_aborta_antes_de_pedir_destinos() {
    let mut engine = TransferEngine::new(doc_con_origen(Some("")));
    let mut selection = ScriptedSelection::new([
        ScriptedReply::One(ElementId::new(10)),
        // Esta respuesta no debería llegar a consumirse.
        ScriptedReply::Many(vec![ElementId::new(20)]),
    ]);

    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Mark")],
        TransferScope::Instance,
    )
    .unwrap_err();

    assert_eq!(err, TransferError::SourceValueEmpty { name: name("Comments") });
    // El mensaje nombra el parámetro ofensor.
    assert!(err.to_string().contains("Comments"));
    // Se preguntó por el origen y nada más.
    assert_eq!(selection.prompts().len(), 1);
    // Nunca hubo transacción.
    assert!(!engine.document().has_started());
    assert!(!engine.document().has_ended());

    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.phase, TransferPhase::Aborted);
    assert_eq!(engine.event_variants().unwrap(), vec!["I", "A"]);
}

#[test]
fn test_origen_sin_valor_asignado_tambien_es_vacio() {
    let mut engine = TransferEngine::new(doc_con_origen(None));
    let mut selection = ScriptedSelection::new([ScriptedReply::One(ElementId::new(10))]);

    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Mark")],
        TransferScope::Instance,
    )
    .unwrap_err();

    assert_eq!(err, TransferError::SourceValueEmpty { name: name("Comments") });
}

#[test]
fn test_parametro_de_lectura_ausente_aborta() {
    let doc = DocumentBuilder::new()
        .element(ElementSpec::new(10).category("Walls").text("Otro", "x"))
        .element(ElementSpec::new(20).category("Walls").unset_text("Mark"))
        .build()
        .unwrap();
    let mut engine = TransferEngine::new(doc);
    let mut selection = ScriptedSelection::new([ScriptedReply::One(ElementId::new(10))]);

    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Mark")],
        TransferScope::Instance,
    )
    .unwrap_err();

    assert_eq!(err, TransferError::SourceParameterMissing { name: name("Comments") });
    assert!(err.to_string().contains("Comments"));
    assert!(!engine.document().has_ended());
    assert_eq!(engine.event_variants().unwrap(), vec!["I", "A"]);
}

#[test]
fn test_cero_numerico_no_cuenta_como_vacio() {
    // Sólo el texto vacío es "sin valor": un entero cero es legítimo.
    let doc = DocumentBuilder::new()
        .element(ElementSpec::new(10).category("Walls").integer("Contador", 0))
        .element(ElementSpec::new(20).category("Walls").unset("Contador", bim_domain::StorageKind::Integer))
        .build()
        .unwrap();
    let mut engine = TransferEngine::new(doc);
    let mut selection = ScriptedSelection::new([
        ScriptedReply::One(ElementId::new(10)),
        ScriptedReply::Many(vec![ElementId::new(20)]),
    ]);

    let report = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Contador"),
        &[name("Contador")],
        TransferScope::Instance,
    )
    .unwrap();

    assert_eq!(report.updated, 1);
    use bim_core::ParameterStore;
    assert_eq!(
        engine
            .document()
            .integer_value(ElementId::new(20), &name("Contador"))
            .unwrap(),
        Some(0)
    );
}

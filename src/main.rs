//! Demostración del motor de transferencia sobre un documento en memoria.
//!
//! Recorre los caminos principales de una invocación: copia con fallo
//! parcial, origen vacío, espejo determinista, rollback por fallo del
//! anfitrión y cancelación. Cada demo imprime la secuencia de eventos y
//! verifica el resultado esperado.

use bimflow_rust::{
    flows, DocumentBuilder, ElementId, ElementSpec, FailingDocument, InMemoryDocument, ParamName,
    ParameterStore, ScriptedReply, ScriptedSelection, Transactional, TransferEngine,
    TransferError, TransferPhase, TransferRequest, TransferScope,
};

fn name(raw: &str) -> ParamName {
    ParamName::new(raw).expect("nombre de parámetro válido")
}

fn main() {
    println!("--- Demo: copia con fallo parcial ---");
    run_partial_copy_demo();
    println!("--- Demo: origen vacío aborta sin transacción ---");
    run_empty_source_demo();
    println!("--- Demo: espejo determinista ---");
    run_mirror_determinism_demo();
    println!("--- Demo: rollback por fallo del anfitrión ---");
    run_rollback_demo();
    println!("--- Demo: la cancelación no es un error ---");
    run_cancellation_demo();
}

/// Un muro con "Fire-rated" definido se copia hacia otro muro y una puerta
/// que no posee el parámetro: una escritura aplica, la otra queda en el
/// reporte por (parámetro, categoría).
fn run_partial_copy_demo() {
    let document = DocumentBuilder::new()
        .element(ElementSpec::new(100).category("Walls").text("Fire-rated", "60 min"))
        .element(ElementSpec::new(200).category("Walls").unset_text("Fire-rated"))
        .element(ElementSpec::new(201).category("Doors").unset_text("Mark"))
        .build()
        .expect("documento de demo válido");

    let mut engine = TransferEngine::new(document);
    let mut selection = ScriptedSelection::new([
        ScriptedReply::One(ElementId::new(100)),
        ScriptedReply::Many(vec![ElementId::new(200), ElementId::new(201)]),
    ]);

    let report = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Fire-rated"),
        &[name("Fire-rated")],
        TransferScope::Instance,
    )
    .expect("el lote con fallos locales igualmente confirma");

    println!("{}", report.summary_line());
    println!("{report}");
    println!("eventos: {:?}", engine.event_variants().unwrap_or_default());
    assert_eq!(report.updated, 1, "debe actualizar sólo el muro");
    assert_eq!(report.failure_total(), 1, "la puerta queda en el reporte");
    let copied = engine
        .document()
        .text_value(ElementId::new(200), &name("Fire-rated"))
        .expect("lectura del destino");
    assert_eq!(copied.as_deref(), Some("60 min"));
    println!("!Demo copia parcial: OK");
}

/// Un parámetro de lectura vacío corta la invocación antes de pedir
/// destinos: sin transacción y con el nombre ofensor en el error.
fn run_empty_source_demo() {
    let document = DocumentBuilder::new()
        .element(ElementSpec::new(10).category("Walls").unset_text("Comments"))
        .build()
        .expect("documento de demo válido");

    let mut engine = TransferEngine::new(document);
    let mut selection = ScriptedSelection::new([ScriptedReply::One(ElementId::new(10))]);

    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Mark")],
        TransferScope::Instance,
    )
    .expect_err("el origen vacío debe abortar");

    println!("error reportado: {err}");
    println!("eventos: {:?}", engine.event_variants().unwrap_or_default());
    assert!(err.to_string().contains("Comments"));
    assert_eq!(selection.prompts().len(), 1, "no debe llegar al picker de destinos");
    assert!(!engine.document().has_started(), "sin transacción");
    println!("!Demo origen vacío: OK");
}

/// Dos corridas idénticas del mismo espejo producen la misma huella.
fn run_mirror_determinism_demo() {
    let base = DocumentBuilder::new()
        .element(
            ElementSpec::new(10)
                .category("Walls")
                .text("Mark", "M-01")
                .text("Comments", "revisar junta"),
        )
        .element(ElementSpec::new(11).category("Walls").unset_text("Mark").unset_text("Comments"))
        .element(ElementSpec::new(12).category("Walls").unset_text("Mark").unset_text("Comments"))
        .element(ElementSpec::new(13).category("Walls").unset_text("Mark").unset_text("Comments"))
        .build()
        .expect("documento de demo válido");

    let request = TransferRequest::mirror(
        flows::LABEL_MIRROR,
        TransferScope::Instance,
        ElementId::new(10),
        vec![ElementId::new(11), ElementId::new(12), ElementId::new(13)],
        vec![name("Mark"), name("Comments")],
    )
    .expect("solicitud válida");

    let mut engine_a = TransferEngine::new(base.clone());
    let report_a = engine_a.run_transfer(&request).expect("espejo limpio");
    let mut engine_b = TransferEngine::new(base);
    let _report_b = engine_b.run_transfer(&request).expect("espejo limpio");

    println!("{}", report_a.summary_line());
    assert!(report_a.is_clean());
    assert_eq!(report_a.writes, 6, "3 destinos x 2 parámetros");

    let fp_a = engine_a.snapshot().and_then(|s| s.fingerprint).expect("huella a");
    let fp_b = engine_b.snapshot().and_then(|s| s.fingerprint).expect("huella b");
    println!("huella a: {fp_a}");
    println!("huella b: {fp_b}");
    assert_eq!(fp_a, fp_b, "las corridas idénticas comparten huella");
    println!("!Demo espejo determinista: OK");
}

/// Un fallo interno del anfitrión en medio del lote revierte todo lo ya
/// escrito: ningún destino conserva valores parciales.
fn run_rollback_demo() {
    let inner = DocumentBuilder::new()
        .element(ElementSpec::new(1).category("Walls").text("Comments", "eje B"))
        .element(ElementSpec::new(2).category("Walls").unset_text("Comments"))
        .element(ElementSpec::new(3).category("Walls").unset_text("Comments"))
        .build()
        .expect("documento de demo válido");
    let document = FailingDocument::new(inner).fail_on_write(2);

    let request = TransferRequest::fan_out(
        flows::LABEL_COPY_PAIR,
        TransferScope::Instance,
        ElementId::new(1),
        vec![ElementId::new(2), ElementId::new(3)],
        name("Comments"),
        vec![name("Comments")],
    )
    .expect("solicitud válida");

    let mut engine = TransferEngine::new(document);
    let err = engine.run_transfer(&request).expect_err("el lote debe revertirse");

    println!("error reportado: {err}");
    println!("eventos: {:?}", engine.event_variants().unwrap_or_default());
    assert!(matches!(err, TransferError::Host { .. }));
    assert!(engine.document().has_ended(), "la transacción terminó en rollback");
    let first = engine
        .document()
        .inner()
        .text_value(ElementId::new(2), &name("Comments"))
        .expect("lectura tras rollback");
    assert_eq!(first, None, "la primera escritura también se revierte");
    let phase = engine.snapshot().map(|s| s.phase).expect("snapshot");
    assert_eq!(phase, TransferPhase::RolledBack);
    println!("!Demo rollback: OK");
}

/// Cerrar el picker sin elegir termina la invocación sin transacción y sin
/// tratarla como fallo.
fn run_cancellation_demo() {
    let document = DocumentBuilder::new()
        .element(ElementSpec::new(10).category("Walls").text("Comments", "eje C"))
        .build()
        .expect("documento de demo válido");

    let mut engine: TransferEngine<InMemoryDocument, _> = TransferEngine::new(document);
    let mut selection = ScriptedSelection::cancelling();

    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Mark")],
        TransferScope::Instance,
    )
    .expect_err("sin selección no hay invocación");

    assert_eq!(err, TransferError::Cancelled);
    assert!(!engine.document().has_started());
    println!("eventos: {:?}", engine.event_variants().unwrap_or_default());
    println!("cancelado por el usuario; el documento queda intacto");
    println!("!Demo cancelación: OK");
}

//! Atomicidad del lote: o confirma todo lo escribible o no queda nada.

use bim_adapters::faults::FailingDocument;
use bim_adapters::{DocumentBuilder, ElementSpec, InMemoryDocument};
use bim_core::{
    ParameterStore, TransferEngine, TransferError, TransferPhase, TransferRequest, TransferScope,
    Transactional,
};
use bim_domain::{ElementId, ParamName};

fn name(raw: &str) -> ParamName {
    ParamName::new(raw).unwrap()
}

fn doc() -> InMemoryDocument {
    DocumentBuilder::new()
        .element(ElementSpec::new(1).category("Walls").text("Comments", "eje A"))
        .element(ElementSpec::new(2).category("Walls").unset_text("Mark"))
        .element(ElementSpec::new(3).category("Walls").unset_text("Mark"))
        .element(ElementSpec::new(4).category("Walls").unset_text("Mark"))
        .build()
        .unwrap()
}

fn request() -> TransferRequest {
    TransferRequest::fan_out(
        "Copy Parameters",
        TransferScope::Instance,
        ElementId::new(1),
        vec![ElementId::new(2), ElementId::new(3), ElementId::new(4)],
        name("Comments"),
        vec![name("Mark")],
    )
    .unwrap()
}

#[test]
fn test_fallo_del_anfitrion_revierte_el_lote_completo() {
    // La tercera escritura falla: las dos anteriores ya estaban aplicadas
    // dentro de la transacción y deben desaparecer con el rollback.
    let failing = FailingDocument::new(doc()).fail_on_write(3);
    let mut engine = TransferEngine::new(failing);

    let err = engine.run_transfer(&request()).unwrap_err();
    assert!(matches!(err, TransferError::Host { .. }));

    for id in [2, 3, 4] {
        let got = engine
            .document()
            .text_value(ElementId::new(id), &name("Mark"))
            .unwrap();
        assert_eq!(got, None, "el destino {id} no debería conservar escrituras");
    }
    assert!(engine.document().has_ended());
    assert!(!engine.document().has_started());

    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.phase, TransferPhase::RolledBack);
    assert!(matches!(snap.error, Some(TransferError::Host { .. })));
    assert!(snap.fingerprint.is_none());
    assert_eq!(engine.event_variants().unwrap(), vec!["I", "R", "T", "X"]);
}

#[test]
fn test_lote_confirmado_publica_y_registra_huella() {
    let mut engine = TransferEngine::new(doc());
    let report = engine.run_transfer(&request()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.updated, 3);
    assert_eq!(report.writes, 3);
    for id in [2, 3, 4] {
        let got = engine
            .document()
            .text_value(ElementId::new(id), &name("Mark"))
            .unwrap();
        assert_eq!(got.as_deref(), Some("eje A"));
    }

    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.phase, TransferPhase::Committed);
    assert_eq!(snap.updated, Some(3));
    assert!(snap.fingerprint.is_some());
    assert_eq!(engine.document().last_transaction_label(), Some("Copy Parameters"));
}

#[test]
fn test_huella_estable_entre_corridas_identicas() {
    let mut primera = TransferEngine::new(doc());
    primera.run_transfer(&request()).unwrap();
    let mut segunda = TransferEngine::new(doc());
    segunda.run_transfer(&request()).unwrap();

    let fp_primera = primera.snapshot().unwrap().fingerprint;
    let fp_segunda = segunda.snapshot().unwrap().fingerprint;
    assert!(fp_primera.is_some());
    assert_eq!(fp_primera, fp_segunda);
}

#[test]
fn test_solo_una_transaccion_por_invocacion() {
    // El lote completo corre dentro de una única transacción: al terminar
    // no queda ninguna abierta y la etiqueta es la de la solicitud.
    let mut engine = TransferEngine::new(doc());
    engine.run_transfer(&request()).unwrap();
    assert!(!engine.document().has_started());
    assert!(engine.document().has_ended());
}

use std::fs;

use tempfile::TempDir;
use uuid::Uuid;

use bimflow_rust::flows;
use bimflow_rust::{
    replay, variants, CategoryLabel, DocumentBuilder, ElementId, ElementSpec, FailureKey,
    FailureReason, FileConfigStore, InMemoryDocument, PairConfig, ParamName, ParameterStore,
    ScriptedReply, ScriptedSelection, Transactional, TransferEngine, TransferError, TransferPhase,
    TransferRequest, TransferScope,
};

fn name(raw: &str) -> ParamName {
    ParamName::new(raw).expect("nombre de parámetro válido")
}

// Simple helper: a wall as source plus two targets of different categories.
fn build_site_document() -> InMemoryDocument {
    DocumentBuilder::new()
        .element(ElementSpec::new(100).category("Walls").text("Fire-rated", "60 min"))
        .element(ElementSpec::new(200).category("Walls").unset_text("Fire-rated"))
        .element(ElementSpec::new(201).category("Doors").unset_text("Mark"))
        .build()
        .expect("documento de prueba")
}

#[test]
fn test_copia_parcial_reporta_fallos_sin_abortar() {
    let mut engine = TransferEngine::new(build_site_document());

    // 1. Abanico mínimo: leer y escribir el mismo nombre sobre dos destinos.
    let request = TransferRequest::fan_out(
        flows::LABEL_COPY_PAIR,
        TransferScope::Instance,
        ElementId::new(100),
        vec![ElementId::new(200), ElementId::new(201)],
        name("Fire-rated"),
        vec![name("Fire-rated")],
    )
    .expect("solicitud válida");
    let report = engine.run_transfer(&request).expect("la copia parcial no aborta");

    // 2. El muro recibió el valor; la puerta sin el parámetro quedó contada.
    assert_eq!(report.targets, 2);
    assert_eq!(report.updated, 1);
    assert_eq!(report.writes, 1);
    assert_eq!(report.failure_total(), 1);
    let doors = FailureKey {
        param: name("Fire-rated"),
        category: CategoryLabel::Named("Doors".into()),
    };
    assert_eq!(report.failures[&doors].reason, FailureReason::Missing);
    assert_eq!(
        report.summary_line(),
        "1 de 2 destino(s) actualizados, 1 escritura(s), 1 fallo(s)"
    );
    assert_eq!(
        report.to_string(),
        "Parámetro 'Fire-rated': Doors (1 objeto(s), no existe)"
    );

    // 3. La transacción confirmó pese al fallo local.
    assert!(engine.document().has_ended());
    assert_eq!(
        engine
            .document()
            .text_value(ElementId::new(200), &name("Fire-rated"))
            .expect("el muro destino existe"),
        Some("60 min".to_string())
    );
    assert_eq!(variants(&engine.events()), vec!["I", "R", "T", "W", "C"]);
}

#[test]
fn test_origen_vacio_aborta_antes_de_pedir_destinos() {
    let doc = DocumentBuilder::new()
        .element(ElementSpec::new(10).category("Walls").unset_text("Comments"))
        .element(ElementSpec::new(11).category("Walls").unset_text("Comments"))
        .build()
        .expect("documento de prueba");
    let mut engine = TransferEngine::new(doc);

    // El guion trae sólo el origen: si el flujo llegara al picker de
    // destinos lo agotaría y el error sería una cancelación, no un vacío.
    let mut selection = ScriptedSelection::new([ScriptedReply::One(ElementId::new(10))]);
    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Comments")],
        TransferScope::Instance,
    )
    .expect_err("el origen vacío es fatal");

    assert_eq!(err, TransferError::SourceValueEmpty { name: name("Comments") });
    assert_eq!(
        err.to_string(),
        "el parámetro de lectura 'Comments' está vacío en el origen"
    );
    // 1. Un solo prompt visto: nunca se pidieron destinos.
    assert_eq!(selection.prompts().len(), 1);
    // 2. Sin transacción, invocación abortada en el journal.
    assert!(!engine.document().has_started());
    let snap = engine.snapshot().expect("hubo invocación");
    assert_eq!(snap.phase, TransferPhase::Aborted);
}

#[test]
fn test_la_configuracion_del_archivo_alimenta_la_copia() {
    let dir = TempDir::new().expect("directorio temporal");
    let path = dir.path().join("config.json");
    // 1. La forma histórica del archivo: un par con dos escrituras.
    fs::write(
        &path,
        r#"{"read_param": "Comments", "write_param": ["Mark", "Type Comments"]}"#,
    )
    .expect("escribir la configuración");
    let (read, write) = FileConfigStore::new(&path)
        .load_pair()
        .expect("configuración válida")
        .names()
        .expect("nombres válidos");

    // 2. Tres destinos con ambos parámetros de escritura presentes.
    let mut builder = DocumentBuilder::new()
        .element(ElementSpec::new(1).category("Walls").text("Comments", "Reviewed"));
    for id in [2, 3, 4] {
        builder = builder.element(
            ElementSpec::new(id)
                .category("Walls")
                .unset_text("Mark")
                .unset_text("Type Comments"),
        );
    }
    let mut engine = TransferEngine::new(builder.build().expect("documento de prueba"));

    let request = TransferRequest::fan_out(
        flows::LABEL_COPY_PAIR,
        TransferScope::Instance,
        ElementId::new(1),
        vec![ElementId::new(2), ElementId::new(3), ElementId::new(4)],
        read,
        write,
    )
    .expect("solicitud válida");
    let report = engine.run_transfer(&request).expect("copia limpia");

    // 3. Tres destinos por dos escrituras: seis aplicadas, ningún fallo.
    assert!(report.is_clean());
    assert_eq!(report.updated, 3);
    assert_eq!(report.writes, 6);
    for id in [2, 3, 4] {
        for param in ["Mark", "Type Comments"] {
            assert_eq!(
                engine
                    .document()
                    .text_value(ElementId::new(id), &name(param))
                    .expect("el destino existe"),
                Some("Reviewed".to_string()),
                "falta la escritura de '{param}' en el elemento {id}"
            );
        }
    }
}

#[test]
fn test_el_journal_reconstruye_la_invocacion_confirmada() {
    let mut engine = TransferEngine::new(build_site_document());
    let request = TransferRequest::mirror(
        flows::LABEL_MIRROR,
        TransferScope::Instance,
        ElementId::new(100),
        vec![ElementId::new(200)],
        vec![name("Fire-rated")],
    )
    .expect("solicitud válida");
    engine.run_transfer(&request).expect("espejo limpio");

    // La reconstrucción desde los eventos coincide con el resultado vivo.
    let id: Uuid = engine.last_invocation().expect("hubo invocación");
    let snap = replay(id, &engine.events());
    assert_eq!(snap.phase, TransferPhase::Committed);
    assert_eq!(snap.targets, Some(1));
    assert_eq!(snap.updated, Some(1));
    assert!(snap.fingerprint.is_some());
    assert!(snap.started_at.expect("inicio") <= snap.finished_at.expect("fin"));
    assert!(snap.error.is_none());
}

#[test]
fn test_cancelar_el_picker_no_es_un_fallo_del_lote() {
    let mut engine = TransferEngine::new(build_site_document());
    // Guion: origen elegido, cancelación en el picker de destinos.
    let mut selection = ScriptedSelection::new([
        ScriptedReply::One(ElementId::new(100)),
        ScriptedReply::Cancel,
    ]);
    let err = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Fire-rated"),
        &[name("Fire-rated")],
        TransferScope::Instance,
    )
    .expect_err("cancelar termina el flujo");

    assert_eq!(err, TransferError::Cancelled);
    assert_eq!(err.to_string(), "operación cancelada por el usuario");
    // Nada que revertir: la transacción nunca se abrió.
    assert!(!engine.document().has_started());
    assert_eq!(variants(&engine.events()), vec!["I", "R", "A"]);
}

#[test]
fn test_definir_persistir_y_recargar_el_par() {
    let dir = TempDir::new().expect("directorio temporal");
    let store = FileConfigStore::new(dir.path().join("config.json"));

    let doc = DocumentBuilder::new()
        .element(
            ElementSpec::new(7)
                .category("Walls")
                .text("Comments", "origen")
                .unset_text("Mark")
                .read_only_text("Assembly Code", "A.10"),
        )
        .build()
        .expect("documento de prueba");

    // 1. Definición interactiva: muestra, lectura y escrituras.
    let mut selection = ScriptedSelection::new([
        ScriptedReply::One(ElementId::new(7)),
        ScriptedReply::Choice(vec!["Comments".into()]),
        ScriptedReply::Choice(vec!["Mark".into(), "Assembly Code".into()]),
    ]);
    let (read, write) = flows::define_pair(&doc, &mut selection).expect("definición completa");
    assert_eq!(read, name("Comments"));
    // El parámetro de sólo lectura no se ofrece como escritura.
    assert_eq!(write, vec![name("Mark")]);

    // 2. Persistencia y recarga por el mismo almacén.
    let pair = PairConfig {
        read_param: read.to_string(),
        write_param: write.iter().map(|n| n.to_string()).collect(),
    };
    store.save_pair(&pair).expect("guardar la configuración");
    let reloaded = store.load_pair().expect("recargar la configuración");
    assert_eq!(reloaded, pair);
    let (read_back, write_back) = reloaded.names().expect("nombres válidos");
    assert_eq!(read_back, name("Comments"));
    assert_eq!(write_back, vec![name("Mark")]);
}

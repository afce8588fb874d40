//! Acumulación de fallos por (parámetro, categoría) y confirmación parcial.

use bim_adapters::{DocumentBuilder, ElementSpec, InMemoryDocument, ScriptedReply, ScriptedSelection};
use bim_core::{
    flows, FailureKey, FailureReason, ParameterStore, TransferEngine, TransferPhase,
    TransferRequest, TransferScope,
};
use bim_domain::{CategoryLabel, ElementId, ParamName};

fn name(raw: &str) -> ParamName {
    ParamName::new(raw).unwrap()
}

fn key(param: &str, category: &str) -> FailureKey {
    FailureKey {
        param: name(param),
        category: CategoryLabel::Named(category.to_string()),
    }
}

#[test]
fn test_escenario_un_destino_sin_parametro() {
    // Origen con "Comments" = "Fire-rated"; destino A con "Mark" escribible
    // y destino B sin "Mark". A recibe el valor, B aporta el único fallo.
    let doc = DocumentBuilder::new()
        .element(ElementSpec::new(10).category("Walls").text("Comments", "Fire-rated"))
        .element(ElementSpec::new(20).category("Walls").unset_text("Mark"))
        .element(ElementSpec::new(21).category("Doors").text("Comments", "otro"))
        .build()
        .unwrap();
    let mut engine = TransferEngine::new(doc);
    let mut selection = ScriptedSelection::new([
        ScriptedReply::One(ElementId::new(10)),
        ScriptedReply::Many(vec![ElementId::new(20), ElementId::new(21)]),
    ]);

    let report = flows::copy_pair(
        &mut engine,
        &mut selection,
        &name("Comments"),
        &[name("Mark")],
        TransferScope::Instance,
    )
    .unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.targets, 2);
    assert_eq!(report.failure_total(), 1);
    let tally = &report.failures[&key("Mark", "Doors")];
    assert_eq!(tally.count, 1);
    assert_eq!(tally.reason, FailureReason::Missing);
    assert_eq!(
        report.summary_line(),
        "1 de 2 destino(s) actualizados, 1 escritura(s), 1 fallo(s)"
    );

    let got = engine
        .document()
        .text_value(ElementId::new(20), &name("Mark"))
        .unwrap();
    assert_eq!(got.as_deref(), Some("Fire-rated"));
    assert_eq!(engine.event_variants().unwrap(), vec!["I", "R", "T", "W", "C"]);
}

fn mixed_doc() -> InMemoryDocument {
    DocumentBuilder::new()
        .element(ElementSpec::new(1).category("Walls").text("Comments", "norte"))
        // Dos puertas sin 'Mark'.
        .element(ElementSpec::new(2).category("Doors").text("Comments", "a"))
        .element(ElementSpec::new(3).category("Doors").text("Comments", "b"))
        // Una puerta con 'Mark' de sólo lectura.
        .element(ElementSpec::new(4).category("Doors").read_only_text("Mark", "fijo"))
        // Un elemento sin categoría y sin 'Mark'.
        .element(ElementSpec::new(5).unset_text("Comments"))
        // Dos muros escribibles.
        .element(ElementSpec::new(6).category("Walls").unset_text("Mark"))
        .element(ElementSpec::new(7).category("Walls").text("Mark", "viejo"))
        .build()
        .unwrap()
}

#[test]
fn test_fallos_agregados_por_categoria_y_confirmacion_parcial() {
    let mut engine = TransferEngine::new(mixed_doc());
    let request = TransferRequest::fan_out(
        "Copy Parameters",
        TransferScope::Instance,
        ElementId::new(1),
        (2..=7).map(ElementId::new).collect(),
        name("Comments"),
        vec![name("Mark")],
    )
    .unwrap();

    let report = engine.run_transfer(&request).unwrap();

    // 6 destinos: 2 y 3 sin parámetro, 4 sólo lectura, 5 sin parámetro y
    // sin categoría, 6 y 7 escritos.
    assert_eq!(report.targets, 6);
    assert_eq!(report.updated, 2);
    assert_eq!(report.writes, 2);
    assert_eq!(report.failure_total(), 4);

    // Faltante y sólo-lectura comparten clave cuando comparten categoría:
    // el contador las funde y la razón conservada es la primera vista.
    let doors = &report.failures[&key("Mark", "Doors")];
    assert_eq!(doors.count, 3);
    assert_eq!(doors.reason, FailureReason::Missing);

    let sin_categoria = FailureKey { param: name("Mark"), category: CategoryLabel::Missing };
    assert_eq!(report.failures[&sin_categoria].count, 1);

    // La confirmación parcial publica lo que sí se escribió.
    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.phase, TransferPhase::Committed);
    for id in [6, 7] {
        let got = engine
            .document()
            .text_value(ElementId::new(id), &name("Mark"))
            .unwrap();
        assert_eq!(got.as_deref(), Some("norte"));
    }
    // El valor previo del destino 7 quedó pisado.
    assert_ne!(
        engine
            .document()
            .text_value(ElementId::new(7), &name("Mark"))
            .unwrap()
            .as_deref(),
        Some("viejo")
    );
}

#[test]
fn test_display_del_reporte_agrupa_por_parametro() {
    let mut engine = TransferEngine::new(mixed_doc());
    let request = TransferRequest::fan_out(
        "Copy Parameters",
        TransferScope::Instance,
        ElementId::new(1),
        (2..=7).map(ElementId::new).collect(),
        name("Comments"),
        vec![name("Mark")],
    )
    .unwrap();

    let report = engine.run_transfer(&request).unwrap();
    let rendered = report.to_string();
    assert!(rendered.starts_with("Parámetro 'Mark':"));
    assert!(rendered.contains("Doors (3 objeto(s), no existe)"));
    assert!(rendered.contains("N/A (1 objeto(s), no existe)"));
}

//! bimflow: transferencia de parámetros sobre instantáneas JSON de documento.
//!
//! Cada subcomando carga la instantánea (`--doc`), ejecuta una invocación
//! del motor y vuelca el documento resultante (a `--save`, o sobre el mismo
//! archivo). Códigos de salida: 0 éxito o cancelación, 2 uso, 3 instantánea
//! con JSON inválido, 4 transferencia rechazada o revertida, 5 error de
//! configuración o E/S.

use std::path::PathBuf;

use bim_adapters::{InMemoryDocument, ScriptedReply, ScriptedSelection};
use bim_core::{
    flows, InMemoryJournal, ParamFilter, ParameterStore, TransferEngine, TransferError,
    TransferReport, TransferRequest, TransferScope,
};
use bim_domain::{ElementId, ParamName};
use bim_persistence::{FileConfigStore, StorePaths};

type Engine = TransferEngine<InMemoryDocument, InMemoryJournal>;

fn main() {
    // Cargar .env si existe para resolver rutas de configuración
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    let code = match args.get(1).map(String::as_str) {
        Some("copy") => cmd_copy(&args[2..]),
        Some("copy-link") => cmd_copy_link(&args[2..]),
        Some("mirror") => cmd_mirror(&args[2..]),
        Some("clear") => cmd_clear(&args[2..]),
        Some("params") => cmd_params(&args[2..]),
        Some("init-config") => cmd_init_config(&args[2..]),
        Some(other) => {
            eprintln!("bimflow: subcomando desconocido '{other}'");
            eprintln!("bimflow: use 'copy', 'copy-link', 'mirror', 'clear', 'params' o 'init-config'");
            2
        }
        None => {
            println!("bimflow: use 'copy', 'copy-link', 'mirror', 'clear', 'params' o 'init-config'");
            0
        }
    };
    std::process::exit(code);
}

fn cmd_copy(args: &[String]) -> i32 {
    let mut doc_path: Option<String> = None;
    let mut source: Option<i64> = None;
    let mut targets: Option<Vec<ElementId>> = None;
    let mut config_path: Option<String> = None;
    let mut scope = TransferScope::Instance;
    let mut save_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--doc" => {
                i += 1;
                if i < args.len() {
                    doc_path = Some(args[i].clone());
                }
            }
            "--source" => {
                i += 1;
                if i < args.len() {
                    source = args[i].parse::<i64>().ok();
                }
            }
            "--targets" => {
                i += 1;
                if i < args.len() {
                    targets = parse_ids(&args[i]);
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].clone());
                }
            }
            "--scope" => {
                i += 1;
                if i < args.len() {
                    match parse_scope(&args[i]) {
                        Some(s) => scope = s,
                        None => {
                            eprintln!("[bimflow copy] alcance desconocido '{}'", args[i]);
                            return 2;
                        }
                    }
                }
            }
            "--save" => {
                i += 1;
                if i < args.len() {
                    save_path = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }

    if let (Some(doc_path), Some(source), Some(targets)) = (doc_path, source, targets) {
        let document = match load_document("copy", &doc_path) {
            Ok(d) => d,
            Err(code) => return code,
        };
        let store = FileConfigStore::new(pair_path(config_path));
        let pair = match store.load_pair() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[bimflow copy] {e}");
                return 5;
            }
        };
        let (read, write) = match pair.names() {
            Ok(v) => v,
            Err(e) => {
                eprintln!("[bimflow copy] {e}");
                return 5;
            }
        };
        let request = match TransferRequest::fan_out(
            flows::LABEL_COPY_PAIR,
            scope,
            ElementId::new(source),
            targets,
            read,
            write,
        ) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("[bimflow copy] {e}");
                return 4;
            }
        };
        let mut engine = Engine::new(document);
        match engine.run_transfer(&request) {
            Ok(report) => {
                report_outcome(engine.last_invocation(), &report);
                persist_document("copy", engine.document(), save_path.as_deref().unwrap_or(&doc_path))
            }
            Err(e) => {
                eprintln!("[bimflow copy] {e}");
                4
            }
        }
    } else {
        eprintln!("Uso: bimflow copy --doc <ARCHIVO> --source <ID> --targets <ID,ID,...> [--config <ARCHIVO>] [--scope instance|type] [--save <ARCHIVO>]");
        2
    }
}

fn cmd_copy_link(args: &[String]) -> i32 {
    let mut doc_path: Option<String> = None;
    let mut source: Option<i64> = None;
    let mut targets: Option<Vec<ElementId>> = None;
    let mut config_path: Option<String> = None;
    let mut save_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--doc" => {
                i += 1;
                if i < args.len() {
                    doc_path = Some(args[i].clone());
                }
            }
            "--source" => {
                i += 1;
                if i < args.len() {
                    source = args[i].parse::<i64>().ok();
                }
            }
            "--targets" => {
                i += 1;
                if i < args.len() {
                    targets = parse_ids(&args[i]);
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].clone());
                }
            }
            "--save" => {
                i += 1;
                if i < args.len() {
                    save_path = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }

    if let (Some(doc_path), Some(source), Some(targets)) = (doc_path, source, targets) {
        let document = match load_document("copy-link", &doc_path) {
            Ok(d) => d,
            Err(code) => return code,
        };
        let store = FileConfigStore::new(pair_path(config_path));
        let (read, write) = match store.load_pair().and_then(|p| p.names()) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("[bimflow copy-link] {e}");
                return 5;
            }
        };
        // El flujo interactivo corre con la selección ya resuelta por argv.
        let mut selection = ScriptedSelection::new([
            ScriptedReply::One(ElementId::new(source)),
            ScriptedReply::Many(targets),
        ]);
        let mut engine = Engine::new(document);
        match flows::copy_from_link(&mut engine, &mut selection, &read, &write) {
            Ok(report) => {
                report_outcome(engine.last_invocation(), &report);
                persist_document(
                    "copy-link",
                    engine.document(),
                    save_path.as_deref().unwrap_or(&doc_path),
                )
            }
            Err(TransferError::Cancelled) => {
                println!("[bimflow copy-link] operación cancelada por el usuario");
                0
            }
            Err(e) => {
                eprintln!("[bimflow copy-link] {e}");
                4
            }
        }
    } else {
        eprintln!("Uso: bimflow copy-link --doc <ARCHIVO> --source <ID> --targets <ID,ID,...> [--config <ARCHIVO>] [--save <ARCHIVO>]");
        2
    }
}

fn cmd_mirror(args: &[String]) -> i32 {
    let mut doc_path: Option<String> = None;
    let mut source: Option<i64> = None;
    let mut targets: Option<Vec<ElementId>> = None;
    let mut names: Option<Vec<ParamName>> = None;
    let mut config_path: Option<String> = None;
    let mut scope = TransferScope::Instance;
    let mut save_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--doc" => {
                i += 1;
                if i < args.len() {
                    doc_path = Some(args[i].clone());
                }
            }
            "--source" => {
                i += 1;
                if i < args.len() {
                    source = args[i].parse::<i64>().ok();
                }
            }
            "--targets" => {
                i += 1;
                if i < args.len() {
                    targets = parse_ids(&args[i]);
                }
            }
            "--params" => {
                i += 1;
                if i < args.len() {
                    match parse_names(&args[i]) {
                        Some(n) => names = Some(n),
                        None => {
                            eprintln!("[bimflow mirror] lista de parámetros inválida");
                            return 2;
                        }
                    }
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].clone());
                }
            }
            "--scope" => {
                i += 1;
                if i < args.len() {
                    match parse_scope(&args[i]) {
                        Some(s) => scope = s,
                        None => {
                            eprintln!("[bimflow mirror] alcance desconocido '{}'", args[i]);
                            return 2;
                        }
                    }
                }
            }
            "--save" => {
                i += 1;
                if i < args.len() {
                    save_path = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }

    if let (Some(doc_path), Some(source), Some(targets)) = (doc_path, source, targets) {
        let document = match load_document("mirror", &doc_path) {
            Ok(d) => d,
            Err(code) => return code,
        };
        // Sin --params, el conjunto sale del archivo de configuración.
        let names = match names {
            Some(n) => n,
            None => {
                let store = FileConfigStore::new(mirror_path(config_path));
                match store.load_mirror().and_then(|m| m.names()) {
                    Ok(n) => n,
                    Err(e) => {
                        eprintln!("[bimflow mirror] {e}");
                        return 5;
                    }
                }
            }
        };
        let request = match TransferRequest::mirror(
            flows::LABEL_MIRROR,
            scope,
            ElementId::new(source),
            targets,
            names,
        ) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("[bimflow mirror] {e}");
                return 4;
            }
        };
        let mut engine = Engine::new(document);
        match engine.run_transfer(&request) {
            Ok(report) => {
                report_outcome(engine.last_invocation(), &report);
                persist_document("mirror", engine.document(), save_path.as_deref().unwrap_or(&doc_path))
            }
            Err(e) => {
                eprintln!("[bimflow mirror] {e}");
                4
            }
        }
    } else {
        eprintln!("Uso: bimflow mirror --doc <ARCHIVO> --source <ID> --targets <ID,ID,...> [--params <NOMBRE,NOMBRE,...>] [--config <ARCHIVO>] [--scope instance|type] [--save <ARCHIVO>]");
        2
    }
}

fn cmd_clear(args: &[String]) -> i32 {
    let mut doc_path: Option<String> = None;
    let mut param: Option<String> = None;
    let mut targets: Option<Vec<ElementId>> = None;
    let mut save_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--doc" => {
                i += 1;
                if i < args.len() {
                    doc_path = Some(args[i].clone());
                }
            }
            "--param" => {
                i += 1;
                if i < args.len() {
                    param = Some(args[i].clone());
                }
            }
            "--targets" => {
                i += 1;
                if i < args.len() {
                    match parse_ids(&args[i]) {
                        Some(t) => targets = Some(t),
                        None => {
                            eprintln!("[bimflow clear] lista de destinos inválida");
                            return 2;
                        }
                    }
                }
            }
            "--save" => {
                i += 1;
                if i < args.len() {
                    save_path = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }

    if let (Some(doc_path), Some(param)) = (doc_path, param) {
        let name = match ParamName::new(&param) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("[bimflow clear] {e}");
                return 2;
            }
        };
        let document = match load_document("clear", &doc_path) {
            Ok(d) => d,
            Err(code) => return code,
        };
        let mut engine = Engine::new(document);
        match flows::clear_parameter(&mut engine, &name, targets) {
            Ok(report) => {
                report_outcome(engine.last_invocation(), &report);
                persist_document("clear", engine.document(), save_path.as_deref().unwrap_or(&doc_path))
            }
            Err(e) => {
                eprintln!("[bimflow clear] {e}");
                4
            }
        }
    } else {
        eprintln!("Uso: bimflow clear --doc <ARCHIVO> --param <NOMBRE> [--targets <ID,ID,...>] [--save <ARCHIVO>]");
        2
    }
}

fn cmd_params(args: &[String]) -> i32 {
    let mut doc_path: Option<String> = None;
    let mut element: Option<i64> = None;
    let mut writable = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--doc" => {
                i += 1;
                if i < args.len() {
                    doc_path = Some(args[i].clone());
                }
            }
            "--element" => {
                i += 1;
                if i < args.len() {
                    element = args[i].parse::<i64>().ok();
                }
            }
            "--writable" => {
                writable = true;
            }
            _ => {}
        }
        i += 1;
    }

    if let (Some(doc_path), Some(element)) = (doc_path, element) {
        let document = match load_document("params", &doc_path) {
            Ok(d) => d,
            Err(code) => return code,
        };
        let id = ElementId::new(element);
        if !document.contains(id) {
            eprintln!("[bimflow params] el elemento {id} no existe en el documento");
            return 4;
        }
        let filter = if writable { ParamFilter::Writable } else { ParamFilter::All };
        for name in document.parameter_names(id, filter) {
            println!("{name}");
        }
        0
    } else {
        eprintln!("Uso: bimflow params --doc <ARCHIVO> --element <ID> [--writable]");
        2
    }
}

fn cmd_init_config(args: &[String]) -> i32 {
    let mut config_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        if args[i].as_str() == "--config" {
            i += 1;
            if i < args.len() {
                config_path = Some(args[i].clone());
            }
        }
        i += 1;
    }

    let store = FileConfigStore::new(pair_path(config_path));
    match store.seed_pair() {
        Ok(pair) => {
            match serde_json::to_string(&pair) {
                Ok(json) => println!("configuración en {}: {json}", store.path().display()),
                Err(e) => println!("configuración en {}: {e}", store.path().display()),
            }
            0
        }
        Err(e) => {
            eprintln!("[bimflow init-config] {e}");
            5
        }
    }
}

fn pair_path(flag: Option<String>) -> PathBuf {
    match flag {
        Some(p) => PathBuf::from(p),
        None => StorePaths::from_env().pair_path,
    }
}

fn mirror_path(flag: Option<String>) -> PathBuf {
    match flag {
        Some(p) => PathBuf::from(p),
        None => StorePaths::from_env().mirror_path,
    }
}

fn parse_scope(raw: &str) -> Option<TransferScope> {
    match raw {
        "instance" => Some(TransferScope::Instance),
        "type" => Some(TransferScope::Type),
        _ => None,
    }
}

fn parse_ids(raw: &str) -> Option<Vec<ElementId>> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        ids.push(ElementId::new(part.trim().parse::<i64>().ok()?));
    }
    Some(ids)
}

fn parse_names(raw: &str) -> Option<Vec<ParamName>> {
    let mut names = Vec::new();
    for part in raw.split(',') {
        names.push(ParamName::new(part).ok()?);
    }
    Some(names)
}

fn load_document(cmd: &str, path: &str) -> Result<InMemoryDocument, i32> {
    let raw = match std::fs::read_to_string(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[bimflow {cmd}] no se pudo leer '{path}': {e}");
            return Err(5);
        }
    };
    match InMemoryDocument::from_json(&raw) {
        Ok(d) => Ok(d),
        Err(e) => {
            eprintln!("[bimflow {cmd}] JSON inválido en '{path}': {e}");
            Err(3)
        }
    }
}

fn persist_document(cmd: &str, document: &InMemoryDocument, path: &str) -> i32 {
    let json = match document.to_json() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("[bimflow {cmd}] no se pudo serializar el documento: {e}");
            return 5;
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        eprintln!("[bimflow {cmd}] no se pudo escribir '{path}': {e}");
        return 5;
    }
    0
}

fn report_outcome(invocation: Option<uuid::Uuid>, report: &TransferReport) {
    if let Some(id) = invocation {
        println!("invocación {id}");
    }
    println!("{}", report.summary_line());
    if !report.is_clean() {
        println!("{report}");
    }
}

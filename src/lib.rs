//! BimFlow Rust Library
//!
//! Este crate actúa como la fachada del workspace:
//! - Reexporta el dominio documental (`bim-domain`), el motor de
//!   transferencia (`bim-core`), los adaptadores en memoria
//!   (`bim-adapters`) y la persistencia de configuración
//!   (`bim-persistence`).
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub use bim_adapters::faults::FailingDocument;
pub use bim_adapters::{DocumentBuilder, ElementSpec, InMemoryDocument, ScriptedReply, ScriptedSelection};
pub use bim_core::{
    flows, replay, variants, EventJournal, FailureKey, FailureReason, FailureTally, HostError,
    InMemoryJournal, InvocationSnapshot, ParamFilter, ParamSlot, ParameterStore, SelectionError,
    SelectionFilter, SelectionProvider, TransactionGuard, Transactional, TransferEngine,
    TransferError, TransferEvent, TransferEventKind, TransferMode, TransferPhase, TransferReport,
    TransferRequest, TransferScope, WriteError,
};
pub use bim_domain::{CategoryLabel, DomainError, ElementId, ParamName, ParamValue, StorageKind};
pub use bim_persistence::{init_dotenv, ConfigError, FileConfigStore, MirrorConfig, PairConfig, StorePaths};

#[cfg(test)]
mod tests {
    use super::{DomainError, ParamName, TransferError};

    #[test]
    fn transfer_error_tests() {
        let name = ParamName::new("Comments").unwrap();
        let e = TransferError::SourceValueEmpty { name }.to_string();
        assert_eq!(e, "el parámetro de lectura 'Comments' está vacío en el origen");
    }

    #[test]
    fn domain_error_tests() {
        let d = DomainError::Validation("x".into()).to_string();
        assert_eq!(d, "Error de validación: x");
    }
}

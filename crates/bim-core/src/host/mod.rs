//! Contratos del documento anfitrión.
//!
//! El motor nunca habla con un anfitrión concreto: todo pasa por estos
//! traits. `store` define el acceso a elementos y parámetros, `transaction`
//! el alcance transaccional de un lote y `selection` los prompts
//! interactivos. Las implementaciones reales viven fuera del core
//! (bim-adapters aporta las de memoria para pruebas y demos).

pub mod selection;
pub mod store;
pub mod transaction;

pub use selection::{SelectionError, SelectionFilter, SelectionProvider};
pub use store::{ParamFilter, ParamSlot, ParameterStore};
pub use transaction::{TransactionGuard, Transactional};

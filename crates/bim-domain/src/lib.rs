// bim-domain library entry point
pub mod category;
pub mod error;
pub mod id;
pub mod name;
pub mod value;
pub use category::CategoryLabel;
pub use error::DomainError;
pub use id::ElementId;
pub use name::ParamName;
pub use value::{ParamValue, StorageKind};

pub mod assemble;
pub mod config;
pub mod validate;

pub use assemble::{AssemblyOutcome, FieldAssembler};
pub use config::{ChainOutcome, ConfigResolver, ResolvedConfig, VisiblePart, VisibleParts};
pub use validate::validate_document;

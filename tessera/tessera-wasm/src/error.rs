//! Emission error taxonomy. Emission fails fast: the first offending
//! construct aborts with a descriptive error and no partial output is
//! returned.

use smol_str::SmolStr;
use thiserror::Error;

use tessera_ir::model::types::ValType;

/// Result alias for emission.
pub type Result<T> = core::result::Result<T, EmitError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("unknown opcode `{op}`")]
    UnknownOpcode { op: SmolStr },

    #[error("unresolved {kind} name `{name}`")]
    UnresolvedName { kind: &'static str, name: SmolStr },

    #[error("malformed control flow: {msg}")]
    MalformedControl { msg: &'static str },

    #[error("opcode value {code:#x} for `{op}` exceeds two bytes")]
    EncodingOverflow { op: SmolStr, code: u32 },

    #[error("constant of type {ty} has no encoding")]
    UnsupportedConstType { ty: ValType },
}

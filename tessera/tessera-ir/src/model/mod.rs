//! IR data model: value/descriptor types and the instruction tree.

pub mod node;
pub mod types;

pub use node::{FuncNode, Immediate, Literal, MemArg, Node};
pub use types::{Decl, ExportKind, ImportDesc, MemoryLimits, ValType};

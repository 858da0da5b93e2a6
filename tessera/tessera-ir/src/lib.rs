//! tessera-ir: instruction tree and builder layer for WebAssembly module
//! assembly.
//!
//! A host program constructs a [`Node`] tree through the [`build`]
//! constructors, hands selected functions to the passes crate for
//! optimization or vectorization, and serializes the module with the
//! emitter crate. The tree covers the core 1.0 instruction set plus the
//! fixed-width SIMD, bulk-memory, and threads/atomics proposals.

pub mod build;
pub mod model;

pub use model::{
    Decl, ExportKind, FuncNode, Immediate, ImportDesc, Literal, MemArg,
    MemoryLimits, Node, ValType,
};

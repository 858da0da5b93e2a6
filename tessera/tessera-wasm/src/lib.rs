//! tessera-wasm: deterministic single-pass serializer from the tessera
//! instruction tree to the WebAssembly binary format (core 1.0 plus
//! fixed-width SIMD, bulk memory, and threads/atomics), and the engine
//! feature probes the vectorizer's fallback decisions are wired from.
//!
//! ```
//! use tessera_ir::{build, ValType};
//!
//! let module = build::module(vec![build::func(
//!     "add",
//!     vec![build::param("a", ValType::I32), build::param("b", ValType::I32)],
//!     vec![ValType::I32],
//!     vec![],
//!     vec![build::binop(
//!         "i32.add",
//!         build::local_get("a"),
//!         build::local_get("b"),
//!     )],
//! )]);
//! let bytes = tessera_wasm::emit_binary(&module).unwrap();
//! assert_eq!(&bytes[0..4], b"\0asm");
//! ```

pub mod binary;
pub mod error;
pub mod opcode;
pub mod probe;

pub use error::{EmitError, Result};

use tessera_ir::model::node::Node;

/// Serialize a module node to a standards-compliant binary. Pure and
/// deterministic: the same tree always yields the same bytes.
pub fn emit_binary(module: &Node) -> Result<Vec<u8>> {
    binary::sections::emit_module(module)
}

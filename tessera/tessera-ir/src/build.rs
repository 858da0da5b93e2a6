//! Constructor layer: one function per structural form and instruction
//! family. A node built here, walked by the emitter, yields exactly the
//! byte sequence of the corresponding instruction with the given operands
//! and immediates.
//!
//! Memory operations default to the natural alignment of the access width
//! and offset 0; `Node::with_offset` / `Node::with_align` adjust them.

use smol_str::SmolStr;

use crate::model::node::{FuncNode, Immediate, Literal, MemArg, Node};
use crate::model::types::{Decl, ExportKind, ImportDesc, MemoryLimits, ValType};

/* ---------- Structural forms ---------- */

pub fn module(items: Vec<Node>) -> Node {
    Node::Module { items }
}

pub fn func(
    name: impl Into<SmolStr>,
    params: Vec<Decl>,
    results: Vec<ValType>,
    locals: Vec<Decl>,
    body: Vec<Node>,
) -> Node {
    Node::Func(Box::new(FuncNode {
        name: name.into(),
        params,
        results,
        locals,
        body,
    }))
}

pub fn param(name: impl Into<SmolStr>, ty: ValType) -> Decl {
    Decl::new(name, ty)
}

pub fn local(name: impl Into<SmolStr>, ty: ValType) -> Decl {
    Decl::new(name, ty)
}

pub fn import_func(
    module: impl Into<SmolStr>,
    field: impl Into<SmolStr>,
    name: impl Into<SmolStr>,
    params: Vec<ValType>,
    results: Vec<ValType>,
) -> Node {
    Node::Import {
        module: module.into(),
        field: field.into(),
        name: name.into(),
        desc: ImportDesc::Func { params, results },
    }
}

pub fn import_memory(
    module: impl Into<SmolStr>,
    field: impl Into<SmolStr>,
    limits: MemoryLimits,
) -> Node {
    Node::Import {
        module: module.into(),
        field: field.into(),
        name: SmolStr::default(),
        desc: ImportDesc::Memory(limits),
    }
}

pub fn import_global(
    module: impl Into<SmolStr>,
    field: impl Into<SmolStr>,
    name: impl Into<SmolStr>,
    ty: ValType,
    mutable: bool,
) -> Node {
    Node::Import {
        module: module.into(),
        field: field.into(),
        name: name.into(),
        desc: ImportDesc::Global { ty, mutable },
    }
}

pub fn import_table(
    module: impl Into<SmolStr>,
    field: impl Into<SmolStr>,
    min: u32,
    max: Option<u32>,
) -> Node {
    Node::Import {
        module: module.into(),
        field: field.into(),
        name: SmolStr::default(),
        desc: ImportDesc::Table { min, max },
    }
}

pub fn export(
    name: impl Into<SmolStr>,
    kind: ExportKind,
    target: impl Into<SmolStr>,
) -> Node {
    Node::Export {
        name: name.into(),
        kind,
        target: target.into(),
    }
}

pub fn memory(limits: MemoryLimits) -> Node {
    Node::Memory { limits }
}

/* ---------- Control flow ---------- */

pub fn block(label: impl Into<SmolStr>, body: Vec<Node>) -> Node {
    block_typed(label, ValType::Void, body)
}

pub fn block_typed(label: impl Into<SmolStr>, ty: ValType, body: Vec<Node>) -> Node {
    Node::Block {
        label: label.into(),
        ty,
        body,
    }
}

pub fn loop_(label: impl Into<SmolStr>, body: Vec<Node>) -> Node {
    loop_typed(label, ValType::Void, body)
}

pub fn loop_typed(label: impl Into<SmolStr>, ty: ValType, body: Vec<Node>) -> Node {
    Node::Loop {
        label: label.into(),
        ty,
        body,
    }
}

pub fn if_(condition: Node, consequent: Vec<Node>, alternate: Vec<Node>) -> Node {
    if_typed(ValType::Void, condition, consequent, alternate)
}

pub fn if_typed(
    ty: ValType,
    condition: Node,
    consequent: Vec<Node>,
    alternate: Vec<Node>,
) -> Node {
    Node::If {
        ty,
        condition: Box::new(condition),
        consequent,
        alternate,
    }
}

/* ---------- Stack operators ---------- */

pub fn br(label: impl Into<SmolStr>) -> Node {
    Node::Br {
        label: label.into(),
    }
}

pub fn br_if(label: impl Into<SmolStr>, condition: Node) -> Node {
    Node::BrIf {
        label: label.into(),
        condition: Box::new(condition),
    }
}

pub fn br_table(
    labels: Vec<SmolStr>,
    default: impl Into<SmolStr>,
    index: Node,
) -> Node {
    Node::BrTable {
        labels,
        default: default.into(),
        index: Box::new(index),
    }
}

pub fn call(target: impl Into<SmolStr>, args: Vec<Node>) -> Node {
    Node::Call {
        target: target.into(),
        args,
    }
}

/// `args` holds the call operands followed by the dynamic table index.
pub fn call_indirect(type_index: u32, table_index: u32, args: Vec<Node>) -> Node {
    Node::CallIndirect {
        type_index,
        table_index,
        args,
    }
}

pub fn local_get(name: impl Into<SmolStr>) -> Node {
    Node::LocalGet { name: name.into() }
}

pub fn local_set(name: impl Into<SmolStr>, value: Node) -> Node {
    Node::LocalSet {
        name: name.into(),
        value: Box::new(value),
    }
}

pub fn local_tee(name: impl Into<SmolStr>, value: Node) -> Node {
    Node::LocalTee {
        name: name.into(),
        value: Box::new(value),
    }
}

pub fn global_get(name: impl Into<SmolStr>) -> Node {
    Node::GlobalGet { name: name.into() }
}

pub fn global_set(name: impl Into<SmolStr>, value: Node) -> Node {
    Node::GlobalSet {
        name: name.into(),
        value: Box::new(value),
    }
}

pub fn ret(values: Vec<Node>) -> Node {
    Node::Return { values }
}

pub fn drop_(value: Node) -> Node {
    Node::Drop {
        value: Box::new(value),
    }
}

pub fn select(lhs: Node, rhs: Node, selector: Node) -> Node {
    Node::Select {
        args: vec![lhs, rhs, selector],
    }
}

pub fn unreachable() -> Node {
    Node::Unreachable
}

pub fn nop() -> Node {
    Node::Nop
}

/* ---------- Constants ---------- */

pub fn i32_const(v: i32) -> Node {
    Node::Const {
        ty: ValType::I32,
        value: Literal::I32(v),
    }
}

pub fn i64_const(v: i64) -> Node {
    Node::Const {
        ty: ValType::I64,
        value: Literal::I64(v),
    }
}

pub fn f32_const(v: f32) -> Node {
    Node::Const {
        ty: ValType::F32,
        value: Literal::F32(v),
    }
}

pub fn f64_const(v: f64) -> Node {
    Node::Const {
        ty: ValType::F64,
        value: Literal::F64(v),
    }
}

pub fn v128_const(bytes: [u8; 16]) -> Node {
    Node::Op {
        op: SmolStr::new("v128.const"),
        args: Vec::new(),
        imm: Immediate::V128(bytes),
    }
}

/* ---------- Numeric operations ---------- */

pub fn binop(op: impl Into<SmolStr>, lhs: Node, rhs: Node) -> Node {
    Node::Op {
        op: op.into(),
        args: vec![lhs, rhs],
        imm: Immediate::None,
    }
}

pub fn unop(op: impl Into<SmolStr>, operand: Node) -> Node {
    Node::Op {
        op: op.into(),
        args: vec![operand],
        imm: Immediate::None,
    }
}

/// Generic operation with no immediate; escape hatch for anything the
/// named constructors do not cover.
pub fn raw(op: impl Into<SmolStr>, args: Vec<Node>) -> Node {
    Node::Op {
        op: op.into(),
        args,
        imm: Immediate::None,
    }
}

/* ---------- Memory operations ---------- */

/// Natural access width in bytes for a memory or atomic operation name.
///
/// Sub-width accesses carry their bit width in the name (`load8_s`,
/// `rmw16.add_u`); lane-group loads (`load8x8_s`) always read 8 bytes;
/// otherwise the width is that of the leading value type.
pub fn access_width(op: &str) -> u32 {
    // v128.load8x8_s / load16x4_s / load32x2_u all read one 64-bit half.
    if op.contains("x8_") || op.contains("x4_") || op.contains("x2_") {
        return 8;
    }
    for (marker, width) in [
        ("8", 1u32),
        ("16", 2),
        ("32", 4),
        ("64", 8),
    ] {
        for key in ["load", "store", "rmw", "wait"] {
            let tag = format!("{key}{marker}");
            if let Some(pos) = op.find(&tag) {
                // The digits must end the access tag ("load8_s", "rmw16.",
                // end of string), not open a longer number.
                let rest = &op[pos + tag.len()..];
                if rest.is_empty() || rest.starts_with(['_', '.']) {
                    return width;
                }
            }
        }
    }
    if op.starts_with("v128") {
        16
    } else if op.starts_with("i64") || op.starts_with("f64") {
        8
    } else {
        4
    }
}

fn mem_op(op: &str, args: Vec<Node>) -> Node {
    Node::Op {
        op: SmolStr::new(op),
        args,
        imm: Immediate::Mem(MemArg::natural(access_width(op))),
    }
}

/// Generic load; `op` names the access (`"i32.load"`, `"i64.load32_u"`).
pub fn load(op: &str, addr: Node) -> Node {
    mem_op(op, vec![addr])
}

/// Generic store; `op` names the access (`"f64.store"`, `"i32.store8"`).
pub fn store(op: &str, addr: Node, value: Node) -> Node {
    mem_op(op, vec![addr, value])
}

pub fn i32_load(addr: Node) -> Node {
    load("i32.load", addr)
}

pub fn i64_load(addr: Node) -> Node {
    load("i64.load", addr)
}

pub fn f32_load(addr: Node) -> Node {
    load("f32.load", addr)
}

pub fn f64_load(addr: Node) -> Node {
    load("f64.load", addr)
}

pub fn v128_load(addr: Node) -> Node {
    load("v128.load", addr)
}

pub fn i32_store(addr: Node, value: Node) -> Node {
    store("i32.store", addr, value)
}

pub fn i64_store(addr: Node, value: Node) -> Node {
    store("i64.store", addr, value)
}

pub fn f32_store(addr: Node, value: Node) -> Node {
    store("f32.store", addr, value)
}

pub fn f64_store(addr: Node, value: Node) -> Node {
    store("f64.store", addr, value)
}

pub fn v128_store(addr: Node, value: Node) -> Node {
    store("v128.store", addr, value)
}

pub fn memory_size() -> Node {
    raw("memory.size", Vec::new())
}

pub fn memory_grow(delta: Node) -> Node {
    raw("memory.grow", vec![delta])
}

pub fn memory_init(data_index: u32, dst: Node, src: Node, len: Node) -> Node {
    Node::Op {
        op: SmolStr::new("memory.init"),
        args: vec![dst, src, len],
        imm: Immediate::Data(data_index),
    }
}

pub fn memory_copy(dst: Node, src: Node, len: Node) -> Node {
    raw("memory.copy", vec![dst, src, len])
}

pub fn memory_fill(dst: Node, value: Node, len: Node) -> Node {
    raw("memory.fill", vec![dst, value, len])
}

/* ---------- SIMD ---------- */

/// Lane-broadcasting constructor; `op` is one of the `*.splat` names.
pub fn splat(op: impl Into<SmolStr>, value: Node) -> Node {
    Node::Op {
        op: op.into(),
        args: vec![value],
        imm: Immediate::None,
    }
}

pub fn extract_lane(op: impl Into<SmolStr>, vector: Node, lane: u8) -> Node {
    Node::Op {
        op: op.into(),
        args: vec![vector],
        imm: Immediate::Lane(lane),
    }
}

pub fn replace_lane(
    op: impl Into<SmolStr>,
    vector: Node,
    value: Node,
    lane: u8,
) -> Node {
    Node::Op {
        op: op.into(),
        args: vec![vector, value],
        imm: Immediate::Lane(lane),
    }
}

pub fn i8x16_shuffle(lhs: Node, rhs: Node, lanes: [u8; 16]) -> Node {
    Node::Op {
        op: SmolStr::new("i8x16.shuffle"),
        args: vec![lhs, rhs],
        imm: Immediate::V128(lanes),
    }
}

/* ---------- Atomics ---------- */

/// Generic atomic access; `op` names the operation
/// (`"i32.atomic.rmw.add"`, `"memory.atomic.wait32"`). The memarg
/// defaults to the operation's natural alignment.
pub fn atomic(op: &str, args: Vec<Node>) -> Node {
    mem_op(op, args)
}

pub fn atomic_fence() -> Node {
    raw("atomic.fence", Vec::new())
}

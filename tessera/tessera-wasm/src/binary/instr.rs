//! Instruction stream emission. Three disciplines, chosen by node form:
//! control flow (opcode, block type byte, nested bodies, end), stack
//! operators (operands first, opcode, resolved index immediates), and
//! general operations (operands, possibly prefixed opcode, then the
//! operation's own immediates).

use crate::binary::writer::ByteWriter;
use crate::binary::{ELSE_MARKER, END};
use crate::error::{EmitError, Result};
use crate::opcode::{opcode, split_prefixed};

use tessera_ir::model::node::{Immediate, Literal, Node};
use tessera_ir::model::types::ValType;

use super::context::EmitContext;

// Single-byte opcodes the structural and stack-operator forms encode
// directly.
const OP_BLOCK: u8 = 0x02;
const OP_LOOP: u8 = 0x03;
const OP_IF: u8 = 0x04;
const OP_BR: u8 = 0x0C;
const OP_BR_IF: u8 = 0x0D;
const OP_BR_TABLE: u8 = 0x0E;
const OP_RETURN: u8 = 0x0F;
const OP_CALL: u8 = 0x10;
const OP_CALL_INDIRECT: u8 = 0x11;
const OP_DROP: u8 = 0x1A;
const OP_SELECT: u8 = 0x1B;
const OP_LOCAL_GET: u8 = 0x20;
const OP_LOCAL_SET: u8 = 0x21;
const OP_LOCAL_TEE: u8 = 0x22;
const OP_GLOBAL_GET: u8 = 0x23;
const OP_GLOBAL_SET: u8 = 0x24;
const OP_UNREACHABLE: u8 = 0x00;
const OP_NOP: u8 = 0x01;
const OP_I32_CONST: u8 = 0x41;
const OP_I64_CONST: u8 = 0x42;
const OP_F32_CONST: u8 = 0x43;
const OP_F64_CONST: u8 = 0x44;

/// Emit one instruction node into the current body.
pub fn emit_node(w: &mut ByteWriter, cx: &mut EmitContext, node: &Node) -> Result<()> {
    match node {
        // Control flow.
        Node::Block { label, ty, body } => {
            w.u8(OP_BLOCK);
            w.u8(ty.byte());
            cx.push_label(label.clone());
            emit_all(w, cx, body)?;
            w.u8(END);
            cx.pop_label();
            Ok(())
        }
        Node::Loop { label, ty, body } => {
            w.u8(OP_LOOP);
            w.u8(ty.byte());
            cx.push_label(label.clone());
            emit_all(w, cx, body)?;
            w.u8(END);
            cx.pop_label();
            Ok(())
        }
        Node::If {
            ty,
            condition,
            consequent,
            alternate,
        } => {
            // The condition must be on the stack before the opcode.
            emit_node(w, cx, condition)?;
            w.u8(OP_IF);
            w.u8(ty.byte());
            cx.push_label(Default::default());
            emit_all(w, cx, consequent)?;
            if !alternate.is_empty() {
                w.u8(ELSE_MARKER);
                emit_all(w, cx, alternate)?;
            }
            w.u8(END);
            cx.pop_label();
            Ok(())
        }

        // Stack operators.
        Node::Br { label } => {
            w.u8(OP_BR);
            w.u32(cx.resolve_label(label)?);
            Ok(())
        }
        Node::BrIf { label, condition } => {
            emit_node(w, cx, condition)?;
            w.u8(OP_BR_IF);
            w.u32(cx.resolve_label(label)?);
            Ok(())
        }
        Node::BrTable {
            labels,
            default,
            index,
        } => {
            emit_node(w, cx, index)?;
            w.u8(OP_BR_TABLE);
            w.u32(labels.len() as u32);
            for label in labels {
                let depth = cx.resolve_label(label)?;
                w.u32(depth);
            }
            w.u32(cx.resolve_label(default)?);
            Ok(())
        }
        Node::Call { target, args } => {
            emit_all(w, cx, args)?;
            w.u8(OP_CALL);
            w.u32(cx.resolve_func(target)?);
            Ok(())
        }
        Node::CallIndirect {
            type_index,
            table_index,
            args,
        } => {
            emit_all(w, cx, args)?;
            w.u8(OP_CALL_INDIRECT);
            w.u32(*type_index);
            w.u32(*table_index);
            Ok(())
        }
        Node::LocalGet { name } => {
            w.u8(OP_LOCAL_GET);
            w.u32(cx.resolve_local(name)?);
            Ok(())
        }
        Node::LocalSet { name, value } => {
            emit_node(w, cx, value)?;
            w.u8(OP_LOCAL_SET);
            w.u32(cx.resolve_local(name)?);
            Ok(())
        }
        Node::LocalTee { name, value } => {
            emit_node(w, cx, value)?;
            w.u8(OP_LOCAL_TEE);
            w.u32(cx.resolve_local(name)?);
            Ok(())
        }
        Node::GlobalGet { name } => {
            w.u8(OP_GLOBAL_GET);
            w.u32(cx.resolve_global(name)?);
            Ok(())
        }
        Node::GlobalSet { name, value } => {
            emit_node(w, cx, value)?;
            w.u8(OP_GLOBAL_SET);
            w.u32(cx.resolve_global(name)?);
            Ok(())
        }
        Node::Return { values } => {
            emit_all(w, cx, values)?;
            w.u8(OP_RETURN);
            Ok(())
        }
        Node::Drop { value } => {
            emit_node(w, cx, value)?;
            w.u8(OP_DROP);
            Ok(())
        }
        Node::Select { args } => {
            emit_all(w, cx, args)?;
            w.u8(OP_SELECT);
            Ok(())
        }
        Node::Unreachable => {
            w.u8(OP_UNREACHABLE);
            Ok(())
        }
        Node::Nop => {
            w.u8(OP_NOP);
            Ok(())
        }

        // General operations.
        Node::Const { ty, value } => emit_const(w, *ty, *value),
        Node::Op { op, args, imm } => {
            emit_all(w, cx, args)?;
            let code = opcode(op).ok_or_else(|| EmitError::UnknownOpcode {
                op: op.clone(),
            })?;
            if code > 0xFFFF {
                return Err(EmitError::EncodingOverflow {
                    op: op.clone(),
                    code,
                });
            }
            match split_prefixed(code) {
                Some((prefix, sub)) => {
                    w.u8(prefix);
                    // Sub-codes are LEB128 integers, not raw bytes.
                    w.u32(sub);
                }
                None => w.u8(code as u8),
            }
            emit_immediate(w, op, imm);
            Ok(())
        }

        Node::Module { .. }
        | Node::Func(_)
        | Node::Import { .. }
        | Node::Export { .. }
        | Node::Memory { .. } => Err(EmitError::MalformedControl {
            msg: "module-level node inside a function body",
        }),
    }
}

pub fn emit_all(w: &mut ByteWriter, cx: &mut EmitContext, nodes: &[Node]) -> Result<()> {
    for node in nodes {
        emit_node(w, cx, node)?;
    }
    Ok(())
}

fn emit_const(w: &mut ByteWriter, ty: ValType, value: Literal) -> Result<()> {
    match (ty, value) {
        (ValType::I32, Literal::I32(v)) => {
            w.u8(OP_I32_CONST);
            w.s32(v);
        }
        (ValType::I64, Literal::I64(v)) => {
            w.u8(OP_I64_CONST);
            w.s64(v);
        }
        (ValType::F32, Literal::F32(v)) => {
            w.u8(OP_F32_CONST);
            w.f32(v);
        }
        (ValType::F64, Literal::F64(v)) => {
            w.u8(OP_F64_CONST);
            w.f64(v);
        }
        _ => return Err(EmitError::UnsupportedConstType { ty }),
    }
    Ok(())
}

fn emit_immediate(w: &mut ByteWriter, op: &str, imm: &Immediate) {
    match imm {
        Immediate::None => {}
        Immediate::Mem(mem) => {
            // Alignment travels as its log2.
            w.u32(mem.align.max(1).trailing_zeros());
            w.u32(mem.offset);
        }
        Immediate::Lane(lane) => w.u8(*lane),
        Immediate::V128(bytes) => w.bytes(bytes),
        Immediate::Data(index) => w.u32(*index),
    }
    // Reserved trailing bytes mandated per operation.
    match op {
        "memory.size" | "memory.grow" | "memory.fill" | "memory.init"
        | "atomic.fence" => w.u8(0x00),
        "memory.copy" => {
            w.u8(0x00);
            w.u8(0x00);
        }
        _ => {}
    }
}

//! Algebraic peephole simplification on binary operations: additive and
//! shift identities with zero, multiplicative identity with one, and
//! integer multiply by zero. Float multiply by zero is left alone (NaN
//! and infinity operands make it value-changing).

use tessera_ir::build;
use tessera_ir::model::node::{Literal, Node};

use crate::rewrite::map_bottom_up;

/// Apply algebraic identities throughout the tree.
pub fn simplify(node: &Node) -> Node {
    map_bottom_up(node, &mut simplify_node)
}

fn simplify_node(node: Node) -> Node {
    let Node::Op { op, mut args, imm } = node else {
        return node;
    };
    if args.len() != 2 {
        return Node::Op { op, args, imm };
    }
    match op.as_str() {
        "i32.add" | "i64.add" | "f32.add" | "f64.add" => {
            if is_zero(&args[1]) {
                return args.swap_remove(0);
            }
            if is_zero(&args[0]) {
                return args.swap_remove(1);
            }
        }
        "i32.sub" | "i64.sub" | "f32.sub" | "f64.sub" => {
            if is_zero(&args[1]) {
                return args.swap_remove(0);
            }
        }
        "i32.shl" | "i32.shr_s" | "i32.shr_u" | "i64.shl" | "i64.shr_s"
        | "i64.shr_u" => {
            if is_zero(&args[1]) {
                return args.swap_remove(0);
            }
        }
        "i32.mul" | "i64.mul" | "f32.mul" | "f64.mul" => {
            if is_one(&args[1]) {
                return args.swap_remove(0);
            }
            if is_one(&args[0]) {
                return args.swap_remove(1);
            }
            if op == "i32.mul" && (is_zero(&args[0]) || is_zero(&args[1])) {
                return build::i32_const(0);
            }
            if op == "i64.mul" && (is_zero(&args[0]) || is_zero(&args[1])) {
                return build::i64_const(0);
            }
        }
        _ => {}
    }
    Node::Op { op, args, imm }
}

/// Zero of any numeric type; both float zero signs count.
fn is_zero(node: &Node) -> bool {
    match node {
        Node::Const { value, .. } => match value {
            Literal::I32(v) => *v == 0,
            Literal::I64(v) => *v == 0,
            Literal::F32(v) => *v == 0.0,
            Literal::F64(v) => *v == 0.0,
        },
        _ => false,
    }
}

fn is_one(node: &Node) -> bool {
    match node {
        Node::Const { value, .. } => match value {
            Literal::I32(v) => *v == 1,
            Literal::I64(v) => *v == 1,
            Literal::F32(v) => *v == 1.0,
            Literal::F64(v) => *v == 1.0,
        },
        _ => false,
    }
}

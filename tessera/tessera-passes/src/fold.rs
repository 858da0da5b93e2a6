//! Constant folding. A binary operation whose operands are both constant
//! collapses to a single constant with the operation's wrap semantics.
//! No propagation happens across local boundaries.

use tessera_ir::build;
use tessera_ir::model::node::{Literal, Node};

use crate::rewrite::map_bottom_up;

/// Fold constant subexpressions throughout the tree.
pub fn fold_constants(node: &Node) -> Node {
    map_bottom_up(node, &mut fold_node)
}

fn fold_node(node: Node) -> Node {
    let Node::Op { op, args, imm } = node else {
        return node;
    };
    if args.len() == 2 {
        if let (
            Node::Const { value: lhs, .. },
            Node::Const { value: rhs, .. },
        ) = (&args[0], &args[1])
        {
            if let Some(folded) = fold_binop(op.as_str(), *lhs, *rhs) {
                return folded;
            }
        }
    }
    Node::Op { op, args, imm }
}

fn fold_binop(op: &str, lhs: Literal, rhs: Literal) -> Option<Node> {
    match (op, lhs, rhs) {
        ("i32.add", Literal::I32(a), Literal::I32(b)) => {
            Some(build::i32_const(a.wrapping_add(b)))
        }
        ("i32.sub", Literal::I32(a), Literal::I32(b)) => {
            Some(build::i32_const(a.wrapping_sub(b)))
        }
        // Two's-complement 32-bit wrap.
        ("i32.mul", Literal::I32(a), Literal::I32(b)) => {
            Some(build::i32_const(a.wrapping_mul(b)))
        }
        // Division by zero traps at runtime; leave it in place. The
        // i32::MIN / -1 overflow case traps as well.
        ("i32.div_s", Literal::I32(a), Literal::I32(b)) => {
            if b == 0 || (a == i32::MIN && b == -1) {
                None
            } else {
                Some(build::i32_const(a.wrapping_div(b)))
            }
        }
        // Shift counts are taken modulo 32.
        ("i32.shl", Literal::I32(a), Literal::I32(b)) => {
            Some(build::i32_const(a.wrapping_shl(b as u32)))
        }
        ("i32.shr_s", Literal::I32(a), Literal::I32(b)) => {
            Some(build::i32_const(a.wrapping_shr(b as u32)))
        }
        ("f32.add", Literal::F32(a), Literal::F32(b)) => {
            Some(build::f32_const(a + b))
        }
        ("f32.sub", Literal::F32(a), Literal::F32(b)) => {
            Some(build::f32_const(a - b))
        }
        ("f32.mul", Literal::F32(a), Literal::F32(b)) => {
            Some(build::f32_const(a * b))
        }
        ("f32.div", Literal::F32(a), Literal::F32(b)) => {
            Some(build::f32_const(a / b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_ir::build;

    fn add(a: i32, b: i32) -> Node {
        build::binop("i32.add", build::i32_const(a), build::i32_const(b))
    }

    #[test]
    fn folds_nested_arithmetic() {
        let tree = build::binop("i32.mul", add(2, 3), build::i32_const(4));
        assert_eq!(fold_constants(&tree), build::i32_const(20));
    }

    #[test]
    fn mul_wraps_to_32_bits() {
        let tree = build::binop(
            "i32.mul",
            build::i32_const(0x4000_0000),
            build::i32_const(4),
        );
        assert_eq!(fold_constants(&tree), build::i32_const(0));
    }

    #[test]
    fn shift_count_is_masked() {
        let tree = build::binop("i32.shl", build::i32_const(1), build::i32_const(33));
        assert_eq!(fold_constants(&tree), build::i32_const(2));
    }

    #[test]
    fn division_by_zero_left_unfolded() {
        let tree = build::binop("i32.div_s", build::i32_const(7), build::i32_const(0));
        assert_eq!(fold_constants(&tree), tree);
    }

    #[test]
    fn float_arithmetic_folds() {
        let tree = build::binop(
            "f32.div",
            build::f32_const(1.0),
            build::f32_const(4.0),
        );
        assert_eq!(fold_constants(&tree), build::f32_const(0.25));
    }

    #[test]
    fn non_const_operands_untouched() {
        let tree = build::binop("i32.add", build::local_get("x"), build::i32_const(0));
        assert_eq!(fold_constants(&tree), tree);
    }
}

//! Scalar-to-SIMD rewriting of a function body.
//!
//! The rewrite lifts i32/f32 map-style kernels to their 128-bit
//! equivalents: scalar loads and stores widen to `v128` accesses, mapped
//! arithmetic moves to the 4-lane form, surviving scalar constants are
//! broadcast with a splat, and the canonical `+1` index increment is
//! lifted to `+4` so each iteration advances one lane group. It does not
//! prove iterations independent and it does not recognize reductions;
//! kernels outside the map shape keep their scalar meaning only by
//! falling back (`success = false`).

use smol_str::SmolStr;

use tessera_ir::build;
use tessera_ir::model::node::{Immediate, Literal, MemArg, Node};
use tessera_ir::model::types::ValType;

use crate::rewrite::map_bottom_up;

/// Scalar element type a kernel is lifted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorTarget {
    I32,
    F32,
}

#[derive(Debug, Clone, Copy)]
pub struct VectorizeOptions {
    pub target: VectorTarget,
    /// Engine capability, as reported by the host's probe. When false the
    /// input function is returned untouched.
    pub simd_available: bool,
}

impl Default for VectorizeOptions {
    fn default() -> Self {
        Self {
            target: VectorTarget::F32,
            simd_available: true,
        }
    }
}

/// Result of a vectorization attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Vectorized {
    pub func: Node,
    /// Lanes processed per iteration: 4 after a successful rewrite, 1
    /// otherwise.
    pub width: u32,
    pub success: bool,
}

/// Rewrite a scalar function into its 4-lane SIMD form, or hand the
/// input back unchanged when the rewrite cannot apply.
pub fn auto_vectorize(func: &Node, opts: &VectorizeOptions) -> Vectorized {
    let fallback = || Vectorized {
        func: func.clone(),
        width: 1,
        success: false,
    };

    let Node::Func(inner) = func else {
        return fallback();
    };
    if !opts.simd_available {
        return fallback();
    }
    if !func.any(|n| is_mapped(n, opts.target)) {
        return fallback();
    }

    let rewritten = map_bottom_up(func, &mut |n| vector_node(n, opts.target));
    let Node::Func(mut out) = rewritten else {
        return fallback();
    };
    out.name = SmolStr::new(format!("{}_simd", inner.name));

    Vectorized {
        func: Node::Func(out),
        width: 4,
        success: true,
    }
}

fn scalar_load(target: VectorTarget) -> &'static str {
    match target {
        VectorTarget::I32 => "i32.load",
        VectorTarget::F32 => "f32.load",
    }
}

fn scalar_store(target: VectorTarget) -> &'static str {
    match target {
        VectorTarget::I32 => "i32.store",
        VectorTarget::F32 => "f32.store",
    }
}

/// Mapped scalar arithmetic and its 4-lane counterpart. Bitwise ops move
/// to the type-agnostic `v128` form.
fn mapped_op(op: &str, target: VectorTarget) -> Option<&'static str> {
    match target {
        VectorTarget::I32 => match op {
            "i32.add" => Some("i32x4.add"),
            "i32.sub" => Some("i32x4.sub"),
            "i32.mul" => Some("i32x4.mul"),
            "i32.and" => Some("v128.and"),
            "i32.or" => Some("v128.or"),
            "i32.xor" => Some("v128.xor"),
            "i32.not" => Some("v128.not"),
            _ => None,
        },
        VectorTarget::F32 => match op {
            "f32.add" => Some("f32x4.add"),
            "f32.sub" => Some("f32x4.sub"),
            "f32.mul" => Some("f32x4.mul"),
            "f32.div" => Some("f32x4.div"),
            "f32.min" => Some("f32x4.min"),
            "f32.max" => Some("f32x4.max"),
            _ => None,
        },
    }
}

fn is_mapped(node: &Node, target: VectorTarget) -> bool {
    match node.op_name() {
        Some(op) => {
            op == scalar_load(target)
                || op == scalar_store(target)
                || mapped_op(op, target).is_some()
        }
        None => false,
    }
}

/// Widened alignment: byte-aligned scalar accesses stay packed, anything
/// else is promoted to the full 16-byte alignment.
fn simd_align(scalar: MemArg) -> MemArg {
    MemArg {
        offset: scalar.offset,
        align: if scalar.align == 1 { 1 } else { 16 },
    }
}

/// The canonical loop-index increment `i32.add(expr, 1)`; kept scalar
/// with the step lifted to one lane group.
fn stride_increment(op: &str, args: &[Node]) -> bool {
    op == "i32.add"
        && args.len() == 2
        && matches!(
            &args[1],
            Node::Const {
                value: Literal::I32(1),
                ..
            }
        )
}

fn splat_const(node: Node, target: VectorTarget) -> Node {
    match (&node, target) {
        (
            Node::Const {
                ty: ValType::I32, ..
            },
            VectorTarget::I32,
        ) => build::splat("i32x4.splat", node),
        (
            Node::Const {
                ty: ValType::F32, ..
            },
            VectorTarget::F32,
        ) => build::splat("f32x4.splat", node),
        _ => node,
    }
}

fn vector_node(node: Node, target: VectorTarget) -> Node {
    let Node::Op { op, mut args, imm } = node else {
        // Control flow and the other structural forms recurse through the
        // shared traversal; nothing to do at this level.
        return node;
    };

    if op == scalar_load(target) {
        if let Immediate::Mem(mem) = imm {
            return Node::Op {
                op: SmolStr::new("v128.load"),
                args,
                imm: Immediate::Mem(simd_align(mem)),
            };
        }
    }

    if op == scalar_store(target) {
        if let Immediate::Mem(mem) = imm {
            if let Some(value) = args.pop() {
                args.push(splat_const(value, target));
            }
            return Node::Op {
                op: SmolStr::new("v128.store"),
                args,
                imm: Immediate::Mem(simd_align(mem)),
            };
        }
    }

    if stride_increment(&op, &args) {
        args[1] = build::i32_const(4);
        return Node::Op { op, args, imm };
    }

    if let Some(vector) = mapped_op(&op, target) {
        let args = args
            .into_iter()
            .map(|a| splat_const(a, target))
            .collect();
        return Node::Op {
            op: SmolStr::new(vector),
            args,
            imm,
        };
    }

    // Anything else (pointer arithmetic in f32 mode included) passes
    // through with its already-rewritten children.
    Node::Op { op, args, imm }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_ir::build;

    /// loads f32 at `i`, adds 1.0, stores it back, steps `i` by one.
    fn f32_map_kernel() -> Node {
        build::func(
            "bump",
            vec![build::param("i", ValType::I32)],
            vec![],
            vec![],
            vec![
                build::f32_store(
                    build::local_get("i"),
                    build::binop(
                        "f32.add",
                        build::f32_load(build::local_get("i")),
                        build::f32_const(1.0),
                    ),
                ),
                build::local_set(
                    "i",
                    build::binop(
                        "i32.add",
                        build::local_get("i"),
                        build::i32_const(1),
                    ),
                ),
            ],
        )
    }

    #[test]
    fn f32_map_is_lifted() {
        let out = auto_vectorize(&f32_map_kernel(), &VectorizeOptions::default());
        assert!(out.success);
        assert_eq!(out.width, 4);
        let Node::Func(func) = &out.func else {
            panic!("func expected");
        };
        assert_eq!(func.name, "bump_simd");
        assert!(out.func.any(|n| n.op_name() == Some("v128.load")));
        assert!(out.func.any(|n| n.op_name() == Some("v128.store")));
        assert!(out.func.any(|n| n.op_name() == Some("f32x4.add")));
        assert!(out.func.any(|n| n.op_name() == Some("f32x4.splat")));
        // The index increment stays scalar, stepping one lane group.
        assert!(out.func.any(|n| match n {
            Node::Op { op, args, .. } => {
                op == "i32.add" && args[1] == build::i32_const(4)
            }
            _ => false,
        }));
    }

    #[test]
    fn alignment_promoted_except_packed() {
        let packed = build::func(
            "p",
            vec![],
            vec![],
            vec![],
            vec![build::f32_store(
                build::local_get("i"),
                build::f32_load(build::local_get("i")).with_align(1),
            )],
        );
        let out = auto_vectorize(&packed, &VectorizeOptions::default());

        fn collect(n: &Node, out: &mut Vec<u32>) {
            if let Node::Op {
                imm: Immediate::Mem(mem),
                ..
            } = n
            {
                out.push(mem.align);
            }
            n.for_each_child(|c| collect(c, out));
        }
        let mut aligns = Vec::new();
        collect(&out.func, &mut aligns);
        aligns.sort_unstable();
        assert_eq!(aligns, vec![1, 16]);
    }

    #[test]
    fn no_mapped_ops_means_fallback() {
        let f = build::func(
            "scalar_only",
            vec![],
            vec![ValType::I64],
            vec![],
            vec![build::i64_const(3)],
        );
        let out = auto_vectorize(&f, &VectorizeOptions::default());
        assert!(!out.success);
        assert_eq!(out.width, 1);
        assert_eq!(out.func, f);
    }

    #[test]
    fn missing_engine_support_means_fallback() {
        let out = auto_vectorize(
            &f32_map_kernel(),
            &VectorizeOptions {
                simd_available: false,
                ..Default::default()
            },
        );
        assert!(!out.success);
        assert_eq!(out.func, f32_map_kernel());
    }

    #[test]
    fn i32_mode_maps_bitwise_to_v128() {
        let f = build::func(
            "mask",
            vec![],
            vec![],
            vec![],
            vec![build::i32_store(
                build::local_get("p"),
                build::binop(
                    "i32.and",
                    build::i32_load(build::local_get("p")),
                    build::i32_const(0xFF),
                ),
            )],
        );
        let out = auto_vectorize(
            &f,
            &VectorizeOptions {
                target: VectorTarget::I32,
                simd_available: true,
            },
        );
        assert!(out.success);
        assert!(out.func.any(|n| n.op_name() == Some("v128.and")));
        assert!(out.func.any(|n| n.op_name() == Some("i32x4.splat")));
    }

    #[test]
    fn f32_mode_leaves_pointer_arithmetic_scalar() {
        let f = build::func(
            "addr",
            vec![],
            vec![],
            vec![],
            vec![build::f32_store(
                build::binop(
                    "i32.mul",
                    build::local_get("i"),
                    build::i32_const(4),
                ),
                build::f32_load(build::local_get("i")),
            )],
        );
        let out = auto_vectorize(&f, &VectorizeOptions::default());
        assert!(out.success);
        assert!(out.func.any(|n| n.op_name() == Some("i32.mul")));
        assert!(!out.func.any(|n| n.op_name() == Some("i32x4.mul")));
    }
}

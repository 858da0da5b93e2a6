//! Loop unrolling for the canonical counted-loop shape:
//!
//! ```text
//! loop L {
//!     br_if OUT (exit condition)
//!     ... kernel ...
//!     local.set i (i32.add (local.get i) (i32.const step))
//!     br L
//! }
//! ```
//!
//! The rewrite keeps the exit check once per macro-iteration and
//! replicates the kernel `factor` times, inserting an increment before
//! every copy after the first and a final increment before the back
//! edge, so the m-th copy observes `i + m * step`. The iteration count
//! must be a multiple of `factor * step`; no remainder loop is emitted.

use tessera_ir::model::node::{Literal, Node};

use crate::rewrite::map_bottom_up;

/// Unroll every matching counted loop in the tree by `factor`.
pub fn unroll_loops(node: &Node, factor: u32) -> Node {
    if factor <= 1 {
        return node.clone();
    }
    map_bottom_up(node, &mut |n| unroll_node(n, factor))
}

fn unroll_node(node: Node, factor: u32) -> Node {
    let Node::Loop { label, ty, body } = node else {
        return node;
    };
    if !is_counted_shape(&label, &body) {
        return Node::Loop { label, ty, body };
    }

    let check = &body[0];
    let kernel = &body[1..body.len() - 2];
    let increment = &body[body.len() - 2];
    let back_edge = &body[body.len() - 1];

    let mut unrolled =
        Vec::with_capacity(1 + factor as usize * (kernel.len() + 1) + 1);
    unrolled.push(check.clone());
    for m in 0..factor {
        if m > 0 {
            unrolled.push(increment.clone());
        }
        unrolled.extend(kernel.iter().cloned());
    }
    unrolled.push(increment.clone());
    unrolled.push(back_edge.clone());

    Node::Loop {
        label,
        ty,
        body: unrolled,
    }
}

/// The shape check: leading exit `br_if`, a penultimate constant-step
/// increment of one induction local, a trailing back edge to the loop's
/// own label, and a kernel that never steps the induction local itself.
/// Replication advances the local between copies, so a kernel write
/// would change meaning; it also stops an unrolled loop from matching
/// a second time.
fn is_counted_shape(label: &str, body: &[Node]) -> bool {
    if body.len() < 4 {
        return false;
    }
    if !matches!(body[0], Node::BrIf { .. }) {
        return false;
    }
    if !matches!(&body[body.len() - 1], Node::Br { label: l } if l == label) {
        return false;
    }
    let Some((var, _)) = induction_step(&body[body.len() - 2]) else {
        return false;
    };
    !body[1..body.len() - 2].iter().any(|n| writes_local(n, var))
}

/// Matches `local.set i (i32.add (local.get i) (i32.const step))` and
/// returns the induction local and step.
fn induction_step(node: &Node) -> Option<(&smol_str::SmolStr, i32)> {
    let Node::LocalSet { name, value } = node else {
        return None;
    };
    let Node::Op { op, args, .. } = value.as_ref() else {
        return None;
    };
    if op != "i32.add" || args.len() != 2 {
        return None;
    }
    let Node::LocalGet { name: read } = &args[0] else {
        return None;
    };
    if read != name {
        return None;
    }
    match &args[1] {
        Node::Const {
            value: Literal::I32(step),
            ..
        } => Some((name, *step)),
        _ => None,
    }
}

fn writes_local(node: &Node, var: &smol_str::SmolStr) -> bool {
    node.any(|n| {
        matches!(
            n,
            Node::LocalSet { name, .. } | Node::LocalTee { name, .. } if name == var
        )
    })
}

//! tessera-passes: fixed-point optimizer and scalar-to-SIMD
//! auto-vectorizer over the tessera instruction tree.
//!
//! Every pass is a pure bottom-up rewrite: it consumes a node, returns a
//! freshly built node, and never touches the input. The driver iterates
//! folding (plus peephole simplification and dead-code elimination from
//! level 2) to a structural fixed point, then optionally unrolls counted
//! loops at level 3 and refolds the inserted index arithmetic.

pub mod dce;
pub mod fold;
pub mod peephole;
pub mod rewrite;
pub mod unroll;
pub mod vectorize;

use tessera_ir::model::node::Node;

pub use vectorize::{auto_vectorize, VectorTarget, Vectorized, VectorizeOptions};

/// Maximum rewrite iterations before the driver stops waiting for a
/// fixed point.
const MAX_PASSES: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct OptimizeOptions {
    /// 0 = identity, 1 = constant folding, 2 = + peephole and dead-code
    /// elimination, 3 = + loop unrolling.
    pub level: u8,
    /// Kernel copies per macro-iteration at level 3. The loop's
    /// iteration count must be a multiple of `unroll_factor * step`;
    /// no remainder loop is generated.
    pub unroll_factor: u32,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            level: 1,
            unroll_factor: 4,
        }
    }
}

/// Optimize a node. A module is rebuilt with each of its functions
/// optimized independently; any other node is optimized directly.
pub fn optimize(node: &Node, opts: &OptimizeOptions) -> Node {
    if opts.level == 0 {
        return node.clone();
    }
    match node {
        Node::Module { items } => Node::Module {
            items: items
                .iter()
                .map(|item| match item {
                    Node::Func(_) => run_pipeline(item, opts),
                    other => other.clone(),
                })
                .collect(),
        },
        other => run_pipeline(other, opts),
    }
}

fn run_pipeline(node: &Node, opts: &OptimizeOptions) -> Node {
    let mut current = node.clone();
    for _ in 0..MAX_PASSES {
        let mut next = fold::fold_constants(&current);
        if opts.level >= 2 {
            next = peephole::simplify(&next);
            next = dce::prune_dead(&next);
        }
        if next == current {
            break;
        }
        current = next;
    }
    if opts.level >= 3 {
        current = unroll::unroll_loops(&current, opts.unroll_factor.max(1));
        current = fold::fold_constants(&current);
    }
    current
}

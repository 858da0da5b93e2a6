//! Structural dead-code elimination: inside a function, block, or loop
//! body (and both `if` arms), everything after an unconditional control
//! transfer can never execute and is dropped. `br_if` falls through, so
//! it does not terminate a body.

use tessera_ir::model::node::Node;

use crate::rewrite::map_bottom_up;

/// Drop unreachable trailing siblings throughout the tree.
pub fn prune_dead(node: &Node) -> Node {
    map_bottom_up(node, &mut prune_node)
}

fn is_terminator(node: &Node) -> bool {
    matches!(
        node,
        Node::Return { .. } | Node::Br { .. } | Node::BrTable { .. } | Node::Unreachable
    )
}

fn truncate(mut body: Vec<Node>) -> Vec<Node> {
    if let Some(end) = body.iter().position(is_terminator) {
        body.truncate(end + 1);
    }
    body
}

fn prune_node(node: Node) -> Node {
    match node {
        Node::Func(mut func) => {
            func.body = truncate(func.body);
            Node::Func(func)
        }
        Node::Block { label, ty, body } => Node::Block {
            label,
            ty,
            body: truncate(body),
        },
        Node::Loop { label, ty, body } => Node::Loop {
            label,
            ty,
            body: truncate(body),
        },
        Node::If {
            ty,
            condition,
            consequent,
            alternate,
        } => Node::If {
            ty,
            condition,
            consequent: truncate(consequent),
            alternate: truncate(alternate),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_ir::build;

    #[test]
    fn drops_siblings_after_br() {
        let b = build::block(
            "out",
            vec![
                build::nop(),
                build::br("out"),
                build::i32_const(1),
                build::nop(),
            ],
        );
        let pruned = prune_dead(&b);
        assert_eq!(pruned, build::block("out", vec![build::nop(), build::br("out")]));
    }

    #[test]
    fn br_if_does_not_terminate() {
        let b = build::block(
            "out",
            vec![build::br_if("out", build::local_get("c")), build::nop()],
        );
        assert_eq!(prune_dead(&b), b);
    }

    #[test]
    fn prunes_if_arms_and_nested_blocks() {
        let n = build::if_(
            build::local_get("c"),
            vec![build::ret(vec![build::i32_const(1)]), build::nop()],
            vec![build::block("b", vec![build::unreachable(), build::nop()])],
        );
        let expected = build::if_(
            build::local_get("c"),
            vec![build::ret(vec![build::i32_const(1)])],
            vec![build::block("b", vec![build::unreachable()])],
        );
        assert_eq!(prune_dead(&n), expected);
    }

    #[test]
    fn function_body_is_pruned() {
        let f = build::func(
            "f",
            vec![],
            vec![],
            vec![],
            vec![build::ret(vec![]), build::nop()],
        );
        let expected = build::func("f", vec![], vec![], vec![], vec![build::ret(vec![])]);
        assert_eq!(prune_dead(&f), expected);
    }
}

//! Shared bottom-up rewriting over the instruction tree.
//!
//! Children are rebuilt first (including the condition child and both
//! arms of `if`), then the visitor runs on the node with its new
//! children. Inputs are never mutated; unmodified subtrees are carried
//! over by clone.

use tessera_ir::model::node::{FuncNode, Node};

/// Rebuild `node` bottom-up, applying `f` to every rebuilt node.
pub fn map_bottom_up<F: FnMut(Node) -> Node>(node: &Node, f: &mut F) -> Node {
    let rebuilt = match node {
        Node::Module { items } => Node::Module {
            items: map_all(items, f),
        },
        Node::Func(func) => Node::Func(Box::new(FuncNode {
            name: func.name.clone(),
            params: func.params.clone(),
            results: func.results.clone(),
            locals: func.locals.clone(),
            body: map_all(&func.body, f),
        })),
        Node::Block { label, ty, body } => Node::Block {
            label: label.clone(),
            ty: *ty,
            body: map_all(body, f),
        },
        Node::Loop { label, ty, body } => Node::Loop {
            label: label.clone(),
            ty: *ty,
            body: map_all(body, f),
        },
        Node::If {
            ty,
            condition,
            consequent,
            alternate,
        } => Node::If {
            ty: *ty,
            condition: Box::new(map_bottom_up(condition, f)),
            consequent: map_all(consequent, f),
            alternate: map_all(alternate, f),
        },
        Node::BrIf { label, condition } => Node::BrIf {
            label: label.clone(),
            condition: Box::new(map_bottom_up(condition, f)),
        },
        Node::BrTable {
            labels,
            default,
            index,
        } => Node::BrTable {
            labels: labels.clone(),
            default: default.clone(),
            index: Box::new(map_bottom_up(index, f)),
        },
        Node::Call { target, args } => Node::Call {
            target: target.clone(),
            args: map_all(args, f),
        },
        Node::CallIndirect {
            type_index,
            table_index,
            args,
        } => Node::CallIndirect {
            type_index: *type_index,
            table_index: *table_index,
            args: map_all(args, f),
        },
        Node::LocalSet { name, value } => Node::LocalSet {
            name: name.clone(),
            value: Box::new(map_bottom_up(value, f)),
        },
        Node::LocalTee { name, value } => Node::LocalTee {
            name: name.clone(),
            value: Box::new(map_bottom_up(value, f)),
        },
        Node::GlobalSet { name, value } => Node::GlobalSet {
            name: name.clone(),
            value: Box::new(map_bottom_up(value, f)),
        },
        Node::Return { values } => Node::Return {
            values: map_all(values, f),
        },
        Node::Drop { value } => Node::Drop {
            value: Box::new(map_bottom_up(value, f)),
        },
        Node::Select { args } => Node::Select {
            args: map_all(args, f),
        },
        Node::Op { op, args, imm } => Node::Op {
            op: op.clone(),
            args: map_all(args, f),
            imm: *imm,
        },
        leaf => leaf.clone(),
    };
    f(rebuilt)
}

fn map_all<F: FnMut(Node) -> Node>(nodes: &[Node], f: &mut F) -> Vec<Node> {
    nodes.iter().map(|n| map_bottom_up(n, f)).collect()
}

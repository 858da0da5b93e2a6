//! End-to-end optimizer behavior over whole functions.

use tessera_ir::build;
use tessera_ir::model::node::Node;
use tessera_ir::model::types::ValType;
use tessera_passes::{optimize, OptimizeOptions};

fn opts(level: u8) -> OptimizeOptions {
    OptimizeOptions {
        level,
        ..Default::default()
    }
}

/// `res = 2 + 3` collapses to a single constant store.
#[test]
fn folds_to_single_const() {
    let f = build::func(
        "k",
        vec![],
        vec![],
        vec![build::local("res", ValType::I32)],
        vec![build::local_set(
            "res",
            build::binop("i32.add", build::i32_const(2), build::i32_const(3)),
        )],
    );
    let out = optimize(&f, &opts(2));
    let expected = build::func(
        "k",
        vec![],
        vec![],
        vec![build::local("res", ValType::I32)],
        vec![build::local_set("res", build::i32_const(5))],
    );
    assert_eq!(out, expected);
}

fn factorial() -> Node {
    build::func(
        "fact",
        vec![build::param("n", ValType::I32)],
        vec![ValType::I32],
        vec![
            build::local("i", ValType::I32),
            build::local("res", ValType::I32),
        ],
        vec![
            build::local_set("i", build::i32_const(1)),
            build::local_set("res", build::i32_const(1)),
            build::block(
                "out",
                vec![build::loop_(
                    "top",
                    vec![
                        build::br_if(
                            "out",
                            build::binop(
                                "i32.gt_s",
                                build::local_get("i"),
                                build::local_get("n"),
                            ),
                        ),
                        build::local_set(
                            "res",
                            build::binop(
                                "i32.mul",
                                build::local_get("res"),
                                build::local_get("i"),
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
                        build::br("top"),
                    ],
                )],
            ),
            build::local_get("res"),
        ],
    )
}

#[test]
fn optimize_is_idempotent() {
    for level in [1, 2, 3] {
        let once = optimize(&factorial(), &opts(level));
        let twice = optimize(&once, &opts(level));
        assert_eq!(once, twice, "level {level} not idempotent");
    }
}

#[test]
fn level_zero_returns_input() {
    let f = factorial();
    assert_eq!(optimize(&f, &opts(0)), f);
}

#[test]
fn counted_loop_untouched_below_level_three() {
    let f = factorial();
    assert_eq!(optimize(&f, &opts(2)), f);
}

#[test]
fn level_three_unrolls_counted_loop() {
    let out = optimize(
        &factorial(),
        &OptimizeOptions {
            level: 3,
            unroll_factor: 4,
        },
    );
    let Node::Func(func) = &out else {
        panic!("func expected");
    };
    let Node::Block { body: block, .. } = &func.body[2] else {
        panic!("block expected");
    };
    let Node::Loop { body, .. } = &block[0] else {
        panic!("loop expected");
    };
    // br_if, 4 kernel copies, 4 increments, back edge.
    assert_eq!(body.len(), 10);
    assert!(matches!(body[0], Node::BrIf { .. }));
    assert!(matches!(&body[body.len() - 1], Node::Br { label } if label == "top"));
    let kernel_copies = body
        .iter()
        .filter(|n| matches!(n, Node::LocalSet { name, .. } if name == "res"))
        .count();
    let increments = body
        .iter()
        .filter(|n| matches!(n, Node::LocalSet { name, .. } if name == "i"))
        .count();
    assert_eq!(kernel_copies, 4);
    assert_eq!(increments, 4);
}

#[test]
fn dead_tail_removed_and_branches_kept() {
    let f = build::func(
        "early",
        vec![build::param("c", ValType::I32)],
        vec![ValType::I32],
        vec![],
        vec![
            build::if_(
                build::local_get("c"),
                vec![
                    build::ret(vec![build::i32_const(1)]),
                    build::drop_(build::i32_const(2)),
                ],
                vec![],
            ),
            build::i32_const(0),
        ],
    );
    let out = optimize(&f, &opts(2));
    let expected = build::func(
        "early",
        vec![build::param("c", ValType::I32)],
        vec![ValType::I32],
        vec![],
        vec![
            build::if_(
                build::local_get("c"),
                vec![build::ret(vec![build::i32_const(1)])],
                vec![],
            ),
            build::i32_const(0),
        ],
    );
    assert_eq!(out, expected);
}

#[test]
fn division_by_zero_survives_optimization() {
    let f = build::func(
        "trap",
        vec![],
        vec![ValType::I32],
        vec![],
        vec![build::binop(
            "i32.div_s",
            build::i32_const(1),
            build::i32_const(0),
        )],
    );
    assert_eq!(optimize(&f, &opts(3)), f);
}

#[test]
fn unrolled_copies_carry_folded_constants() {
    // A counted loop whose kernel contains foldable arithmetic; every
    // replicated copy ends up with the folded form.
    let f = build::func(
        "k",
        vec![],
        vec![],
        vec![build::local("i", ValType::I32)],
        vec![build::loop_(
            "top",
            vec![
                build::br_if("out", build::local_get("i")),
                build::drop_(build::binop(
                    "i32.shl",
                    build::i32_const(1),
                    build::i32_const(2),
                )),
                build::local_set(
                    "i",
                    build::binop(
                        "i32.add",
                        build::local_get("i"),
                        build::i32_const(1),
                    ),
                ),
                build::br("top"),
            ],
        )],
    );
    let out = optimize(
        &f,
        &OptimizeOptions {
            level: 3,
            unroll_factor: 2,
        },
    );
    fn count_folded(n: &Node, hits: &mut usize) {
        if *n == build::drop_(build::i32_const(4)) {
            *hits += 1;
        }
        n.for_each_child(|c| count_folded(c, hits));
    }
    let mut folded = 0;
    count_folded(&out, &mut folded);
    assert_eq!(folded, 2);
}

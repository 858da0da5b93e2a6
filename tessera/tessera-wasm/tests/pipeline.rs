//! Whole-pipeline coverage: build, vectorize, optimize, emit.

use tessera_ir::build;
use tessera_ir::model::node::Node;
use tessera_ir::model::types::{MemoryLimits, ValType};
use tessera_passes::{
    auto_vectorize, optimize, OptimizeOptions, VectorizeOptions,
};
use tessera_wasm::emit_binary;

/// Lane-wise add over two v128 loads from imported memory.
#[test]
fn simd_vec_add_module_emits() {
    let module = build::module(vec![
        build::import_memory("env", "memory", MemoryLimits::new(1, None)),
        build::func(
            "vec_add",
            vec![
                build::param("a_off", ValType::I32),
                build::param("b_off", ValType::I32),
                build::param("out_off", ValType::I32),
            ],
            vec![],
            vec![],
            vec![build::v128_store(
                build::local_get("out_off"),
                build::binop(
                    "i32x4.add",
                    build::v128_load(build::local_get("a_off")),
                    build::v128_load(build::local_get("b_off")),
                ),
            )],
        ),
    ]);
    let bytes = emit_binary(&module).unwrap();
    // v128.load twice, i32x4.add once, v128.store once, all prefixed.
    let count = |needle: &[u8]| {
        bytes
            .windows(needle.len())
            .filter(|w| *w == needle)
            .count()
    };
    assert_eq!(count(&[0xFD, 0x00, 0x04]), 2);
    assert_eq!(count(&[0xFD, 0xAE, 0x01]), 1);
    assert_eq!(count(&[0xFD, 0x0B, 0x04]), 1);
}

/// A scalar f32 "add 1.0 to every element" kernel, lifted to SIMD,
/// unrolled, and serialized.
#[test]
fn vectorized_kernel_survives_optimize_and_emit() {
    let scalar = build::func(
        "bump_all",
        vec![build::param("count", ValType::I32)],
        vec![],
        vec![build::local("i", ValType::I32)],
        vec![build::block(
            "out",
            vec![build::loop_(
                "top",
                vec![
                    build::br_if(
                        "out",
                        build::binop(
                            "i32.ge_u",
                            build::local_get("i"),
                            build::local_get("count"),
                        ),
                    ),
                    build::f32_store(
                        build::binop(
                            "i32.shl",
                            build::local_get("i"),
                            build::i32_const(2),
                        ),
                        build::binop(
                            "f32.add",
                            build::f32_load(build::binop(
                                "i32.shl",
                                build::local_get("i"),
                                build::i32_const(2),
                            )),
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
                    build::br("top"),
                ],
            )],
        )],
    );

    let vectorized = auto_vectorize(&scalar, &VectorizeOptions::default());
    assert!(vectorized.success);
    assert_eq!(vectorized.width, 4);

    let optimized = optimize(
        &vectorized.func,
        &OptimizeOptions {
            level: 3,
            unroll_factor: 4,
        },
    );

    // The unrolled loop advances by 4 per kernel copy, 16 per macro
    // iteration; the SIMD ops survive optimization.
    fn count_ops(n: &Node, op: &str, hits: &mut usize) {
        if n.op_name() == Some(op) {
            *hits += 1;
        }
        n.for_each_child(|c| count_ops(c, op, hits));
    }
    let mut stores = 0;
    count_ops(&optimized, "v128.store", &mut stores);
    assert_eq!(stores, 4);
    let mut splats = 0;
    count_ops(&optimized, "f32x4.splat", &mut splats);
    assert_eq!(splats, 4);

    let module = build::module(vec![
        build::import_memory("env", "memory", MemoryLimits::new(16, None)),
        optimized,
    ]);
    let bytes = emit_binary(&module).unwrap();
    assert_eq!(&bytes[0..8], b"\0asm\x01\0\0\0");
    // The export keeps the `_simd` suffix.
    let needle = b"bump_all_simd";
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

/// The scalar original and its failed-vectorization fallback emit the
/// same bytes.
#[test]
fn fallback_function_emits_identically() {
    let scalar = build::func(
        "plain",
        vec![],
        vec![ValType::I64],
        vec![],
        vec![build::i64_const(9)],
    );
    let result = auto_vectorize(&scalar, &VectorizeOptions::default());
    assert!(!result.success);
    let a = emit_binary(&build::module(vec![scalar])).unwrap();
    let b = emit_binary(&build::module(vec![result.func])).unwrap();
    assert_eq!(a, b);
}

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tessera_ir::build;
use tessera_ir::model::node::Node;
use tessera_ir::model::types::ValType;
use tessera_passes::{optimize, OptimizeOptions};
use tessera_wasm::emit_binary;

/// Deterministic synthetic module: `n` functions, each a chain of
/// arithmetic over its parameters with seeded constants.
fn synthetic_module(n: usize, seed: u64) -> Node {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut items = Vec::with_capacity(n);
    for i in 0..n {
        let mut expr = build::local_get("x");
        for _ in 0..rng.gen_range(4..32) {
            let op = ["i32.add", "i32.mul", "i32.sub", "i32.and"]
                [rng.gen_range(0..4)];
            expr = build::binop(op, expr, build::i32_const(rng.gen_range(0..64)));
        }
        items.push(build::func(
            format!("work_{i}"),
            vec![build::param("x", ValType::I32)],
            vec![ValType::I32],
            vec![],
            vec![expr],
        ));
    }
    build::module(items)
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit_binary");
    for &n in &[16usize, 128, 1024] {
        let module = synthetic_module(n, 7);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &module, |b, m| {
            b.iter(|| {
                let bytes = emit_binary(m).unwrap();
                black_box(bytes);
            })
        });
    }
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let module = synthetic_module(128, 11);
    let opts = OptimizeOptions {
        level: 2,
        ..Default::default()
    };
    c.bench_function("optimize_128_funcs", |b| {
        b.iter(|| {
            let out = optimize(&module, &opts);
            black_box(out);
        })
    });
}

criterion_group!(benches, bench_emit, bench_optimize);
criterion_main!(benches);

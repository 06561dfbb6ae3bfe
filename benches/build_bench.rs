use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shader_ir::Ir;

fn build_benchmark(c: &mut Criterion) {
    let normalize = [
        "DP3 %t1.x, %1, %1",
        "RSQ %t1.x, %t1.x",
        "MUL %2.xyz, %1, %t1.x",
    ];

    c.bench_function("expand normalize template", |b| {
        b.iter(|| {
            let mut ir = Ir::new(());
            for _ in 0..100 {
                ir.build(black_box(&normalize), black_box(&["varying@0.zyx", "temp@0"]))
                    .unwrap();
            }
            ir
        })
    });
}

criterion_group!(benches, build_benchmark);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use permgate_auth::{EngineConfig, PermissionEngine, normalize, parse, tokenize};

const EXPRESSIONS: &[&str] = &[
    "users.read",
    "admin.* || moderator.*",
    "(admin.* | moderator.*) & active.user",
    "((billing.invoice.* || billing.refund) && (org-admin.? || owner)) || support.*",
];

fn granted_set(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| format!("module{}.resource{}.action{}", i % 7, i % 13, i))
        .chain(["active.user".to_string(), "moderator.posts".to_string()])
        .collect()
}

fn bench_front_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_end");
    for expr in EXPRESSIONS {
        group.throughput(Throughput::Bytes(expr.len() as u64));
        group.bench_with_input(BenchmarkId::new("normalize_tokenize_parse", expr.len()), expr, |b, expr| {
            b.iter(|| {
                let normalized = normalize(black_box(expr));
                let tokens = tokenize(&normalized);
                black_box(parse(&tokens))
            });
        });
    }
    group.finish();
}

fn bench_evaluation_cached_vs_cold(c: &mut Criterion) {
    let cached = PermissionEngine::default();
    let cold = PermissionEngine::new(EngineConfig {
        pattern_cache_capacity: 0,
        ..EngineConfig::default()
    });

    let mut group = c.benchmark_group("evaluate_expression");
    for size in [8usize, 64, 512] {
        let granted = granted_set(size);
        let expr = EXPRESSIONS[2];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("cached", size), &granted, |b, granted| {
            b.iter(|| black_box(cached.evaluate_expression(black_box(expr), granted)));
        });
        group.bench_with_input(BenchmarkId::new("cold", size), &granted, |b, granted| {
            b.iter(|| black_box(cold.evaluate_expression(black_box(expr), granted)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_front_end, bench_evaluation_cached_vs_cold);
criterion_main!(benches);

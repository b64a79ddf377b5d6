use aopx::{AopManager, AopManagerConfig, AspectRegistry, LruCache, PointcutConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

const NUM_RULES: usize = 50;

// ========== 辅助函数 ==========

fn build_manager() -> AopManager {
    let rules: Vec<PointcutConfig> = (0..NUM_RULES)
        .map(|i| {
            json5::from_str(&format!(
                r#"{{ classes: ["svc.mod{}.{}"], aspect: ["Aspect{}"], priority: {} }}"#,
                i % 10,
                "*",
                i,
                i % 5
            ))
            .unwrap()
        })
        .collect();

    let config = AopManagerConfig {
        aspects: rules,
        ..Default::default()
    };

    AopManager::new(config, Arc::new(AspectRegistry::new())).unwrap()
}

// ========== 1. 切面链解析（缓存命中） ==========

fn benchmark_resolve_chain_cached(c: &mut Criterion) {
    let manager = build_manager();
    // 预热缓存
    manager.resolve_chain("svc.mod3.Report", "run");

    c.bench_function("resolve_chain_cached", |b| {
        b.iter(|| {
            black_box(manager.resolve_chain(black_box("svc.mod3.Report"), black_box("run")))
        })
    });
}

// ========== 2. 切面链解析（缓存未命中） ==========

fn benchmark_resolve_chain_uncached(c: &mut Criterion) {
    let manager = build_manager();
    let mut i = 0_u64;

    c.bench_function("resolve_chain_uncached", |b| {
        b.iter(|| {
            i += 1;
            black_box(manager.resolve_chain("svc.mod3.Report", &format!("method_{}", i)))
        })
    });
}

// ========== 3. LRU 缓存读写 ==========

fn benchmark_lru_cache(c: &mut Criterion) {
    c.bench_function("lru_cache_set_get", |b| {
        let mut cache = LruCache::new(1024).unwrap();
        let mut i = 0_u64;
        b.iter(|| {
            i += 1;
            let key = format!("key_{}", i % 2048);
            cache.set(key.clone(), i);
            black_box(cache.get(&key));
        })
    });
}

criterion_group!(
    benches,
    benchmark_resolve_chain_cached,
    benchmark_resolve_chain_uncached,
    benchmark_lru_cache
);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use texpack_core::prelude::*;

fn generate_sprites(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("sprite_{}", i), w, h)
        })
        .collect()
}

fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_strategies");

    for count in [50, 100, 200] {
        let sprites = generate_sprites(count, 8, 64);
        group.throughput(Throughput::Elements(count as u64));

        for layout in [LayoutKind::Shelf, LayoutKind::Stack, LayoutKind::MaxRects] {
            group.bench_with_input(
                BenchmarkId::new(layout.name(), count),
                &sprites,
                |b, sprites| {
                    b.iter(|| {
                        let cfg = PackerConfig::builder()
                            .layout(layout)
                            .allow_rotation(true)
                            .max_size(1024)
                            .build();
                        black_box(pack_layout(sprites.clone(), cfg).ok())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let sprites = generate_sprites(100, 16, 48);
    c.bench_function("maxrects_grow_from_zero", |b| {
        b.iter(|| {
            let cfg = PackerConfig::builder()
                .layout(LayoutKind::MaxRects)
                .max_size(2048)
                .build();
            black_box(pack_layout(sprites.clone(), cfg).ok())
        });
    });
}

criterion_group!(benches, bench_layouts, bench_growth);
criterion_main!(benches);

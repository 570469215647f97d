// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_overflow::{
    Item, LayoutParameters, MeasuredWidths, OverflowEngine, WidthResolver, layout, pack,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_widths(count: usize, min: f64, max: f64) -> Vec<f64> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count).map(|_| min + rng.next_f64() * (max - min)).collect()
}

fn gen_items(count: usize) -> Vec<Item<u32>> {
    const LABELS: [&str; 6] = ["Save", "Open", "Share", "Export as PDF", "Duplicate", "Print"];
    (0..count)
        .map(|i| Item::new(i as u32, LABELS[i % LABELS.len()]))
        .collect()
}

fn params(container: f64, max_rows: usize) -> LayoutParameters {
    LayoutParameters::new(container)
        .with_margin(8.0)
        .with_row_gap(8.0)
        .with_max_rows(max_rows)
        .with_indicator_width(50.0)
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    for &n in &[16usize, 128, 1024] {
        let widths = gen_widths(n, 40.0, 200.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("fits_n{}", n), |b| {
            let p = params(f64::INFINITY, 1);
            b.iter(|| black_box(pack(black_box(&widths), &p)));
        });
        group.bench_function(format!("overflow_one_row_n{}", n), |b| {
            let p = params(800.0, 1);
            b.iter(|| black_box(pack(black_box(&widths), &p)));
        });
        group.bench_function(format!("overflow_four_rows_n{}", n), |b| {
            let p = params(800.0, 4);
            b.iter(|| black_box(pack(black_box(&widths), &p)));
        });
    }
    group.finish();
}

fn bench_layout_estimated(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_estimated");
    let resolver = WidthResolver::estimated();
    let measured = MeasuredWidths::<u32>::new();
    for &n in &[16usize, 128, 1024] {
        let items = gen_items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n{}", n), |b| {
            let p = params(1200.0, 2);
            b.iter(|| black_box(layout(black_box(&items), &p, &measured, &resolver)));
        });
    }
    group.finish();
}

fn bench_engine_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_resize");
    let widths = gen_widths(256, 40.0, 200.0);
    group.bench_function("sweep_container_width_n256", |b| {
        b.iter_batched(
            || {
                let mut engine = OverflowEngine::new(params(400.0, 3));
                let _ = engine.set_items(gen_items(widths.len()));
                for (i, &w) in widths.iter().enumerate() {
                    let _ = engine.set_measured_width(&(i as u32), w);
                }
                engine
            },
            |mut engine| {
                for step in 0..64 {
                    let _ = engine.set_container_width(400.0 + step as f64 * 25.0);
                    let _ = engine.run(|result, _| {
                        black_box(result.hidden().len());
                    });
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_pack,
    bench_layout_estimated,
    bench_engine_resize,
);
criterion_main!(benches);

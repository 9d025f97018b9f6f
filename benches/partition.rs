use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use splitter::{Canvas, PartitionModel, Point};
use std::hint::black_box;

const CANVAS: u32 = 2000;

// Helper function to create layouts with random cuts and priorities
fn create_layout(points: usize) -> PartitionModel {
    let mut model = PartitionModel::new(Canvas::new(CANVAS, CANVAS).unwrap(), 5);
    for _ in 0..points {
        let at = Point::new(rand::random::<u32>() % CANVAS, rand::random::<u32>() % CANVAS);
        model.place_or_select(at);
        if rand::random::<bool>() {
            model.toggle_horizontal();
        }
        if rand::random::<bool>() {
            model.toggle_vertical();
        }
        for _ in 0..rand::random::<u32>() % 4 {
            model.increment_priority();
        }
    }
    model
}

// Benchmark clipping recompute for growing point sets
fn bench_line_rects(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_line_rects");
    for points in [10, 50, 100, 500] {
        let model = create_layout(points);
        group.bench_with_input(BenchmarkId::new("points", points), &model, |b, model| {
            b.iter(|| {
                let mut model = model.clone();
                model.calculate_line_rects();
                black_box(model);
            });
        });
    }
    group.finish();
}

// Benchmark the tiling for growing point sets
fn bench_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_boxes");
    for points in [10, 50, 100, 500] {
        let model = create_layout(points);
        group.bench_with_input(BenchmarkId::new("points", points), &model, |b, model| {
            b.iter(|| black_box(model.calculate_boxes()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_line_rects, bench_boxes);
criterion_main!(benches);

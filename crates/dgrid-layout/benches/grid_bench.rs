//! Benchmarks for placement search and live gesture previews.
//!
//! Run with: cargo bench -p dgrid-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use dgrid_core::geometry::{CellPos, PixelPoint, PixelRect};
use dgrid_layout::placement::find_available;
use dgrid_layout::{
    DragSession, GridConfig, GridDimensions, GridInputEvent, GridItemSpec, GridLayoutManager,
    GridModel, ItemId, PointerPress, ResizeMode, ResizeSession,
};
use std::hint::black_box;

/// Tile a `columns × rows` grid with 2×2 items, leaving the last `holes` slots
/// empty.
fn tiled_model(columns: u16, rows: u16, holes: usize) -> GridModel {
    let dims = GridDimensions::new(columns, rows);
    let slots: Vec<(u16, u16)> = (0..rows / 2)
        .flat_map(|y| (0..columns / 2).map(move |x| (x * 2, y * 2)))
        .collect();
    let keep = slots.len().saturating_sub(holes);
    let specs: Vec<GridItemSpec> = slots[..keep]
        .iter()
        .enumerate()
        .map(|(i, (x, y))| {
            GridItemSpec::new(format!("p{i}"))
                .at(*x, *y)
                .size(2, 2)
                .min_size(1, 1)
        })
        .collect();
    GridModel::from_specs(dims, &specs).expect("tiling has no overlaps")
}

fn bench_find_available(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/find_available");

    for (columns, rows) in [(12, 8), (24, 16), (48, 32)] {
        let last_hole = tiled_model(columns, rows, 1);
        let packed = tiled_model(columns, rows, 0);
        let dims = last_hole.dimensions();
        group.bench_with_input(
            BenchmarkId::new("last_slot", format!("{columns}x{rows}")),
            &last_hole,
            |b, model| b.iter(|| black_box(find_available(dims, model.items(), 2, 2, None))),
        );
        group.bench_with_input(
            BenchmarkId::new("fallback", format!("{columns}x{rows}")),
            &packed,
            |b, model| b.iter(|| black_box(find_available(dims, model.items(), 3, 2, None))),
        );
    }

    group.finish();
}

fn bench_drag_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/drag_preview");
    let model = tiled_model(24, 16, 4);
    let session = DragSession::begin(&model, &ItemId::from("p0"), CellPos::ORIGIN)
        .expect("p0 exists");

    group.bench_function("sweep_row", |b| {
        b.iter(|| {
            for x in 0..24 {
                black_box(session.preview(&model, CellPos::new(x, 3), 0.3));
            }
        })
    });

    group.finish();
}

fn bench_resize_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/resize_preview");
    let model = tiled_model(24, 16, 4);

    for mode in [ResizeMode::Both, ResizeMode::Proportional] {
        let session = ResizeSession::begin(&model, &ItemId::from("p0"), CellPos::new(1, 1), mode)
            .expect("p0 exists");
        group.bench_with_input(BenchmarkId::new("grow", mode.as_str()), &session, |b, session| {
            b.iter(|| black_box(session.preview(&model, CellPos::new(20, 12))))
        });
    }

    group.finish();
}

fn bench_gesture_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/gesture");
    let container = PixelRect::new(0.0, 0.0, 704.0, 392.0);
    let specs = [
        GridItemSpec::new("a").at(0, 0).size(6, 3),
        GridItemSpec::new("b").at(6, 0).size(6, 3),
        GridItemSpec::new("c").at(0, 3).size(4, 3),
    ];
    let path: Vec<PixelPoint> = (0..32)
        .map(|i| PixelPoint::new(20.0 + f64::from(i) * 11.0, 20.0 + f64::from(i) * 7.0))
        .collect();

    group.bench_function("drag_32_moves", |b| {
        b.iter_batched(
            || {
                GridLayoutManager::new(GridConfig::default(), container, &specs)
                    .expect("valid layout")
            },
            |mut manager| {
                manager.handle_event(&GridInputEvent::PointerDown(PointerPress::body(
                    "a",
                    PixelPoint::new(20.0, 20.0),
                )));
                for position in &path {
                    manager.handle_event(&GridInputEvent::PointerMove {
                        position: *position,
                    });
                }
                let last = path.last().copied().unwrap_or_default();
                black_box(manager.handle_event(&GridInputEvent::PointerUp { position: last }));
                manager
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("render_plan", |b| {
        let manager = GridLayoutManager::new(GridConfig::default(), container, &specs)
            .expect("valid layout");
        b.iter(|| black_box(manager.render_plan()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_find_available,
    bench_drag_preview,
    bench_resize_preview,
    bench_gesture_round_trip,
);

criterion_main!(benches);

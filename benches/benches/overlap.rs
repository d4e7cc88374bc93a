// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::any::Any;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::{DAffine3, DQuat, DVec2, DVec3};
use kurbo::{Point, Rect};
use understory_overlap::kinds::Sprite;
use understory_overlap::{
    AxisAligned, Camera, CanvasMode, OverlapConfig, OverlapEngine, OverlapScene, OverlapStrategy,
    Projection, SeparatingAxis, UiRect,
};

struct Grid {
    sprites: Vec<Sprite>,
    rects: Vec<UiRect<()>>,
    camera: Camera,
}

impl OverlapScene for Grid {
    type ObjectId = usize;
    type RectId = usize;
    type CameraId = ();
    type CanvasId = ();

    fn spatial_object(&self, id: usize) -> Option<&dyn Any> {
        self.sprites.get(id).map(|s| s as &dyn Any)
    }

    fn ui_rect(&self, id: usize) -> Option<UiRect<()>> {
        self.rects.get(id).copied()
    }

    fn camera(&self, _id: ()) -> Option<Camera> {
        Some(self.camera)
    }

    fn canvas_mode(&self, _id: ()) -> Option<CanvasMode> {
        Some(CanvasMode::ScreenSpaceOverlay)
    }
}

/// `objects` rotated sprites scattered over a 1000x1000 screen and `rects` panels in a row.
fn grid(objects: usize, rects: usize, t: f64) -> Grid {
    let sprites = (0..objects)
        .map(|i| {
            let x = ((i * 37) % 1000) as f64 + t;
            let y = ((i * 91) % 1000) as f64;
            Sprite::new(
                DAffine3::from_rotation_translation(
                    DQuat::from_rotation_z(i as f64 * 0.1 + t * 0.01),
                    DVec3::new(x, y, 0.0),
                ),
                DVec2::new(24.0, 24.0),
            )
        })
        .collect();
    let rects = (0..rects)
        .map(|i| {
            let x = (i * 1000 / rects.max(1)) as f64;
            UiRect::from_bounds(x, 400.0, x + 60.0, 600.0, None)
        })
        .collect();
    let camera = Camera::look_at(
        DVec3::new(500.0, 500.0, 10.0),
        DVec3::new(500.0, 500.0, 0.0),
        DVec3::Y,
        Projection::Orthographic {
            half_height: 500.0,
            near: 0.1,
            far: 100.0,
        },
        Rect::new(0.0, 0.0, 1000.0, 1000.0),
    );
    Grid {
        sprites,
        rects,
        camera,
    }
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap/strategy");
    let square = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    let cases = [
        (
            "overlapping",
            [
                Point::new(5.0, 5.0),
                Point::new(15.0, 5.0),
                Point::new(15.0, 15.0),
                Point::new(5.0, 15.0),
            ],
        ),
        (
            "diamond_separated",
            [
                Point::new(17.0, 9.0),
                Point::new(25.0, 17.0),
                Point::new(17.0, 25.0),
                Point::new(9.0, 17.0),
            ],
        ),
    ];
    for (name, other) in cases {
        group.bench_with_input(BenchmarkId::new("axis_aligned", name), &other, |b, other| {
            b.iter(|| black_box(AxisAligned.overlaps(black_box(&square), black_box(other))));
        });
        group.bench_with_input(BenchmarkId::new("separating_axis", name), &other, |b, other| {
            b.iter(|| black_box(SeparatingAxis.overlaps(black_box(&square), black_box(other))));
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap/frame");
    for objects in [64_usize, 256, 1_024] {
        let rects = 16;
        group.throughput(Throughput::Elements((objects * rects) as u64));
        for rotation_aware in [false, true] {
            let label = if rotation_aware { "sat" } else { "aabb" };
            group.bench_with_input(BenchmarkId::new(label, objects), &objects, |b, &objects| {
                let scenes = [grid(objects, rects, 0.0), grid(objects, rects, 40.0)];
                let mut engine: OverlapEngine<Grid> = OverlapEngine::new(
                    OverlapConfig::default()
                        .with_rotation_aware(rotation_aware)
                        .with_camera(())
                        .with_canvas(()),
                );
                for id in 0..objects {
                    engine.add_object(&scenes[0], id);
                }
                for id in 0..rects {
                    engine.add_rect(&scenes[0], id);
                }
                // Alternate between two layouts so every frame has transitions.
                let mut frame = 0_usize;
                b.iter(|| {
                    frame += 1;
                    let report = engine.update(&scenes[frame % 2], &mut ());
                    black_box(report.ok());
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_frame);
criterion_main!(benches);

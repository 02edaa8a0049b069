//! Per-frame hot paths: easing, picking, and controller frames.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use vantage::camera::Viewport;
use vantage::picking;
use vantage::util::easing::EasingFunction;
use vantage::{InteractionController, Options, Scene, ViewCommand};

fn grid_scene(side: u32) -> Scene {
    let mut scene = Scene::with_ground();
    for i in 0..side {
        for j in 0..side {
            let x = i as f32 * 4.0 - side as f32 * 2.0;
            let z = j as f32 * 4.0 - side as f32 * 2.0;
            let _ = scene.add_box(
                format!("Block {i}-{j}"),
                Vec3::new(x, 1.0, z),
                Vec3::splat(2.0),
            );
        }
    }
    scene
}

fn controller_for(scene: &Scene) -> InteractionController {
    let mut controller =
        InteractionController::new(&Options::default(), Viewport::new(1920.0, 1080.0));
    controller.labels_mut().register_scene(scene);
    controller
}

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicInOut;
    c.bench_function("cubic_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn pick_benchmark(c: &mut Criterion) {
    let scene = grid_scene(10);
    let controller = controller_for(&scene);
    c.bench_function("pick_center_100_objects", |b| {
        b.iter(|| {
            black_box(picking::pick(
                &scene,
                controller.camera(),
                controller.viewport(),
                black_box(960.0),
                black_box(540.0),
            ))
        })
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller_frame");

    for side in [4, 10, 20] {
        let scene = grid_scene(side);
        let mut controller = controller_for(&scene);

        group.bench_function(format!("{}_objects_idle", side * side), |b| {
            b.iter(|| controller.frame(&scene, black_box(1.0 / 60.0)))
        });

        group.bench_function(format!("{}_objects_cycling", side * side), |b| {
            b.iter(|| {
                controller.execute(&scene, ViewCommand::CycleFocus);
                for _ in 0..8 {
                    controller.frame(&scene, 1.0 / 60.0);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, easing_benchmark, pick_benchmark, frame_benchmark);
criterion_main!(benches);

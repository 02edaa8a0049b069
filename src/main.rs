//! Demo viewer: a few buildings on a ground square.
//!
//! Usage: `vantage [options.toml]`

use std::path::Path;

use glam::Vec3;
use vantage::{Options, Scene, Viewer};

/// A small block of buildings on the ground square.
fn demo_scene() -> Scene {
    let mut scene = Scene::with_ground();
    let _ = scene.add_box("Building A", Vec3::new(0.0, 1.0, 1.0), Vec3::splat(2.0));
    let _ = scene.add_box("Tower", Vec3::new(-6.0, 3.0, -4.0), Vec3::new(2.0, 6.0, 2.0));
    let _ = scene.add_box("Warehouse", Vec3::new(7.0, 1.0, -2.0), Vec3::new(5.0, 2.0, 3.0));
    let _ = scene.add_box("Kiosk", Vec3::new(3.0, 0.5, 6.0), Vec3::splat(1.0));
    let _ = scene.add_box("Depot", Vec3::new(-4.0, 1.5, 7.0), Vec3::new(3.0, 3.0, 2.0));
    scene
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let viewer = Viewer::builder()
        .with_scene(demo_scene())
        .with_options(options)
        .build();
    if let Err(e) = viewer.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

//! Frustum culling demo
//!
//! Loads a scene description (or falls back to a built-in one), derives a
//! view frustum from the scene's camera, and logs which objects survive
//! culling.

mod scene;

use bounding_volumes::prelude::*;
use scene::Scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let scene = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene from {path}...");
            Scene::load_from_file(&path)?
        }
        None => {
            log::info!("No scene file given, using the built-in scene");
            Scene::default()
        }
    };

    let frustum = Frustum::new(scene.camera.view_projection());
    log::debug!(
        "Frustum corners: {:?}",
        frustum.corners().map(|c| (c.x, c.y, c.z))
    );

    let mut visible = 0usize;
    for object in &scene.objects {
        if object.volume.is_visible(&frustum) {
            visible += 1;
            log::info!("visible: {}", object.name);
        } else {
            log::info!("culled:  {}", object.name);
        }
    }

    log::info!(
        "{visible} of {} objects visible from {:?}",
        scene.objects.len(),
        (scene.camera.position.x, scene.camera.position.y, scene.camera.position.z)
    );

    Ok(())
}

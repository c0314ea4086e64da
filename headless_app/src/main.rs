//! Headless render-state recreation demo
//!
//! Builds null scenes and components, runs one global recreation cycle, and
//! reports the consolidated scene updates. Run with `RUST_LOG=debug` to
//! watch the two phases, or `RUST_LOG=trace` (with the library's
//! `render-trace` feature) for per-component detail.

use std::sync::Arc;

use render_lifecycle::prelude::*;
use serde::{Deserialize, Serialize};

/// Shape of the simulated world.
#[derive(Debug, Serialize, Deserialize)]
struct HeadlessConfig {
    scene_count: usize,
    components_per_scene: usize,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            scene_count: 2,
            components_per_scene: 3,
        }
    }
}

impl Config for HeadlessConfig {}

fn main() {
    render_lifecycle::foundation::logging::init();

    let config = match HeadlessConfig::load_from_file("headless.toml") {
        Ok(config) => config,
        Err(e) => {
            log::warn!("no usable headless.toml ({}), using defaults", e);
            HeadlessConfig::default()
        }
    };

    let mut registry = ComponentRegistry::new();
    let mut scenes = Vec::new();
    let mut components = Vec::new();
    for scene_index in 0..config.scene_count {
        let scene = Arc::new(NullScene::new(format!("scene-{}", scene_index)));
        let handle = SceneHandle::new(scene.clone());
        for component_index in 0..config.components_per_scene {
            let component = Arc::new(NullComponent::new(
                format!("component-{}-{}", scene_index, component_index),
                Some(handle.clone()),
            ));
            registry.register(component.clone());
            components.push(component);
        }
        scenes.push(scene);
    }
    log::info!(
        "registered {} component(s) across {} scene(s)",
        registry.len(),
        scenes.len()
    );

    {
        let _recreate = GlobalRecreateRenderStateGuard::new(&registry);
        let torn_down = components
            .iter()
            .filter(|c| !c.is_render_state_created())
            .count();
        log::info!(
            "teardown phase: {}/{} component(s) without render state",
            torn_down,
            components.len()
        );
    }

    let rebuilt = components
        .iter()
        .filter(|c| c.is_render_state_created())
        .count();
    log::info!(
        "rebuild phase: {}/{} component(s) restored",
        rebuilt,
        components.len()
    );
    for scene in &scenes {
        log::info!(
            "scene '{}' received {} primitive info update(s)",
            scene.name(),
            scene.primitive_update_count()
        );
    }
}

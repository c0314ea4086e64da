//! Null rendering backend
//!
//! Stand-ins for the rendering system's scenes and components so the
//! recreation machinery can run with rendering disabled — headless tools,
//! dedicated servers, and tests. Nothing here touches a GPU; render state is
//! a flag word and scene updates are counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::component::RenderStateComponent;
use crate::scene::{SceneHandle, SceneInterface};

bitflags::bitflags! {
    /// Lifecycle state word for a [`NullComponent`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ComponentFlags: u8 {
        /// Component is registered with its owning world.
        const REGISTERED = 1 << 0;
        /// Render state currently exists.
        const RENDER_STATE_CREATED = 1 << 1;
        /// Component is scheduled for destruction.
        const UNREACHABLE = 1 << 2;
    }
}

/// Scene that tracks primitive-info updates without drawing anything.
pub struct NullScene {
    name: String,
    primitive_updates: AtomicUsize,
}

impl NullScene {
    /// Create a named null scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitive_updates: AtomicUsize::new(0),
        }
    }

    /// How many primitive-info update passes this scene has received.
    pub fn primitive_update_count(&self) -> usize {
        self.primitive_updates.load(Ordering::Relaxed)
    }
}

impl SceneInterface for NullScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn update_all_primitive_scene_infos(&self) {
        self.primitive_updates.fetch_add(1, Ordering::Relaxed);
        log::trace!("null scene '{}' updated primitive scene infos", self.name);
    }
}

/// Component whose render state is a flag word rather than GPU resources.
///
/// Destroy/create counters let tests and tools verify exactly how often the
/// recreation machinery touched the component.
pub struct NullComponent {
    name: String,
    flags: Mutex<ComponentFlags>,
    scene: Option<SceneHandle>,
    destroy_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl NullComponent {
    /// Create a registered component with render state already created.
    pub fn new(name: impl Into<String>, scene: Option<SceneHandle>) -> Self {
        Self::with_flags(
            name,
            scene,
            ComponentFlags::REGISTERED | ComponentFlags::RENDER_STATE_CREATED,
        )
    }

    /// Create a component in an explicit lifecycle state.
    pub fn with_flags(
        name: impl Into<String>,
        scene: Option<SceneHandle>,
        flags: ComponentFlags,
    ) -> Self {
        Self {
            name: name.into(),
            flags: Mutex::new(flags),
            scene,
            destroy_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Register or unregister the component with its world.
    pub fn set_registered(&self, registered: bool) {
        self.flags
            .lock()
            .unwrap()
            .set(ComponentFlags::REGISTERED, registered);
    }

    /// Schedule the component for destruction.
    pub fn mark_unreachable(&self) {
        self.flags.lock().unwrap().insert(ComponentFlags::UNREACHABLE);
    }

    /// Number of [`RenderStateComponent::destroy_render_state`] calls received.
    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::Relaxed)
    }

    /// Number of [`RenderStateComponent::create_render_state`] calls received.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }
}

impl RenderStateComponent for NullComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_registered(&self) -> bool {
        self.flags.lock().unwrap().contains(ComponentFlags::REGISTERED)
    }

    fn is_render_state_created(&self) -> bool {
        self.flags
            .lock()
            .unwrap()
            .contains(ComponentFlags::RENDER_STATE_CREATED)
    }

    fn is_unreachable(&self) -> bool {
        self.flags.lock().unwrap().contains(ComponentFlags::UNREACHABLE)
    }

    fn destroy_render_state(&self) {
        self.flags
            .lock()
            .unwrap()
            .remove(ComponentFlags::RENDER_STATE_CREATED);
        self.destroy_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn create_render_state(&self) {
        self.flags
            .lock()
            .unwrap()
            .insert(ComponentFlags::RENDER_STATE_CREATED);
        self.create_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn scene(&self) -> Option<SceneHandle> {
        self.scene.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroy_and_create_track_state_and_counts() {
        let component = NullComponent::new("hull", None);
        assert!(component.is_registered());
        assert!(component.is_render_state_created());

        component.destroy_render_state();
        assert!(!component.is_render_state_created());
        assert_eq!(component.destroy_calls(), 1);

        component.create_render_state();
        assert!(component.is_render_state_created());
        assert_eq!(component.create_calls(), 1);
    }

    #[test]
    fn lifecycle_setters() {
        let component = NullComponent::new("hull", None);
        component.set_registered(false);
        assert!(!component.is_registered());

        component.mark_unreachable();
        assert!(component.is_unreachable());
    }
}

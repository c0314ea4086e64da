//! Scene handles and the batched scene-update set
//!
//! Scenes are owned by the rendering system; this module only refers to
//! them. A [`SceneHandle`] compares and hashes by identity, so a
//! [`ScenesToUpdate`] set deduplicates scenes no matter how many components
//! point at the same one — the property the consolidated update pass relies
//! on.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::foundation::logging::render_trace;

/// Scene operations consumed by the recreation subsystem.
///
/// Implemented by the rendering system's scenes; the actual per-primitive
/// bookkeeping lives there, not here.
pub trait SceneInterface: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Refresh the primitive scene info for every renderable in this scene.
    fn update_all_primitive_scene_infos(&self);
}

/// Identity-based handle to a scene.
///
/// Two handles are equal iff they refer to the same scene instance. Only
/// the data half of the fat pointer participates in comparison and hashing,
/// so the same scene seen through different vtables still deduplicates.
///
/// The handle keeps the scene alive but carries no update obligations of
/// its own; the referenced scene is expected to outlive any recreation
/// cycle that recorded it.
#[derive(Clone)]
pub struct SceneHandle(Arc<dyn SceneInterface>);

impl SceneHandle {
    /// Wrap a scene in an identity handle.
    pub fn new(scene: Arc<dyn SceneInterface>) -> Self {
        Self(scene)
    }

    /// Name of the referenced scene.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Refresh primitive scene info in the referenced scene.
    pub fn update_all_primitive_scene_infos(&self) {
        self.0.update_all_primitive_scene_infos();
    }

    fn data_ptr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for SceneHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data_ptr(), other.data_ptr())
    }
}

impl Eq for SceneHandle {}

impl Hash for SceneHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_ptr().hash(state);
    }
}

impl fmt::Debug for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SceneHandle").field(&self.name()).finish()
    }
}

/// Set of scenes whose primitive scene infos need a refresh.
///
/// Insertion is idempotent. [`Self::update_all`] is the consolidated pass:
/// each recorded scene is touched exactly once regardless of how many
/// components contributed it.
#[derive(Debug, Default)]
pub struct ScenesToUpdate {
    scenes: HashSet<SceneHandle>,
}

impl ScenesToUpdate {
    /// Create an empty update set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scene as needing an update. Returns `true` if the scene was
    /// not already recorded.
    pub fn insert(&mut self, scene: SceneHandle) -> bool {
        self.scenes.insert(scene)
    }

    /// Number of distinct scenes recorded.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene has been recorded.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Iterate over the recorded scenes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneHandle> {
        self.scenes.iter()
    }

    /// Consolidated pass: update each recorded scene exactly once.
    ///
    /// Returns the number of scenes updated.
    pub fn update_all(&self) -> usize {
        for scene in &self.scenes {
            render_trace!("updating primitive scene infos for scene '{}'", scene.name());
            scene.update_all_primitive_scene_infos();
        }
        self.scenes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::null::NullScene;

    #[test]
    fn handles_compare_by_identity() {
        let scene = Arc::new(NullScene::new("garage"));
        let first = SceneHandle::new(scene.clone());
        let second = SceneHandle::new(scene);
        assert_eq!(first, second);

        // Same name, different instance
        let other = SceneHandle::new(Arc::new(NullScene::new("garage")));
        assert_ne!(first, other);
    }

    #[test]
    fn insert_is_idempotent() {
        let scene = Arc::new(NullScene::new("garage"));
        let mut set = ScenesToUpdate::new();
        assert!(set.insert(SceneHandle::new(scene.clone())));
        assert!(!set.insert(SceneHandle::new(scene)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn update_all_touches_each_scene_once() {
        let hangar = Arc::new(NullScene::new("hangar"));
        let cockpit = Arc::new(NullScene::new("cockpit"));

        let mut set = ScenesToUpdate::new();
        set.insert(SceneHandle::new(hangar.clone()));
        set.insert(SceneHandle::new(hangar.clone()));
        set.insert(SceneHandle::new(cockpit.clone()));

        assert_eq!(set.update_all(), 2);
        assert_eq!(hangar.primitive_update_count(), 1);
        assert_eq!(cockpit.primitive_update_count(), 1);
    }
}

//! Scoped render-state recreation
//!
//! Tearing render state down and rebuilding it is how the engine reacts to
//! global rendering changes: shader recompiles, quality switches, device
//! resets. The guards in this module make that a two-phase cycle with
//! scope-bound lifetimes:
//!
//! ```text
//! GlobalRecreateRenderStateGuard::new        drop
//!   ├─ destroy render state (all components)   ├─ create render state (all)
//!   └─ accumulate affected scenes              └─ one update per scene
//! ```
//!
//! Every teardown completes before any rebuild starts, and the accumulated
//! scene set turns what would be one primitive-info update per component
//! into one update per distinct scene.
//!
//! Contract violations (an unreachable component handed to a guard) are
//! fatal assertions, never recoverable errors; everything else is a success
//! path.

use std::sync::{Arc, Mutex};

use crate::component::{ComponentRegistry, RenderStateComponent};
use crate::foundation::logging::render_trace;
use crate::scene::ScenesToUpdate;

/// Notify the scene system that a component's primitives changed.
///
/// With a shared update set the component's scene is recorded for the
/// caller's consolidated pass. Without one the scene is updated immediately,
/// unbatched — the correct behavior for an isolated single-component
/// recreate. The two paths are mutually exclusive, so a scene is never
/// updated twice for one notification.
///
/// Components not attached to any scene need no notification.
pub fn update_scene_infos_for_component(
    component: &dyn RenderStateComponent,
    scenes_to_update: Option<&Mutex<ScenesToUpdate>>,
) {
    let Some(scene) = component.scene() else {
        return;
    };
    match scenes_to_update {
        Some(set) => {
            set.lock().unwrap().insert(scene);
        }
        None => scene.update_all_primitive_scene_infos(),
    }
}

/// Destroys a component's render state and recreates it when dropped.
///
/// Construction performs the teardown eagerly. If the component is not
/// registered or has no render state, the guard is inert: nothing is torn
/// down and drop does nothing. Drop also skips the rebuild when some other
/// code path already recreated the state, or when the component was
/// unregistered while torn down.
///
/// The guard borrows the component for its whole lifetime and is strictly
/// scope-bound; it cannot be cloned.
pub struct RecreateRenderStateGuard<'a> {
    /// Set only when construction actually tore state down.
    component: Option<&'a dyn RenderStateComponent>,
    scenes_to_update: Option<Arc<Mutex<ScenesToUpdate>>>,
}

impl<'a> RecreateRenderStateGuard<'a> {
    /// Tear down `component`'s render state if it has any.
    ///
    /// Pass a shared update set to defer scene updates to the caller's
    /// consolidated pass; without one the component's scene is updated
    /// immediately on both the teardown and rebuild edges.
    ///
    /// # Panics
    ///
    /// Panics if the component is unreachable. That is a caller contract
    /// violation, not a recoverable condition.
    pub fn new(
        component: &'a dyn RenderStateComponent,
        scenes_to_update: Option<Arc<Mutex<ScenesToUpdate>>>,
    ) -> Self {
        assert!(
            !component.is_unreachable(),
            "cannot recreate render state for unreachable component '{}'",
            component.name()
        );

        if component.is_registered() && component.is_render_state_created() {
            component.destroy_render_state();
            render_trace!("tore down render state for '{}'", component.name());
            update_scene_infos_for_component(component, scenes_to_update.as_deref());
            Self {
                component: Some(component),
                scenes_to_update,
            }
        } else {
            Self {
                component: None,
                scenes_to_update,
            }
        }
    }
}

impl Drop for RecreateRenderStateGuard<'_> {
    fn drop(&mut self) {
        let Some(component) = self.component else {
            return;
        };
        if !component.is_render_state_created() && component.is_registered() {
            component.create_render_state();
            render_trace!("rebuilt render state for '{}'", component.name());
            update_scene_infos_for_component(component, self.scenes_to_update.as_deref());
        }
    }
}

/// Destroys render state for every registered component and recreates it all
/// when dropped.
///
/// Construction enumerates the registry and builds one
/// [`RecreateRenderStateGuard`] per component, all feeding one shared scene
/// set; every teardown completes before construction returns and no scene is
/// updated yet. Drop releases the per-component guards (the rebuild phase)
/// and then runs exactly one consolidated primitive-info update per distinct
/// affected scene.
pub struct GlobalRecreateRenderStateGuard<'a> {
    component_guards: Vec<RecreateRenderStateGuard<'a>>,
    scenes_to_update: Arc<Mutex<ScenesToUpdate>>,
}

impl<'a> GlobalRecreateRenderStateGuard<'a> {
    /// Tear down render state for every component in `registry`.
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        let scenes_to_update = Arc::new(Mutex::new(ScenesToUpdate::new()));
        let component_guards: Vec<_> = registry
            .iter()
            .map(|component| {
                RecreateRenderStateGuard::new(
                    component.as_ref(),
                    Some(Arc::clone(&scenes_to_update)),
                )
            })
            .collect();
        log::debug!(
            "render-state teardown complete for {} component(s), {} scene(s) affected",
            component_guards.len(),
            scenes_to_update.lock().unwrap().len()
        );
        Self {
            component_guards,
            scenes_to_update,
        }
    }
}

impl Drop for GlobalRecreateRenderStateGuard<'_> {
    fn drop(&mut self) {
        // Rebuild phase: every per-component guard drops before any scene
        // update runs. Rebuilds re-record their scenes into the shared set,
        // which is idempotent.
        self.component_guards.clear();

        let updated = self.scenes_to_update.lock().unwrap().update_all();
        log::debug!(
            "render-state rebuild complete, {} scene(s) updated",
            updated
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::null::{ComponentFlags, NullComponent, NullScene};
    use crate::scene::SceneHandle;

    fn test_scene(name: &str) -> (Arc<NullScene>, SceneHandle) {
        let scene = Arc::new(NullScene::new(name));
        let handle = SceneHandle::new(scene.clone());
        (scene, handle)
    }

    #[test]
    fn teardown_then_rebuild() {
        let (scene, handle) = test_scene("main");
        let component = NullComponent::new("hull", Some(handle));

        {
            let _guard = RecreateRenderStateGuard::new(&component, None);
            assert!(!component.is_render_state_created());
            // No shared set: the scene is updated immediately on teardown
            assert_eq!(scene.primitive_update_count(), 1);
        }

        assert!(component.is_render_state_created());
        assert_eq!(component.destroy_calls(), 1);
        assert_eq!(component.create_calls(), 1);
        assert_eq!(scene.primitive_update_count(), 2);
    }

    #[test]
    fn stateless_component_is_untouched() {
        let component =
            NullComponent::with_flags("ghost", None, ComponentFlags::REGISTERED);

        {
            let _guard = RecreateRenderStateGuard::new(&component, None);
            assert!(!component.is_render_state_created());
        }

        assert!(!component.is_render_state_created());
        assert_eq!(component.destroy_calls(), 0);
        assert_eq!(component.create_calls(), 0);
    }

    #[test]
    fn unregistered_component_is_untouched() {
        let component =
            NullComponent::with_flags("orphan", None, ComponentFlags::RENDER_STATE_CREATED);

        {
            let _guard = RecreateRenderStateGuard::new(&component, None);
        }

        assert!(component.is_render_state_created());
        assert_eq!(component.destroy_calls(), 0);
        assert_eq!(component.create_calls(), 0);
    }

    #[test]
    fn unregister_during_guard_skips_rebuild() {
        let component = NullComponent::new("turret", None);

        {
            let _guard = RecreateRenderStateGuard::new(&component, None);
            component.set_registered(false);
        }

        assert!(!component.is_render_state_created());
        assert_eq!(component.create_calls(), 0);
    }

    #[test]
    fn external_rebuild_skips_guard_rebuild() {
        let component = NullComponent::new("hull", None);

        {
            let _guard = RecreateRenderStateGuard::new(&component, None);
            // Some other code path rebuilds first
            component.create_render_state();
        }

        assert_eq!(component.create_calls(), 1);
    }

    #[test]
    #[should_panic(expected = "unreachable")]
    fn unreachable_component_is_a_contract_violation() {
        let component = NullComponent::new("zombie", None);
        component.mark_unreachable();
        let _guard = RecreateRenderStateGuard::new(&component, None);
    }

    #[test]
    fn shared_set_defers_scene_updates() {
        let (scene, handle) = test_scene("main");
        let component = NullComponent::new("hull", Some(handle));
        let set = Arc::new(Mutex::new(ScenesToUpdate::new()));

        {
            let _guard =
                RecreateRenderStateGuard::new(&component, Some(Arc::clone(&set)));
            assert_eq!(scene.primitive_update_count(), 0);
            assert_eq!(set.lock().unwrap().len(), 1);
        }

        // Rebuild re-records the scene instead of updating it
        assert_eq!(scene.primitive_update_count(), 0);
        assert_eq!(set.lock().unwrap().len(), 1);

        assert_eq!(set.lock().unwrap().update_all(), 1);
        assert_eq!(scene.primitive_update_count(), 1);
    }

    #[test]
    fn component_without_scene_sends_no_notifications() {
        let component = NullComponent::new("detached", None);
        let set = Arc::new(Mutex::new(ScenesToUpdate::new()));

        update_scene_infos_for_component(&component, Some(set.as_ref()));
        assert!(set.lock().unwrap().is_empty());

        // Immediate path is a no-op as well
        update_scene_infos_for_component(&component, None);
    }

    #[test]
    fn global_guard_batches_shared_scenes() {
        let (scene_a, handle_a) = test_scene("a");
        let (scene_b, handle_b) = test_scene("b");

        let c1 = Arc::new(NullComponent::new("c1", Some(handle_a.clone())));
        let c2 = Arc::new(NullComponent::new("c2", Some(handle_a)));
        let c3 = Arc::new(NullComponent::new("c3", Some(handle_b)));

        let mut registry = ComponentRegistry::new();
        registry.register(c1.clone());
        registry.register(c2.clone());
        registry.register(c3.clone());

        {
            let _guard = GlobalRecreateRenderStateGuard::new(&registry);
            // Two-phase barrier: every teardown happened before any rebuild
            assert!(!c1.is_render_state_created());
            assert!(!c2.is_render_state_created());
            assert!(!c3.is_render_state_created());
            // Batched: no scene updated during the teardown phase
            assert_eq!(scene_a.primitive_update_count(), 0);
            assert_eq!(scene_b.primitive_update_count(), 0);
        }

        assert!(c1.is_render_state_created());
        assert!(c2.is_render_state_created());
        assert!(c3.is_render_state_created());
        // One consolidated update per distinct scene, not per component
        assert_eq!(scene_a.primitive_update_count(), 1);
        assert_eq!(scene_b.primitive_update_count(), 1);
    }

    #[test]
    fn global_guard_skips_inactive_components() {
        let (scene, handle) = test_scene("main");
        let active = Arc::new(NullComponent::new("active", Some(handle.clone())));
        let inactive = Arc::new(NullComponent::with_flags(
            "inactive",
            Some(handle),
            ComponentFlags::RENDER_STATE_CREATED,
        ));

        let mut registry = ComponentRegistry::new();
        registry.register(active.clone());
        registry.register(inactive.clone());

        {
            let _guard = GlobalRecreateRenderStateGuard::new(&registry);
        }

        assert_eq!(active.destroy_calls(), 1);
        assert_eq!(active.create_calls(), 1);
        assert_eq!(inactive.destroy_calls(), 0);
        assert_eq!(inactive.create_calls(), 0);
        assert_eq!(scene.primitive_update_count(), 1);
    }

    #[test]
    fn empty_registry_cycle_is_a_noop() {
        let registry = ComponentRegistry::new();
        let guard = GlobalRecreateRenderStateGuard::new(&registry);
        drop(guard);
    }
}

//! Renderable component surface consumed by the recreation guards
//!
//! The guards never own components; they borrow them from a
//! [`ComponentRegistry`] for the duration of a recreation cycle. The
//! registry stores shared handles so component systems elsewhere in the
//! engine keep their own references alive.

use std::sync::Arc;

use crate::scene::SceneHandle;

slotmap::new_key_type! {
    /// Stable key identifying a component within a [`ComponentRegistry`].
    pub struct ComponentKey;
}

/// Capability surface a renderable component exposes to the recreation
/// guards.
///
/// [`Self::destroy_render_state`] and [`Self::create_render_state`] take
/// `&self`: both may hand work off to a rendering execution context and must
/// be safe to call while previously enqueued rendering work is still in
/// flight. Implementors provide their own interior synchronization; the
/// guards never wait for enqueued work to drain.
pub trait RenderStateComponent: Send + Sync {
    /// Human-readable name, used in logs and contract-violation messages.
    fn name(&self) -> &str;

    /// Whether the component is registered with its owning world.
    fn is_registered(&self) -> bool;

    /// Whether render state currently exists for this component.
    fn is_render_state_created(&self) -> bool;

    /// Whether the component has been scheduled for destruction. Handing an
    /// unreachable component to a guard is a contract violation.
    fn is_unreachable(&self) -> bool;

    /// Release the component's render state.
    fn destroy_render_state(&self);

    /// Recreate the component's render state.
    fn create_render_state(&self);

    /// The scene this component's primitives live in, if it is attached to
    /// one.
    fn scene(&self) -> Option<SceneHandle>;
}

/// Registry of live renderable components.
///
/// [`GlobalRecreateRenderStateGuard`](crate::recreate::GlobalRecreateRenderStateGuard)
/// enumerates this to find every component whose render state must be
/// recreated. The registry produces the sequence; it performs no traversal
/// or lifecycle logic of its own.
pub struct ComponentRegistry {
    components: slotmap::SlotMap<ComponentKey, Arc<dyn RenderStateComponent>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            components: slotmap::SlotMap::with_key(),
        }
    }

    /// Add a component, returning the key that removes it later.
    pub fn register(&mut self, component: Arc<dyn RenderStateComponent>) -> ComponentKey {
        self.components.insert(component)
    }

    /// Remove a component, returning it if the key was live.
    pub fn unregister(&mut self, key: ComponentKey) -> Option<Arc<dyn RenderStateComponent>> {
        self.components.remove(key)
    }

    /// Look up a component by key.
    pub fn get(&self, key: ComponentKey) -> Option<&Arc<dyn RenderStateComponent>> {
        self.components.get(key)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over every registered component in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RenderStateComponent>> {
        self.components.values()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

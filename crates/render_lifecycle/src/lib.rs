//! # Render Lifecycle
//!
//! Component render-state lifecycle management with batched scene updates.
//!
//! When an engine-wide rendering change lands (shader recompile, quality
//! switch, device reset), every component's render state has to be torn down
//! and rebuilt. Doing that naively also costs one primitive-info update per
//! component; this crate batches those so each affected scene is updated
//! exactly once per recreation cycle.
//!
//! ## Features
//!
//! - **Scoped guards**: teardown on construction, guaranteed rebuild on drop
//! - **Batched scene updates**: one consolidated pass per recreation cycle
//! - **Null backend**: run the machinery headless for tools and tests
//!
//! ## Quick Start
//!
//! ```rust
//! use render_lifecycle::prelude::*;
//! use std::sync::Arc;
//!
//! let scene = Arc::new(NullScene::new("main"));
//! let handle = SceneHandle::new(scene.clone());
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register(Arc::new(NullComponent::new("hull", Some(handle))));
//!
//! {
//!     let _recreate = GlobalRecreateRenderStateGuard::new(&registry);
//!     // every component's render state is torn down in here
//! }
//! // render state rebuilt; each affected scene updated exactly once
//! assert_eq!(scene.primitive_update_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;

pub mod component;
pub mod config;
pub mod null;
pub mod recreate;
pub mod scene;

/// Common imports for crate users
pub mod prelude {
    pub use crate::component::{ComponentKey, ComponentRegistry, RenderStateComponent};
    pub use crate::config::{Config, ConfigError};
    pub use crate::null::{ComponentFlags, NullComponent, NullScene};
    pub use crate::recreate::{
        update_scene_infos_for_component, GlobalRecreateRenderStateGuard,
        RecreateRenderStateGuard,
    };
    pub use crate::scene::{SceneHandle, SceneInterface, ScenesToUpdate};
}

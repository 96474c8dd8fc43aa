use cadence_ecs::{System, SystemId, World};

use crate::components::Renderable;

/// Keeps track of entities with [`Renderable`] component.
///
/// Drawing happens outside of update passes, see [`RenderSystem::draw`].
///
#[derive(Debug, Default)]
pub struct RenderSystem;

impl RenderSystem {
    /// Invokes draw callback of each entity in interest set of the render system
    /// registered as `id`.
    ///
    /// Returns count of drawn entities.
    ///
    pub fn draw(world: &World, id: SystemId) -> usize {
        let mut drawn = 0;
        for entity in world.interest(id) {
            if let Some(renderable) = world.component::<Renderable>(entity) {
                renderable.draw(entity, world);
                drawn += 1;
            }
        }
        drawn
    }
}

impl System for RenderSystem {
    fn name(&self) -> &'static str {
        "render"
    }
}

use cadence_ecs::{Entity, Result, System, Tick, World};

use crate::components::Transform;
use crate::window::Window;

/// Destroys entities which fell below the bottom edge of the window.
///
/// Window size is read from [`Window`] component of the root entity.
/// Nothing is destroyed while the window has no visible area.
///
#[derive(Debug)]
pub struct GraveyardSystem {
    root: Entity,
    dead: Vec<Entity>,
}

impl GraveyardSystem {
    /// Creates system which reads window size from the `root` entity.
    pub fn new(root: Entity) -> Self {
        Self {
            root,
            dead: Vec::new(),
        }
    }
}

impl System for GraveyardSystem {
    fn name(&self) -> &'static str {
        "graveyard"
    }

    fn update_physics(&mut self, world: &mut World, entities: &[Entity], _: Tick) -> Result<()> {
        let size = match world.component::<Window>(self.root) {
            Some(window) if !window.size.is_zero() => window.size,
            _ => return Ok(()),
        };

        let bottom = size.height as f32;
        self.dead.extend(entities.iter().copied().filter(|&entity| {
            world
                .component::<Transform>(entity)
                .map_or(false, |transform| transform.position.y > bottom)
        }));

        for entity in self.dead.drain(..) {
            log::trace!("entity {:?} left the window", entity);
            world.destroy_entity(entity)?;
        }
        Ok(())
    }
}

use cadence_ecs::{Entity, Result, System, Tick, World};

use crate::components::{Gravity, RigidBody, Transform};

/// Integrates motion of entities with [`Transform`], [`RigidBody`] and [`Gravity`]
/// using explicit Euler method.
///
/// External force is applied after the position was integrated.
///
#[derive(Debug, Default)]
pub struct PhysicsSystem;

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update_physics(&mut self, world: &mut World, entities: &[Entity], tick: Tick) -> Result<()> {
        let dt = tick.delta_secs() as f32;
        for &entity in entities {
            let (mut body, gravity) = match (
                world.component::<RigidBody>(entity),
                world.component::<Gravity>(entity),
            ) {
                (Some(body), Some(gravity)) => (*body, *gravity),
                _ => continue,
            };
            let transform = match world.component_mut::<Transform>(entity) {
                Some(transform) => transform,
                None => continue,
            };

            body.velocity += body.acceleration * dt;
            transform.position += body.velocity * dt;
            transform.rotation += body.angular_velocity * dt;
            body.velocity += gravity.force * dt;

            if let Some(stored) = world.component_mut::<RigidBody>(entity) {
                *stored = body;
            }
            world.mark_changed(entity);
        }
        Ok(())
    }
}

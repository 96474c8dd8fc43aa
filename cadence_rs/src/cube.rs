//! Falling cube of the demo.

use palette::Srgb;
use rand::Rng;
use ultraviolet::Vec2;

use cadence_core::components::{Draw, Gravity, Renderable, RigidBody, Transform};
use cadence_ecs::{Entity, Result, World};

/// Side of the cube.
pub const SIZE: f32 = 24.0;

/// Height above the window where cubes appear.
const SPAWN_HEIGHT: f32 = -100.0;

const COLORS: [(u8, u8, u8); 7] = [
    (0xFF, 0x00, 0x00),
    (0xFF, 0xFF, 0x00),
    (0x00, 0x00, 0xFF),
    (0x00, 0xFF, 0xFF),
    (0x88, 0x88, 0x88),
    (0x00, 0x00, 0x00),
    (0xFF, 0x00, 0xFF),
];

/// Visual of the cube which reports where it should be drawn.
#[derive(Debug, Copy, Clone)]
pub struct Cube {
    pub color: Srgb<u8>,
}

impl Cube {
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let (red, green, blue) = COLORS[rng.gen_range(0..COLORS.len())];
        Self {
            color: Srgb::new(red, green, blue),
        }
    }
}

impl Draw for Cube {
    fn draw(&self, entity: Entity, world: &World) {
        let transform = match world.component::<Transform>(entity) {
            Some(transform) => transform,
            None => return,
        };
        let Srgb {
            red, green, blue, ..
        } = self.color;
        log::trace!(
            "cube {:?} #{:02x}{:02x}{:02x} at ({:.1}, {:.1}) rotated {:.1} size {}",
            entity,
            red,
            green,
            blue,
            transform.position.x,
            transform.position.y,
            transform.rotation,
            SIZE,
        );
    }
}

/// Creates falling cube at random horizontal position inside of window of given `width`.
///
/// # Errors
///
/// An error is returned if entity pool is exhausted.
///
pub fn spawn<R>(world: &mut World, width: u32, rng: &mut R) -> Result<Entity>
where
    R: Rng,
{
    let position = Vec2::new(rng.gen::<f32>() * width as f32, SPAWN_HEIGHT);
    let cube = Cube::random(rng);
    log::debug!("emitting cube at ({:.1}, {:.1})", position.x, position.y);

    world.create_entity(|builder| {
        builder
            .add(Transform::at(position))?
            .add(RigidBody::with_velocity(Vec2::new(0.0, 50.0)))?
            .add(Gravity::new(Vec2::new(0.0, 30.0)))?
            .add(Renderable::new(cube))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_spawn() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut world = World::new();
        let entity = spawn(&mut world, 1280, &mut rng).unwrap();

        let transform = world.component::<Transform>(entity).unwrap();
        assert!((0.0..1280.0).contains(&transform.position.x));
        assert_eq!(transform.position.y, -100.0);
        let body = world.component::<RigidBody>(entity).unwrap();
        assert_eq!(body.velocity, Vec2::new(0.0, 50.0));
        let gravity = world.component::<Gravity>(entity).unwrap();
        assert_eq!(gravity.force, Vec2::new(0.0, 30.0));
        assert!(world.has_component::<Renderable>(entity));
    }

    #[test]
    fn test_zero_width() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut world = World::new();
        let entity = spawn(&mut world, 0, &mut rng).unwrap();
        assert_eq!(world.component::<Transform>(entity).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_colors() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let Cube { color } = Cube::random(&mut rng);
            let components = (color.red, color.green, color.blue);
            assert!(COLORS.contains(&components));
        }
    }
}
